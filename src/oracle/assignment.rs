//! Vertex-to-center assignment

use crate::tree::VertexId;

/// Serving center for each vertex, `None` while uncovered
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Assignment {
    /// Index 0 is unused so vertex ids index directly
    centers: Vec<Option<VertexId>>,
}

impl Assignment {
    /// Assignment over `n` vertices with nothing covered
    pub fn new(vertices: usize) -> Self {
        Self {
            centers: vec![None; vertices + 1],
        }
    }

    /// Serve `vertex` from `center`
    pub fn assign(&mut self, vertex: VertexId, center: VertexId) {
        self.centers[vertex] = Some(center);
    }

    /// Center serving `vertex`
    pub fn center_of(&self, vertex: VertexId) -> Option<VertexId> {
        self.centers.get(vertex).copied().flatten()
    }

    /// Number of vertices served by `center`
    pub fn load(&self, center: VertexId) -> usize {
        self.centers
            .iter()
            .filter(|served_by| **served_by == Some(center))
            .count()
    }

    /// Number of vertices n
    pub fn len(&self) -> usize {
        self.centers.len() - 1
    }

    /// Whether the assignment covers zero vertices
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether every vertex has a center
    pub fn is_complete(&self) -> bool {
        self.centers[1..].iter().all(Option::is_some)
    }

    /// `(vertex, center)` for every vertex in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Option<VertexId>)> + '_ {
        self.centers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(vertex, center)| (vertex, *center))
    }
}
