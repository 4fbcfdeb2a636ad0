//! Weighted undirected tree store
//!
//! Vertices are numbered `1..=n`. Each vertex keeps its incident edges as
//! `(neighbor, weight)` pairs in insertion order. Edges can only be added;
//! the tree is fixed once solving starts.

mod traversal;
mod weight;

pub use traversal::{DepthFirst, Visit};
pub use weight::{compare, is_admissible, Weight};

use thiserror::Error;

/// Vertex identifier (1-indexed)
pub type VertexId = usize;

/// Structural problems with a tree or an edge being added to it
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Tree has no vertices
    #[error("tree has no vertices")]
    Empty,

    /// Vertex id outside `1..=n`
    #[error("vertex {vertex} out of range (tree has {vertices} vertices)")]
    VertexOutOfRange {
        /// Offending vertex id
        vertex: VertexId,
        /// Number of vertices in the tree
        vertices: usize,
    },

    /// Edge from a vertex to itself
    #[error("self loop on vertex {vertex}")]
    SelfLoop {
        /// Vertex at both ends of the edge
        vertex: VertexId,
    },

    /// Negative or incomparable (NaN) edge weight
    #[error("invalid weight {weight} on edge ({u}, {v})")]
    InvalidWeight {
        /// First endpoint
        u: VertexId,
        /// Second endpoint
        v: VertexId,
        /// Rendered weight
        weight: String,
    },

    /// Edge count differs from `n - 1`
    #[error("expected {expected} edges for a tree, found {actual}")]
    EdgeCount {
        /// `n - 1`
        expected: usize,
        /// Edges actually added
        actual: usize,
    },

    /// Some vertices cannot be reached from vertex 1
    #[error("graph is disconnected: reached {reached} of {vertices} vertices")]
    Disconnected {
        /// Vertices reachable from vertex 1
        reached: usize,
        /// Total vertices
        vertices: usize,
    },
}

/// Edge-weighted undirected tree (adjacency lists)
#[derive(Debug, Clone)]
pub struct Tree<W> {
    /// Number of vertices n
    vertices: usize,

    /// Index 0 is unused so vertex ids index directly
    adjacency: Vec<Vec<(VertexId, W)>>,

    /// Edges added so far
    edges: usize,
}

impl<W: Weight> Tree<W> {
    /// Create a tree on `n` isolated vertices
    pub fn new(vertices: usize) -> Self {
        Self {
            vertices,
            adjacency: vec![Vec::new(); vertices + 1],
            edges: 0,
        }
    }

    /// Add the undirected edge `(u, v)` with weight `w`
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, w: W) -> Result<(), TreeError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(TreeError::SelfLoop { vertex: u });
        }
        if !is_admissible(w) {
            return Err(TreeError::InvalidWeight {
                u,
                v,
                weight: w.to_string(),
            });
        }

        self.adjacency[u].push((v, w));
        self.adjacency[v].push((u, w));
        self.edges += 1;
        Ok(())
    }

    /// Number of vertices n
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices
    }

    /// Number of edges added
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Vertex ids `1..=n`
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        1..=self.vertices
    }

    /// Incident `(neighbor, weight)` pairs in insertion order
    ///
    /// Out-of-range ids yield an empty slice.
    pub fn neighbors(&self, vertex: VertexId) -> &[(VertexId, W)] {
        match self.adjacency.get(vertex) {
            Some(list) if vertex != 0 => list,
            _ => &[],
        }
    }

    /// Pre-order traversal from `start`
    pub fn depth_first(&self, start: VertexId) -> DepthFirst<'_, W> {
        DepthFirst::new(self, start)
    }

    /// Check that the edges form a tree: `n - 1` edges, all reachable from 1
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.vertices == 0 {
            return Err(TreeError::Empty);
        }
        if self.edges != self.vertices - 1 {
            return Err(TreeError::EdgeCount {
                expected: self.vertices - 1,
                actual: self.edges,
            });
        }

        // Visited set, not a parent check: the edges may still contain a cycle
        let mut seen = vec![false; self.vertices + 1];
        let mut stack = vec![1];
        let mut reached = 0;
        while let Some(vertex) = stack.pop() {
            if seen[vertex] {
                continue;
            }
            seen[vertex] = true;
            reached += 1;
            stack.extend(
                self.neighbors(vertex)
                    .iter()
                    .map(|&(next, _)| next)
                    .filter(|&next| !seen[next]),
            );
        }

        if reached != self.vertices {
            return Err(TreeError::Disconnected {
                reached,
                vertices: self.vertices,
            });
        }
        Ok(())
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), TreeError> {
        if vertex == 0 || vertex > self.vertices {
            return Err(TreeError::VertexOutOfRange {
                vertex,
                vertices: self.vertices,
            });
        }
        Ok(())
    }
}
