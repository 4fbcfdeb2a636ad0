//! All-pairs distance precomputation
//!
//! One traversal per vertex fills a row of the distance matrix. The
//! traversal from the global root also records every vertex's ancestor
//! chain, and every unordered pair `i < j` contributes one entry to the
//! sorted distance universe that the radius search runs over.
//!
//! Space: O(n²) matrix plus O(n · height) chains
//! Time: O(n²) traversal plus O(n² log n) sort

use crate::tree::{compare, Tree, TreeError, VertexId, Weight};

/// Immutable distance data shared by every feasibility check
#[derive(Debug, Clone)]
pub struct DistanceTable<W> {
    /// Number of vertices n
    vertices: usize,

    /// Row stride (n + 1); row and column 0 are unused
    stride: usize,

    /// Flattened (n+1)×(n+1) matrix, D[a][b] at `a * stride + b`
    matrix: Vec<W>,

    /// Global root the ancestor chains hang from
    root: VertexId,

    /// Root-to-vertex paths, root first, vertex last
    ancestors: Vec<Vec<VertexId>>,

    /// D[i][j] for all i < j, ascending
    universe: Vec<W>,
}

impl<W: Weight> DistanceTable<W> {
    /// Validate `tree` and precompute its distances
    pub fn build(tree: &Tree<W>, root: VertexId) -> Result<Self, TreeError> {
        tree.validate()?;
        let vertices = tree.vertex_count();
        if root == 0 || root > vertices {
            return Err(TreeError::VertexOutOfRange {
                vertex: root,
                vertices,
            });
        }

        let stride = vertices + 1;
        let mut matrix = vec![W::zero(); stride * stride];
        let mut ancestors: Vec<Vec<VertexId>> = vec![Vec::new(); stride];
        let mut universe = Vec::with_capacity(vertices * (vertices - 1) / 2);

        for source in tree.vertices() {
            for visit in tree.depth_first(source) {
                let target = visit.vertex;
                matrix[source * stride + target] = visit.distance;

                if source == root {
                    // Pre-order: the parent's chain is complete already
                    let mut chain = match visit.parent {
                        Some(parent) => ancestors[parent].clone(),
                        None => Vec::new(),
                    };
                    chain.push(target);
                    ancestors[target] = chain;
                }

                if source < target {
                    universe.push(visit.distance);
                }
            }
        }

        universe.sort_by(compare);

        Ok(Self {
            vertices,
            stride,
            matrix,
            root,
            ancestors,
            universe,
        })
    }

    /// Tree distance D[a][b]
    #[inline]
    pub fn distance(&self, a: VertexId, b: VertexId) -> W {
        self.matrix[a * self.stride + b]
    }

    /// Distance from the global root, D[root][v]
    #[inline]
    pub fn depth(&self, vertex: VertexId) -> W {
        self.distance(self.root, vertex)
    }

    /// Path from the global root to `vertex`, both inclusive
    #[inline]
    pub fn ancestors(&self, vertex: VertexId) -> &[VertexId] {
        &self.ancestors[vertex]
    }

    /// Sorted pairwise distances, one per unordered pair
    pub fn universe(&self) -> &[W] {
        &self.universe
    }

    /// Sorted pairwise distances with equal values collapsed
    pub fn candidate_radii(&self) -> Vec<W> {
        let mut radii = self.universe.clone();
        radii.dedup();
        radii
    }

    /// Global root
    pub fn root(&self) -> VertexId {
        self.root
    }

    /// Number of vertices n
    pub fn vertex_count(&self) -> usize {
        self.vertices
    }
}
