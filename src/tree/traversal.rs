//! Explicit-stack depth-first traversal
//!
//! Deep or path-shaped trees never touch the call stack: pending vertices
//! live in a `Vec` of frames. Visit order matches recursive pre-order over
//! each adjacency list in insertion order.

use super::{Tree, VertexId, Weight};

/// One visited vertex, with the tree edge it was reached through
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visit<W> {
    /// Vertex being visited
    pub vertex: VertexId,

    /// Vertex it was reached from (`None` for the traversal root)
    pub parent: Option<VertexId>,

    /// Accumulated weight from the traversal root
    pub distance: W,
}

/// Pre-order DFS from a fixed start vertex
///
/// Stack depth: O(n) frames on the heap
#[derive(Debug)]
pub struct DepthFirst<'a, W> {
    tree: &'a Tree<W>,

    /// Frames waiting to be visited
    stack: Vec<Visit<W>>,
}

impl<'a, W: Weight> DepthFirst<'a, W> {
    /// Start a traversal at `start`
    pub fn new(tree: &'a Tree<W>, start: VertexId) -> Self {
        Self {
            tree,
            stack: vec![Visit {
                vertex: start,
                parent: None,
                distance: W::zero(),
            }],
        }
    }
}

impl<W: Weight> Iterator for DepthFirst<'_, W> {
    type Item = Visit<W>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;

        // Reverse push so the first neighbor is popped first
        for &(next, weight) in self.tree.neighbors(visit.vertex).iter().rev() {
            if Some(next) == visit.parent {
                continue;
            }
            self.stack.push(Visit {
                vertex: next,
                parent: Some(visit.vertex),
                distance: visit.distance + weight,
            });
        }

        Some(visit)
    }
}
