//! Candidate ordering for center selection

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::tree::{compare, VertexId, Weight};

/// Queue entry: a vertex and the root distance of its covering ancestor
#[derive(Debug, Clone, Copy)]
struct Candidate<W> {
    anchor_depth: W,
    vertex: VertexId,
}

// Max-heap order: deepest anchor first, then smallest vertex id.
impl<W: Weight> Ord for Candidate<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(&self.anchor_depth, &other.anchor_depth)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl<W: Weight> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for Candidate<W> {}

/// Priority queue of center candidates
///
/// Pops vertices in ascending `(-anchor_depth, vertex)` order. Entries are
/// never reconciled with the unassigned set; callers decide what to do with
/// a popped vertex that is already covered.
#[derive(Debug)]
pub struct CandidateQueue<W> {
    heap: BinaryHeap<Candidate<W>>,
}

impl<W: Weight> CandidateQueue<W> {
    /// Empty queue with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Enqueue `vertex` whose covering ancestor sits at `anchor_depth`
    pub fn push(&mut self, anchor_depth: W, vertex: VertexId) {
        self.heap.push(Candidate {
            anchor_depth,
            vertex,
        });
    }

    /// Next candidate vertex
    pub fn pop(&mut self) -> Option<VertexId> {
        self.heap.pop().map(|candidate| candidate.vertex)
    }

    /// Entries left
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is exhausted
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
