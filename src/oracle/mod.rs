//! Feasibility oracle
//!
//! Answers "can every vertex be served within radius r by at most k centers
//! of capacity C?" and, when it can, produces the witnessing centers and
//! assignment. Greedy construction from the equal-capacity p-center
//! algorithm on trees:
//!
//! 1. For each vertex i, f(i) = the ancestor closest to the root that still
//!    lies within r of i
//! 2. Open centers in order of deepest f(i)
//! 3. Each center takes the (at most C) reachable uncovered vertices that
//!    are farthest from the root
//!
//! Every call owns its working state; the distance table is only borrowed,
//! so checks at different radii are independent.

mod assignment;
mod queue;

pub use assignment::Assignment;
pub use queue::CandidateQueue;

use std::collections::VecDeque;

use bitvec::prelude::*;
use tracing::trace;

use crate::distance::DistanceTable;
use crate::tree::{compare, VertexId, Weight};
use crate::SolverConfig;

/// What to do with a popped candidate whose vertex is already covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleEntryPolicy {
    /// Open a center at the popped vertex regardless
    #[default]
    Retain,

    /// Set it aside and pop again; set-aside entries are opened, oldest
    /// first, only once no uncovered candidate is left
    SkipCovered,
}

/// Result of one feasibility check
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage<W> {
    /// Whether every vertex got a center
    pub feasible: bool,

    /// Radius that was checked
    pub radius: W,

    /// Opened centers, in opening order
    pub centers: Vec<VertexId>,

    /// Vertex-to-center map; partial when infeasible
    pub assignment: Assignment,
}

/// Decision procedure for a fixed tree, capacity and center budget
#[derive(Debug, Clone, Copy)]
pub struct FeasibilityOracle<'a, W> {
    table: &'a DistanceTable<W>,

    /// Capacity C per center
    capacity: usize,

    /// Center budget k
    max_centers: usize,

    stale_entries: StaleEntryPolicy,
}

impl<'a, W: Weight> FeasibilityOracle<'a, W> {
    /// Oracle over `table` using the capacity, center budget and stale-entry
    /// policy of `config`
    pub fn new(table: &'a DistanceTable<W>, config: &SolverConfig) -> Self {
        Self {
            table,
            capacity: config.capacity,
            max_centers: config.centers,
            stale_entries: config.stale_entries,
        }
    }

    /// Check whether `radius` is achievable
    pub fn check(&self, radius: W) -> Coverage<W> {
        let table = self.table;
        let vertices = table.vertex_count();

        let mut unassigned: BitVec = BitVec::repeat(true, vertices + 1);
        unassigned.set(0, false);
        let mut remaining = vertices;

        let mut queue = CandidateQueue::with_capacity(vertices);
        for vertex in 1..=vertices {
            let anchor = self.covering_ancestor(vertex, radius);
            queue.push(table.depth(anchor), vertex);
        }

        let mut deferred = VecDeque::new();
        let mut centers = Vec::new();
        let mut assignment = Assignment::new(vertices);

        while remaining > 0 && centers.len() < self.max_centers {
            let Some(center) = self.next_center(&mut queue, &mut deferred, &unassigned) else {
                break;
            };
            centers.push(center);

            let mut reachable: Vec<VertexId> = unassigned
                .iter_ones()
                .filter(|&vertex| table.distance(center, vertex) <= radius)
                .collect();

            // Stable: equal depths keep ascending id order
            reachable.sort_by(|&a, &b| compare(&table.depth(b), &table.depth(a)));
            reachable.truncate(self.capacity);

            for &vertex in &reachable {
                assignment.assign(vertex, center);
                unassigned.set(vertex, false);
            }
            remaining -= reachable.len();

            trace!(center, served = reachable.len(), remaining, "opened center");
        }

        Coverage {
            feasible: remaining == 0,
            radius,
            centers,
            assignment,
        }
    }

    /// f(i): first vertex on the root path of `vertex` within `radius` of it
    fn covering_ancestor(&self, vertex: VertexId, radius: W) -> VertexId {
        let depth = self.table.depth(vertex);
        self.table
            .ancestors(vertex)
            .iter()
            .copied()
            .find(|&ancestor| depth - self.table.depth(ancestor) <= radius)
            .unwrap_or(vertex)
    }

    /// Every vertex is handed out at most once, so no center opens twice
    fn next_center(
        &self,
        queue: &mut CandidateQueue<W>,
        deferred: &mut VecDeque<VertexId>,
        unassigned: &BitSlice,
    ) -> Option<VertexId> {
        match self.stale_entries {
            StaleEntryPolicy::Retain => queue.pop(),
            StaleEntryPolicy::SkipCovered => {
                while let Some(vertex) = queue.pop() {
                    if unassigned[vertex] {
                        return Some(vertex);
                    }
                    deferred.push_back(vertex);
                }
                deferred.pop_front()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    fn star() -> DistanceTable<i32> {
        //        1
        //     1/ |3 \1
        //     2  3   4
        let mut tree = Tree::new(4);
        tree.add_edge(1, 2, 1).unwrap();
        tree.add_edge(1, 3, 3).unwrap();
        tree.add_edge(1, 4, 1).unwrap();
        DistanceTable::build(&tree, 1).unwrap()
    }

    #[test]
    fn test_radius_zero_is_infeasible() {
        let table = star();
        let oracle = FeasibilityOracle::new(&table, &SolverConfig::new(3, 2));
        let coverage = oracle.check(0);

        assert!(!coverage.feasible);
        assert_eq!(coverage.centers, vec![3, 2]);
        assert_eq!(coverage.assignment.center_of(1), None);
        assert_eq!(coverage.assignment.center_of(4), None);
    }

    #[test]
    fn test_radius_one_covers_star() {
        let table = star();
        let oracle = FeasibilityOracle::new(&table, &SolverConfig::new(3, 2));
        let coverage = oracle.check(1);

        assert!(coverage.feasible);
        assert_eq!(coverage.radius, 1);
        assert_eq!(coverage.centers, vec![3, 1]);
        assert_eq!(coverage.assignment.center_of(3), Some(3));
        for vertex in [1, 2, 4] {
            assert_eq!(coverage.assignment.center_of(vertex), Some(1));
        }
    }

    #[test]
    fn test_capacity_truncates_farthest_first() {
        let table = star();
        let oracle = FeasibilityOracle::new(&table, &SolverConfig::new(2, 2));

        // Center 1 can reach 1, 2 and 4 but only keeps the two deepest
        let coverage = oracle.check(2);
        assert!(!coverage.feasible);
        assert_eq!(coverage.centers, vec![3, 1]);
        assert_eq!(coverage.assignment.center_of(2), Some(1));
        assert_eq!(coverage.assignment.center_of(4), Some(1));
        assert_eq!(coverage.assignment.center_of(1), None);
    }

    #[test]
    fn test_stale_entry_policies_differ() {
        let table = star();

        // Vertex 2 is covered by center 1 before its queue entry comes up
        let retain = FeasibilityOracle::new(&table, &SolverConfig::new(2, 2)).check(3);
        assert!(retain.feasible);
        assert_eq!(retain.centers, vec![1, 2]);
        assert_eq!(retain.assignment.center_of(1), Some(2));
        assert_eq!(retain.assignment.center_of(4), Some(2));

        let config = SolverConfig::new(2, 2).with_stale_entries(StaleEntryPolicy::SkipCovered);
        let skip = FeasibilityOracle::new(&table, &config).check(3);
        assert!(skip.feasible);
        assert_eq!(skip.centers, vec![1, 4]);
        assert_eq!(skip.assignment.center_of(1), Some(4));
        assert_eq!(skip.assignment.center_of(3), Some(1));
    }

    #[test]
    fn test_skipped_entries_are_deferred() {
        //    1
        //  1/ \1
        //  2   3
        let mut tree = Tree::new(3);
        tree.add_edge(1, 2, 1u32).unwrap();
        tree.add_edge(1, 3, 1).unwrap();
        let table = DistanceTable::build(&tree, 1).unwrap();

        // Vertex 1 loses its own entry to capacity; the set-aside entry for
        // vertex 2 picks it up once the queue runs dry
        let config = SolverConfig::new(1, 10).with_stale_entries(StaleEntryPolicy::SkipCovered);
        let coverage = FeasibilityOracle::new(&table, &config).check(1);
        assert!(coverage.feasible);
        assert_eq!(coverage.centers, vec![1, 3, 2]);
        assert_eq!(coverage.assignment.center_of(1), Some(2));

        // Retaining opens the stale entry for vertex 2 in queue order
        let retain = FeasibilityOracle::new(&table, &SolverConfig::new(1, 10)).check(1);
        assert!(retain.feasible);
        assert_eq!(retain.centers, vec![1, 2, 3]);
        assert_eq!(retain.assignment.center_of(1), Some(2));
    }

    #[test]
    fn test_skip_covered_feasible_at_largest_distance() {
        //    1
        //  2/ \4
        //  2   3
        let mut tree = Tree::new(3);
        tree.add_edge(1, 2, 2u32).unwrap();
        tree.add_edge(1, 3, 4).unwrap();
        let table = DistanceTable::build(&tree, 1).unwrap();
        let config = SolverConfig::new(1, 5).with_stale_entries(StaleEntryPolicy::SkipCovered);

        let coverage = FeasibilityOracle::new(&table, &config).check(6);
        assert!(coverage.feasible);
        assert_eq!(coverage.centers, vec![1, 2, 3]);
        assert_eq!(coverage.assignment.center_of(3), Some(1));
        assert_eq!(coverage.assignment.center_of(1), Some(3));
    }

    #[test]
    fn test_exhausted_budget_reports_infeasible() {
        let table = star();
        let coverage = FeasibilityOracle::new(&table, &SolverConfig::new(1, 4)).check(0);
        assert!(coverage.feasible);

        // At radius zero every vertex needs a center of its own
        let coverage = FeasibilityOracle::new(&table, &SolverConfig::new(4, 3)).check(0);
        assert!(!coverage.feasible);
        assert_eq!(coverage.centers.len(), 3);
    }

    #[test]
    fn test_feasibility_is_not_monotone_in_radius() {
        // Vertex i + 2 hangs off its listed parent
        let parents = [(1, 8), (2, 1), (1, 7), (3, 1), (1, 8), (6, 9), (7, 2), (1, 7), (8, 0)];
        let mut tree = Tree::new(parents.len() + 1);
        for (i, &(parent, w)) in parents.iter().enumerate() {
            tree.add_edge(parent, i + 2, w).unwrap();
        }
        let table = DistanceTable::build(&tree, 1).unwrap();
        let oracle = FeasibilityOracle::new(&table, &SolverConfig::new(3, 5));

        // The greedy accepts 9, rejects the next three universe values, then
        // accepts again from 15 on
        assert!(oracle.check(9).feasible);
        for radius in [10, 11, 14] {
            assert!(!oracle.check(radius).feasible, "radius {}", radius);
        }
        assert!(oracle.check(15).feasible);
        assert!(table.universe().contains(&10));
    }
}
