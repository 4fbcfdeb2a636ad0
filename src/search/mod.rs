//! Radius search driver
//!
//! Binary-searches the sorted distance universe for the first value the
//! oracle accepts, then checks that value once more to materialize the
//! centers and assignment. Radius zero is prepended as an extra candidate:
//! searching the pairwise distances alone would report the smallest pairwise
//! distance even when every vertex can serve itself (`k >= n`), so this
//! driver returns zero for those inputs instead.
//!
//! The oracle is a greedy and is not monotone in the radius on every tree,
//! so the result is the radius the bisection settles on: it is accepted, and
//! the candidate just below it is rejected.

mod verify;

pub use verify::VerificationError;

use std::fmt;

use tracing::debug;

use crate::distance::DistanceTable;
use crate::oracle::{Assignment, Coverage, FeasibilityOracle};
use crate::tree::{VertexId, Weight};
use crate::{KCenterError, SolverConfig};

/// Counters collected during one search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchStats {
    /// Oracle invocations, including the final materializing one
    pub probes: usize,

    /// Size of the distance universe searched
    pub universe_len: usize,
}

/// Optimal radius with its centers and assignment
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution<W> {
    /// Minimum feasible radius found
    pub radius: W,

    /// Opened centers, in opening order
    pub centers: Vec<VertexId>,

    /// Center serving each vertex
    pub assignment: Assignment,

    /// Search counters
    pub stats: SearchStats,
}

impl<W: Weight> Solution<W> {
    /// Vertices served by `center`
    pub fn load(&self, center: VertexId) -> usize {
        self.assignment.load(center)
    }

    /// Served vertices per center, in center opening order
    pub fn clusters(&self) -> Vec<(VertexId, Vec<VertexId>)> {
        self.centers
            .iter()
            .map(|&center| {
                let members = self
                    .assignment
                    .iter()
                    .filter(|&(_, served_by)| served_by == Some(center))
                    .map(|(vertex, _)| vertex)
                    .collect();
                (center, members)
            })
            .collect()
    }

    /// Re-check capacity, center budget and radius against `table`
    pub fn verify(
        &self,
        table: &DistanceTable<W>,
        config: &SolverConfig,
    ) -> Result<(), VerificationError> {
        verify::verify(self, table, config)
    }

    /// BLAKE3 digest of the rendered solution (stats excluded)
    pub fn fingerprint(&self) -> blake3::Hash {
        blake3::hash(self.to_string().as_bytes())
    }
}

impl<W: Weight> fmt::Display for Solution<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "radius: {}", self.radius)?;

        write!(f, "centers:")?;
        for center in &self.centers {
            write!(f, " {}", center)?;
        }
        writeln!(f)?;

        write!(f, "assignment:")?;
        for (_, center) in self.assignment.iter() {
            match center {
                Some(center) => write!(f, " {}", center)?,
                None => write!(f, " -")?,
            }
        }
        writeln!(f)
    }
}

/// Binary search over the distance universe of one table
#[derive(Debug)]
pub struct RadiusSearch<'a, W> {
    table: &'a DistanceTable<W>,
    oracle: FeasibilityOracle<'a, W>,
}

impl<'a, W: Weight> RadiusSearch<'a, W> {
    /// Prepare a search, rejecting configurations no radius can satisfy
    pub fn new(table: &'a DistanceTable<W>, config: &SolverConfig) -> Result<Self, KCenterError> {
        config.validate(table.vertex_count())?;
        Ok(Self {
            table,
            oracle: FeasibilityOracle::new(table, config),
        })
    }

    /// Find the smallest accepted radius and its witness
    ///
    /// Fails with [`KCenterError::NoFeasibleRadius`] if the oracle rejects
    /// the radius the search settles on, which leaves vertices unserved.
    pub fn run(&self) -> Result<Solution<W>, KCenterError> {
        let universe = self.table.universe();

        // Candidate 0 is radius zero, which no pair realizes unless an edge
        // weighs zero; the rest is the universe shifted by one
        let candidate = |index: usize| {
            if index == 0 {
                W::zero()
            } else {
                universe[index - 1]
            }
        };

        let mut probes = 0;
        let (mut lo, mut hi) = (0, universe.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            let radius = candidate(mid);
            probes += 1;
            let feasible = self.oracle.check(radius).feasible;
            debug!(index = mid, %radius, feasible, "probe");
            if feasible {
                hi = mid;
            } else {
                lo = mid + 1;
            }
        }
        let radius = candidate(lo);

        probes += 1;
        let Coverage {
            feasible,
            radius,
            centers,
            assignment,
        } = self.oracle.check(radius);

        if !feasible {
            return Err(KCenterError::NoFeasibleRadius {
                radius: radius.to_string(),
                unserved: assignment.iter().filter(|(_, c)| c.is_none()).count(),
            });
        }

        Ok(Solution {
            radius,
            centers,
            assignment,
            stats: SearchStats {
                probes,
                universe_len: universe.len(),
            },
        })
    }
}
