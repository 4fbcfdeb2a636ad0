//! Independent re-check of a solution's invariants

use thiserror::Error;

use super::Solution;
use crate::distance::DistanceTable;
use crate::tree::{VertexId, Weight};
use crate::SolverConfig;

/// First invariant a solution violates
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VerificationError {
    /// More than k centers opened
    #[error("opened {opened} centers, at most {allowed} allowed")]
    TooManyCenters {
        /// Centers opened
        opened: usize,
        /// Center budget k
        allowed: usize,
    },

    /// A vertex has no center
    #[error("vertex {vertex} is unassigned")]
    Unassigned {
        /// Uncovered vertex
        vertex: VertexId,
    },

    /// A vertex is served by a vertex that was never opened
    #[error("vertex {vertex} assigned to {center}, which is not an open center")]
    UnknownCenter {
        /// Served vertex
        vertex: VertexId,
        /// Claimed center
        center: VertexId,
    },

    /// A vertex is farther than the radius from its center
    #[error("vertex {vertex} is {distance} from center {center}, radius is {radius}")]
    OutOfRadius {
        /// Served vertex
        vertex: VertexId,
        /// Its center
        center: VertexId,
        /// Rendered distance between them
        distance: String,
        /// Rendered radius
        radius: String,
    },

    /// A center serves more than C vertices
    #[error("center {center} serves {load} vertices, capacity is {capacity}")]
    CapacityExceeded {
        /// Overloaded center
        center: VertexId,
        /// Vertices it serves
        load: usize,
        /// Capacity C
        capacity: usize,
    },
}

pub(super) fn verify<W: Weight>(
    solution: &Solution<W>,
    table: &DistanceTable<W>,
    config: &SolverConfig,
) -> Result<(), VerificationError> {
    if solution.centers.len() > config.centers {
        return Err(VerificationError::TooManyCenters {
            opened: solution.centers.len(),
            allowed: config.centers,
        });
    }

    for vertex in 1..=table.vertex_count() {
        let center = solution
            .assignment
            .center_of(vertex)
            .ok_or(VerificationError::Unassigned { vertex })?;
        if !solution.centers.contains(&center) {
            return Err(VerificationError::UnknownCenter { vertex, center });
        }
        let distance = table.distance(center, vertex);
        if distance > solution.radius {
            return Err(VerificationError::OutOfRadius {
                vertex,
                center,
                distance: distance.to_string(),
                radius: solution.radius.to_string(),
            });
        }
    }

    for &center in &solution.centers {
        let load = solution.assignment.load(center);
        if load > config.capacity {
            return Err(VerificationError::CapacityExceeded {
                center,
                load,
                capacity: config.capacity,
            });
        }
    }

    Ok(())
}
