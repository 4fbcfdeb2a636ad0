//! # Capacitated k-Center on Trees
//!
//! Solver for the equal-capacity k-center problem on edge-weighted
//! trees: open at most `k` centers on tree vertices so that every vertex is
//! served by a center within radius `r`, no center serving more than `C`
//! vertices, and `r` is as small as possible.
//!
//! ## Core Algorithm
//!
//! 1. **Distance precomputation**: one traversal per vertex gives all
//!    pairwise distances, root-to-vertex ancestor chains and the sorted
//!    distance universe (O(n²) space, O(n² log n) time)
//! 2. **Feasibility oracle**: greedy covering for a fixed radius, opening
//!    centers bottom-up and filling each to capacity with the uncovered
//!    vertices farthest from the root
//! 3. **Radius search**: binary search over zero followed by the sorted
//!    distance universe
//!
//! ## Usage Example
//!
//! ```
//! use kcenter_tree::{solve, Tree};
//!
//! let mut tree = Tree::new(4);
//! tree.add_edge(1, 2, 1)?;
//! tree.add_edge(1, 3, 3)?;
//! tree.add_edge(1, 4, 1)?;
//!
//! let solution = solve(&tree, 3, 2)?;
//! assert_eq!(solution.radius, 1);
//! assert!(solution.centers.len() <= 2);
//! # Ok::<(), kcenter_tree::KCenterError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules, leaf first
pub mod tree;     // Weighted tree store
pub mod distance; // All-pairs distances and ancestor chains
pub mod oracle;   // Fixed-radius feasibility check
pub mod search;   // Binary search over candidate radii
pub mod io;       // Edge-list tree files

// Re-exports for convenience
pub use distance::DistanceTable;
pub use oracle::{Assignment, Coverage, FeasibilityOracle, StaleEntryPolicy};
pub use search::{RadiusSearch, SearchStats, Solution, VerificationError};
pub use tree::{Tree, TreeError, VertexId, Weight};

use thiserror::Error;
use tracing::info;

/// Errors that can occur while solving
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KCenterError {
    /// `k · C < n`: no radius can serve every vertex
    #[error(
        "Infeasible: insufficient total capacity ({centers} centers x capacity {capacity} < {vertices} vertices)"
    )]
    InsufficientCapacity {
        /// Capacity C per center
        capacity: usize,
        /// Center budget k
        centers: usize,
        /// Number of vertices n
        vertices: usize,
    },

    /// Solver parameters out of range
    #[error("Invalid solver configuration: {0}")]
    InvalidConfiguration(String),

    /// Input graph is not a valid tree
    #[error("Invalid tree: {0}")]
    Tree(#[from] TreeError),

    /// The radius the search settled on leaves vertices unserved
    #[error("No feasible radius found: {unserved} vertices unserved at radius {radius}")]
    NoFeasibleRadius {
        /// Radius of the final check
        radius: String,
        /// Vertices left without a center
        unserved: usize,
    },
}

/// Configuration parameters for a solve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Maximum vertices one center may serve (C)
    pub capacity: usize,

    /// Maximum number of centers to open (k)
    pub centers: usize,

    /// Global root for ancestor chains (default: vertex 1)
    pub root: VertexId,

    /// Handling of candidate entries whose vertex is already covered
    pub stale_entries: StaleEntryPolicy,
}

impl SolverConfig {
    /// Configuration with capacity `C` and center budget `k`
    pub fn new(capacity: usize, centers: usize) -> Self {
        Self {
            capacity,
            centers,
            root: 1,
            stale_entries: StaleEntryPolicy::default(),
        }
    }

    /// Root the ancestor chains at `root`
    pub fn with_root(mut self, root: VertexId) -> Self {
        self.root = root;
        self
    }

    /// Choose how stale candidate entries are handled
    pub fn with_stale_entries(mut self, policy: StaleEntryPolicy) -> Self {
        self.stale_entries = policy;
        self
    }

    /// Total capacity k · C (saturating)
    pub fn total_capacity(&self) -> usize {
        self.capacity.saturating_mul(self.centers)
    }

    /// Check parameters against a tree with `vertices` vertices
    pub fn validate(&self, vertices: usize) -> Result<(), KCenterError> {
        if self.centers == 0 {
            return Err(KCenterError::InvalidConfiguration(
                "number of centers must be > 0".to_string(),
            ));
        }
        if self.capacity == 0 {
            return Err(KCenterError::InvalidConfiguration(
                "capacity must be > 0".to_string(),
            ));
        }
        if self.root == 0 || self.root > vertices {
            return Err(KCenterError::InvalidConfiguration(format!(
                "root {} out of range 1..={}",
                self.root, vertices
            )));
        }
        if self.total_capacity() < vertices {
            return Err(KCenterError::InsufficientCapacity {
                capacity: self.capacity,
                centers: self.centers,
                vertices,
            });
        }
        Ok(())
    }
}

/// Main solve orchestrator
///
/// Precomputes distances once, then runs the radius search
#[derive(Debug, Clone)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    /// Create new solver
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for `tree`
    ///
    /// The tree is checked while building the distance table and the
    /// parameters when the search is set up, so nothing is searched unless
    /// `k · C ≥ n`.
    pub fn solve<W: Weight>(&self, tree: &Tree<W>) -> Result<Solution<W>, KCenterError> {
        let table = DistanceTable::build(tree, self.config.root)?;
        let solution = RadiusSearch::new(&table, &self.config)?.run()?;

        info!(
            vertices = tree.vertex_count(),
            radius = %solution.radius,
            centers = solution.centers.len(),
            probes = solution.stats.probes,
            "solved"
        );
        Ok(solution)
    }
}

/// Solve with capacity `C` and at most `k` centers, default settings
pub fn solve<W: Weight>(
    tree: &Tree<W>,
    capacity: usize,
    centers: usize,
) -> Result<Solution<W>, KCenterError> {
    Solver::new(SolverConfig::new(capacity, centers)).solve(tree)
}
