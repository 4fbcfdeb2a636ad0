use kcenter_tree::*;
use proptest::prelude::*;
use test_helpers::*;

/// Random tree on 1..12 vertices plus parameters with k * C >= n
fn instance() -> impl Strategy<Value = (Tree<u32>, usize, usize, bool)> {
    (1usize..12).prop_flat_map(|n| {
        (
            proptest::collection::vec((any::<usize>(), 0u32..10), n - 1),
            1..=n,
            0usize..3,
            any::<bool>(),
        )
            .prop_map(move |(edges, capacity, extra, skip)| {
                let parents: Vec<(usize, u32)> = edges
                    .into_iter()
                    .enumerate()
                    .map(|(i, (choice, w))| (1 + choice % (i + 1), w))
                    .collect();
                let centers = (n + capacity - 1) / capacity + extra;
                (create_from_parents(&parents), capacity, centers, skip)
            })
    })
}

fn config_for(capacity: usize, centers: usize, skip: bool) -> SolverConfig {
    let policy = if skip {
        StaleEntryPolicy::SkipCovered
    } else {
        StaleEntryPolicy::Retain
    };
    SolverConfig::new(capacity, centers).with_stale_entries(policy)
}

proptest! {
    #[test]
    fn solutions_respect_invariants((tree, capacity, centers, skip) in instance()) {
        let config = config_for(capacity, centers, skip);
        let solution = Solver::new(config.clone()).solve(&tree).expect("capacity suffices");
        let table = DistanceTable::build(&tree, 1).expect("valid tree");

        prop_assert!(solution.centers.len() <= centers);
        prop_assert!(solution.assignment.is_complete());
        for (vertex, center) in solution.assignment.iter() {
            let center = center.expect("complete assignment");
            prop_assert!(table.distance(center, vertex) <= solution.radius);
        }
        for &center in &solution.centers {
            prop_assert!(solution.load(center) <= capacity);
        }
        prop_assert_eq!(solution.verify(&table, &config), Ok(()));
    }

    #[test]
    fn radius_is_minimal_among_candidates((tree, capacity, centers, skip) in instance()) {
        let config = config_for(capacity, centers, skip);
        let solution = Solver::new(config.clone()).solve(&tree).expect("capacity suffices");
        let table = DistanceTable::build(&tree, 1).expect("valid tree");
        let oracle = FeasibilityOracle::new(&table, &config);

        prop_assert!(solution.radius == 0 || table.universe().contains(&solution.radius));

        // Next smaller candidate (zero or a pairwise distance) is rejected
        if solution.radius > 0 {
            let smaller = table
                .candidate_radii()
                .into_iter()
                .filter(|&r| r < solution.radius)
                .last()
                .unwrap_or(0);
            prop_assert!(!oracle.check(smaller).feasible);
        }
    }

    #[test]
    fn maximum_radius_is_always_feasible((tree, capacity, centers, skip) in instance()) {
        let config = config_for(capacity, centers, skip);
        let table = DistanceTable::build(&tree, 1).expect("valid tree");
        let oracle = FeasibilityOracle::new(&table, &config);

        let largest = table.universe().last().copied().unwrap_or(0);
        prop_assert!(oracle.check(largest).feasible);
    }

    #[test]
    fn repeated_solves_agree((tree, capacity, centers, skip) in instance()) {
        let solver = Solver::new(config_for(capacity, centers, skip));
        let first = solver.solve(&tree).expect("capacity suffices");
        let second = solver.solve(&tree).expect("capacity suffices");
        prop_assert_eq!(first, second);
    }
}
