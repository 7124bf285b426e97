use hotforge::config::MetricParams;
use hotforge::geometry::{Geometry, Slot};
use hotforge::optimizer::seed;
use hotforge::rotation::Rotation;
use hotforge::scorer::metric::travel;
use hotforge::scorer::{rotation_cost, Scorer};
use proptest::prelude::*;

// --- STRATEGIES ---

prop_compose! {
    fn arb_params()(
        weight in 0.0..5.0f64,
        thumb in any::<bool>()
    ) -> MetricParams {
        MetricParams { page_switch_weight: weight, thumb_reach: thumb }
    }
}

prop_compose! {
    fn arb_slot()(
        page in 0u8..3,
        row in 0u8..3,
        col in 0u8..4
    ) -> Slot {
        Slot::new(page, row, col)
    }
}

prop_compose! {
    fn arb_rotation()(
        actions in proptest::collection::vec(0u32..12, 0..50)
    ) -> Rotation {
        Rotation::new(actions)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_metric_symmetric_and_zero_diagonal(
        a in arb_slot(),
        b in arb_slot(),
        params in arb_params()
    ) {
        let geom = Geometry::standard();
        let ab = travel(&geom, a, b, &params);
        let ba = travel(&geom, b, a, &params);
        prop_assert!(ab >= 0.0);
        prop_assert_eq!(ab, ba);
        prop_assert_eq!(travel(&geom, a, a, &params), 0.0);
    }

    #[test]
    fn prop_reverse_rotation_same_cost(
        rotation in arb_rotation(),
        params in arb_params()
    ) {
        let geom = Geometry::standard();
        let scorer = Scorer::new(geom, &rotation, params.clone()).unwrap();
        let k = scorer.action_count();
        let pos: Vec<usize> = (0..k).collect();
        let layout = scorer.layout_from_assignment(&pos);

        let mut reversed_actions = rotation.actions().to_vec();
        reversed_actions.reverse();
        let reversed = Rotation::new(reversed_actions);

        let forward = rotation_cost(&layout, &rotation, &params).unwrap();
        let backward = rotation_cost(&layout, &reversed, &params).unwrap();
        prop_assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn prop_swap_delta_consistent_with_full(
        rotation in arb_rotation(),
        params in arb_params(),
        shuffle_seed in any::<u64>(),
        pick in any::<u64>()
    ) {
        let geom = Geometry::standard();
        let scorer = Scorer::new(geom, &rotation, params).unwrap();
        let k = scorer.action_count();
        let n = scorer.slot_count();

        let mut rng = fastrand::Rng::with_seed(shuffle_seed);
        let pos = seed::random_seed(&mut rng, n, k);
        let occupant = seed::build_occupancy(&pos, n);

        let slot_a = (pick % n as u64) as usize;
        let slot_b = ((pick / n as u64) % n as u64) as usize;
        prop_assume!(slot_a != slot_b);

        let before = scorer.assignment_cost(&pos);
        let delta = scorer.swap_delta(&pos, &occupant, slot_a, slot_b);

        let mut swapped = pos.clone();
        for p in swapped.iter_mut() {
            if *p == slot_a {
                *p = slot_b;
            } else if *p == slot_b {
                *p = slot_a;
            }
        }
        let after = scorer.assignment_cost(&swapped);
        prop_assert!((before + delta - after).abs() < 1e-9,
            "delta {} vs full diff {}", delta, after - before);
    }

    #[test]
    fn prop_table_cost_matches_walked_cost(
        rotation in arb_rotation(),
        params in arb_params(),
        shuffle_seed in any::<u64>()
    ) {
        let geom = Geometry::standard();
        let scorer = Scorer::new(geom, &rotation, params.clone()).unwrap();
        let k = scorer.action_count();
        let n = scorer.slot_count();

        let mut rng = fastrand::Rng::with_seed(shuffle_seed);
        let pos = seed::random_seed(&mut rng, n, k);
        let layout = scorer.layout_from_assignment(&pos);

        let table = scorer.assignment_cost(&pos);
        let walked = rotation_cost(&layout, &rotation, &params).unwrap();
        prop_assert!((table - walked).abs() < 1e-9,
            "table {} vs walked {}", table, walked);
    }
}
