use hotforge::config::MetricParams;
use hotforge::error::HotForgeError;
use hotforge::geometry::{Geometry, Slot};
use hotforge::layout::Layout;
use hotforge::optimizer::seed;
use hotforge::rotation::Rotation;
use hotforge::scorer::{rotation_cost, Scorer};

fn default_params() -> MetricParams {
    MetricParams::default()
}

fn sequential_layout(geometry: Geometry, actions: &[u32]) -> Layout {
    let mut layout = Layout::empty(geometry);
    for (i, &action) in actions.iter().enumerate() {
        let slot = layout.geometry().slot_at(i);
        layout.assign(slot, Some(action));
    }
    layout
}

#[test]
fn test_empty_and_single_rotations_cost_zero() {
    let layout = sequential_layout(Geometry::standard(), &[1, 2, 3]);
    let params = default_params();

    let empty = Rotation::new(vec![]);
    assert_eq!(rotation_cost(&layout, &empty, &params).unwrap(), 0.0);

    let single = Rotation::new(vec![2]);
    assert_eq!(rotation_cost(&layout, &single, &params).unwrap(), 0.0);
}

#[test]
fn test_missing_assignment_is_typed_failure() {
    let layout = sequential_layout(Geometry::standard(), &[1, 2]);
    let rotation = Rotation::new(vec![1, 99, 2]);

    match rotation_cost(&layout, &rotation, &default_params()) {
        Err(HotForgeError::MissingAssignment { action }) => assert_eq!(action, 99),
        other => panic!("expected MissingAssignment, got {:?}", other),
    }
}

#[test]
fn test_reverse_rotation_costs_the_same() {
    let layout = sequential_layout(Geometry::standard(), &[5, 9, 1, 7, 3]);
    let params = default_params();

    let forward = Rotation::new(vec![5, 9, 1, 5, 7, 3, 9, 5]);
    let mut reversed_actions = forward.actions().to_vec();
    reversed_actions.reverse();
    let reversed = Rotation::new(reversed_actions);

    let a = rotation_cost(&layout, &forward, &params).unwrap();
    let b = rotation_cost(&layout, &reversed, &params).unwrap();
    assert!((a - b).abs() < 1e-9);
}

#[test]
fn test_assignment_cost_matches_rotation_cost() {
    let geometry = Geometry::standard();
    let params = default_params();
    let rotation = Rotation::new(vec![4, 2, 7, 4, 2, 9, 7, 4, 11, 2]);
    let scorer = Scorer::new(geometry, &rotation, params.clone()).unwrap();

    // Place the distinct actions on arbitrary but fixed slots.
    let pos: Vec<usize> = vec![3, 10, 17, 24, 31];
    assert_eq!(pos.len(), scorer.action_count());

    let layout = scorer.layout_from_assignment(&pos);
    let full = rotation_cost(&layout, &rotation, &params).unwrap();
    let table = scorer.assignment_cost(&pos);
    assert!(
        (full - table).abs() < 1e-9,
        "walked {} vs table {}",
        full,
        table
    );
}

#[test]
fn test_swap_delta_matches_full_reevaluation() {
    let geometry = Geometry::standard();
    let rotation = Rotation::new(vec![1, 2, 3, 4, 1, 3, 2, 4, 1, 2, 1, 5, 6, 5, 3]);
    let scorer = Scorer::new(geometry, &rotation, default_params()).unwrap();

    let k = scorer.action_count();
    let n = scorer.slot_count();
    let pos: Vec<usize> = (0..k).map(|a| a * 3 + 1).collect();
    let occupant = seed::build_occupancy(&pos, n);
    let before = scorer.assignment_cost(&pos);

    for slot_a in 0..n {
        for slot_b in (slot_a + 1)..n {
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
            assert!(
                (before + delta - after).abs() < 1e-9,
                "swap ({}, {}): delta {} but full diff {}",
                slot_a,
                slot_b,
                delta,
                after - before
            );
        }
    }
}

#[test]
fn test_swapping_irrelevant_actions_keeps_cost() {
    let geometry = Geometry::standard();
    let params = default_params();
    let rotation = Rotation::new(vec![1, 2, 1, 2]);

    // Bind the rotation's actions plus two bystanders.
    let mut layout = Layout::empty(geometry);
    layout.assign(Slot::new(0, 0, 0), Some(1));
    layout.assign(Slot::new(0, 1, 1), Some(2));
    layout.assign(Slot::new(1, 0, 0), Some(50));
    layout.assign(Slot::new(2, 2, 3), Some(60));

    let before = rotation_cost(&layout, &rotation, &params).unwrap();

    layout.assign(Slot::new(1, 0, 0), Some(60));
    layout.assign(Slot::new(2, 2, 3), Some(50));
    let after = rotation_cost(&layout, &rotation, &params).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_negative_page_weight_is_rejected() {
    let rotation = Rotation::new(vec![1, 2]);
    let params = MetricParams {
        page_switch_weight: -1.0,
        thumb_reach: false,
    };
    match Scorer::new(Geometry::standard(), &rotation, params) {
        Err(HotForgeError::Validation(_)) => {}
        other => panic!("expected Validation error, got {:?}", other.err()),
    }
}

#[test]
fn test_repeated_action_contributes_nothing() {
    // d(s, s) = 0, so an immediate repeat adds no cost anywhere.
    let layout = sequential_layout(Geometry::standard(), &[1, 2]);
    let params = default_params();

    let plain = Rotation::new(vec![1, 2]);
    let stuttered = Rotation::new(vec![1, 1, 1, 2, 2]);

    let a = rotation_cost(&layout, &plain, &params).unwrap();
    let b = rotation_cost(&layout, &stuttered, &params).unwrap();
    assert_eq!(a, b);
}
