use crate::scorer::Scorer;
use fastrand::Rng;

/// Greedy construction: heaviest transition pairs claim the closest free
/// slot pairs first; a half-placed pair pulls its partner next to the
/// placed member. Leftover actions fill remaining slots in index order.
/// Fully deterministic (ties resolve to the lowest slot indices).
pub fn greedy_seed(scorer: &Scorer) -> Vec<usize> {
    let n = scorer.slot_count();
    let k = scorer.action_count();
    let mut pos = vec![usize::MAX; k];
    let mut free = vec![true; n];

    let mut pairs = scorer.pairs().to_vec();
    pairs.sort_by(|x, y| {
        y.2.partial_cmp(&x.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then((x.0, x.1).cmp(&(y.0, y.1)))
    });

    for &(a, b, _) in &pairs {
        match (pos[a] != usize::MAX, pos[b] != usize::MAX) {
            (true, true) => {}
            (false, false) => {
                if let Some((i, j)) = closest_free_pair(scorer, &free) {
                    pos[a] = i;
                    pos[b] = j;
                    free[i] = false;
                    free[j] = false;
                }
            }
            (true, false) => {
                if let Some(j) = closest_free_to(scorer, &free, pos[a]) {
                    pos[b] = j;
                    free[j] = false;
                }
            }
            (false, true) => {
                if let Some(i) = closest_free_to(scorer, &free, pos[b]) {
                    pos[a] = i;
                    free[i] = false;
                }
            }
        }
    }

    // Actions without any transition partner still need a slot.
    for p in pos.iter_mut() {
        if *p == usize::MAX {
            let slot = free.iter().position(|&f| f).expect("seed ran out of slots");
            *p = slot;
            free[slot] = false;
        }
    }
    pos
}

fn closest_free_pair(scorer: &Scorer, free: &[bool]) -> Option<(usize, usize)> {
    let n = free.len();
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..n {
        if !free[i] {
            continue;
        }
        for j in (i + 1)..n {
            if !free[j] {
                continue;
            }
            let d = scorer.slot_distance(i, j);
            if best.map_or(true, |(_, _, bd)| d < bd) {
                best = Some((i, j, d));
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}

fn closest_free_to(scorer: &Scorer, free: &[bool], anchor: usize) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (j, &f) in free.iter().enumerate() {
        if !f {
            continue;
        }
        let d = scorer.slot_distance(anchor, j);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((j, d));
        }
    }
    best.map(|(j, _)| j)
}

/// Restart diversity: a uniformly shuffled injective assignment.
pub fn random_seed(rng: &mut Rng, slot_count: usize, action_count: usize) -> Vec<usize> {
    let mut slots: Vec<usize> = (0..slot_count).collect();
    rng.shuffle(&mut slots);
    slots.truncate(action_count);
    slots
}

/// Inverse view of a dense assignment: slot index -> occupying action.
pub fn build_occupancy(pos: &[usize], slot_count: usize) -> Vec<Option<usize>> {
    let mut occupant = vec![None; slot_count];
    for (action, &slot) in pos.iter().enumerate() {
        occupant[slot] = Some(action);
    }
    occupant
}
