use crate::scorer::Scorer;
use rayon::prelude::*;
use std::time::Instant;

const DEADLINE_CHECK_MASK: u64 = 0x3FF;

/// Branch-and-bound over the full assignment space, for instances whose
/// distinct-action count is small. Actions branch in descending order of
/// total transition weight; slots enumerate in index order, so ties keep
/// the first assignment discovered. The top branching level fans out over
/// rayon with one disjoint subtree per first-slot choice; each subtree
/// carries its own incumbent and the reduction takes the minimum.
pub fn solve(
    scorer: &Scorer,
    incumbent_pos: &[usize],
    incumbent_cost: f64,
    deadline: Option<Instant>,
) -> (Vec<usize>, f64) {
    let k = scorer.action_count();
    let n = scorer.slot_count();
    if k == 0 {
        return (Vec::new(), 0.0);
    }

    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        scorer
            .total_weight(b)
            .partial_cmp(&scorer.total_weight(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    let mut depth_of = vec![0usize; k];
    for (d, &a) in order.iter().enumerate() {
        depth_of[a] = d;
    }

    // suffix_weight[d] = total weight of pairs not yet fixed once the
    // first d actions in branch order are assigned.
    let mut per_depth = vec![0.0; k + 1];
    for &(a, b, w) in scorer.pairs() {
        per_depth[depth_of[a].max(depth_of[b])] += w;
    }
    let mut suffix_weight = vec![0.0; k + 2];
    for d in (0..=k).rev() {
        suffix_weight[d] = suffix_weight[d + 1] + per_depth[d];
    }

    let mut dmin = f64::INFINITY;
    for i in 0..n {
        for j in (i + 1)..n {
            dmin = dmin.min(scorer.slot_distance(i, j));
        }
    }
    if !dmin.is_finite() {
        dmin = 0.0;
    }

    let subtrees: Vec<(Vec<usize>, f64)> = (0..n)
        .into_par_iter()
        .map(|first_slot| {
            let mut search = Search {
                scorer,
                order: &order,
                suffix_weight: &suffix_weight,
                dmin,
                pos: vec![usize::MAX; k],
                used: vec![false; n],
                best_pos: incumbent_pos.to_vec(),
                best_cost: incumbent_cost,
                deadline,
                nodes: 0,
                expired: false,
            };
            search.pos[order[0]] = first_slot;
            search.used[first_slot] = true;
            search.dfs(1, 0.0);
            (search.best_pos, search.best_cost)
        })
        .collect();

    let mut best_pos = incumbent_pos.to_vec();
    let mut best_cost = incumbent_cost;
    for (pos, cost) in subtrees {
        if cost < best_cost {
            best_pos = pos;
            best_cost = cost;
        }
    }
    (best_pos, best_cost)
}

struct Search<'a> {
    scorer: &'a Scorer,
    order: &'a [usize],
    suffix_weight: &'a [f64],
    dmin: f64,
    pos: Vec<usize>,
    used: Vec<bool>,
    best_pos: Vec<usize>,
    best_cost: f64,
    deadline: Option<Instant>,
    nodes: u64,
    expired: bool,
}

impl Search<'_> {
    fn dfs(&mut self, depth: usize, partial: f64) {
        if self.expired {
            return;
        }
        self.nodes += 1;
        if self.nodes & DEADLINE_CHECK_MASK == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    self.expired = true;
                    return;
                }
            }
        }

        if depth == self.order.len() {
            if partial < self.best_cost {
                self.best_cost = partial;
                self.best_pos.copy_from_slice(&self.pos);
            }
            return;
        }

        let action = self.order[depth];
        for slot in 0..self.used.len() {
            if self.used[slot] {
                continue;
            }
            let extended = partial + self.placement_cost(action, slot);
            let bound = extended + self.suffix_weight[depth + 1] * self.dmin;
            if bound >= self.best_cost {
                continue;
            }
            self.pos[action] = slot;
            self.used[slot] = true;
            self.dfs(depth + 1, extended);
            self.pos[action] = usize::MAX;
            self.used[slot] = false;
            if self.expired {
                return;
            }
        }
    }

    /// Pairwise cost this placement fixes against already-assigned actions.
    fn placement_cost(&self, action: usize, slot: usize) -> f64 {
        let mut added = 0.0;
        for (other, w) in self.scorer.neighbors(action) {
            if self.pos[other] != usize::MAX {
                added += w * self.scorer.slot_distance(slot, self.pos[other]);
            }
        }
        added
    }
}
