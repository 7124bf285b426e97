pub mod metric;

use crate::config::MetricParams;
use crate::error::{HfResult, HotForgeError};
use crate::geometry::{Geometry, Slot};
use crate::layout::Layout;
use crate::rotation::Rotation;
use std::collections::HashMap;

/// Immutable search tables shared read-only by every worker: the flat
/// slot-pair travel matrix and the rotation's transition weights in CSR
/// form over a dense action index.
pub struct Scorer {
    geometry: Geometry,
    params: MetricParams,

    /// Distinct action ids, dense index = order of first appearance.
    actions: Vec<u32>,

    /// Travel costs, flattened [i * slot_count + j].
    dist: Vec<f64>,

    /// Unordered transition pairs (a < b, summed weight), sorted.
    pairs: Vec<(usize, usize, f64)>,

    // Per-action adjacency rows for the swap delta.
    adj_starts: Vec<usize>,
    adj_others: Vec<u32>,
    adj_weights: Vec<f64>,
}

impl Scorer {
    pub fn new(geometry: Geometry, rotation: &Rotation, params: MetricParams) -> HfResult<Self> {
        if !params.page_switch_weight.is_finite() || params.page_switch_weight < 0.0 {
            return Err(HotForgeError::Validation(format!(
                "page switch weight must be a nonnegative real, got {}",
                params.page_switch_weight
            )));
        }

        let n = geometry.slot_count();
        let mut dist = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                dist[i * n + j] =
                    metric::travel(&geometry, geometry.slot_at(i), geometry.slot_at(j), &params);
            }
        }

        let actions = rotation.distinct();
        let index: HashMap<u32, usize> = actions
            .iter()
            .enumerate()
            .map(|(i, &a)| (a, i))
            .collect();

        // The metric is symmetric, so both traversal directions fold into
        // one unordered pair. Self-adjacencies cost zero under any
        // assignment and are dropped.
        let mut weights: HashMap<(usize, usize), f64> = HashMap::new();
        for pair in rotation.actions().windows(2) {
            let a = index[&pair[0]];
            let b = index[&pair[1]];
            if a != b {
                *weights.entry((a.min(b), a.max(b))).or_insert(0.0) += 1.0;
            }
        }
        let mut pairs: Vec<(usize, usize, f64)> =
            weights.into_iter().map(|((a, b), w)| (a, b, w)).collect();
        pairs.sort_by_key(|&(a, b, _)| (a, b));

        let k = actions.len();
        let mut degree = vec![0usize; k];
        for &(a, b, _) in &pairs {
            degree[a] += 1;
            degree[b] += 1;
        }
        let mut adj_starts = vec![0usize; k + 1];
        for i in 0..k {
            adj_starts[i + 1] = adj_starts[i] + degree[i];
        }
        let mut fill = adj_starts.clone();
        let mut adj_others = vec![0u32; adj_starts[k]];
        let mut adj_weights = vec![0.0; adj_starts[k]];
        for &(a, b, w) in &pairs {
            adj_others[fill[a]] = b as u32;
            adj_weights[fill[a]] = w;
            fill[a] += 1;
            adj_others[fill[b]] = a as u32;
            adj_weights[fill[b]] = w;
            fill[b] += 1;
        }

        Ok(Scorer {
            geometry,
            params,
            actions,
            dist,
            pairs,
            adj_starts,
            adj_others,
            adj_weights,
        })
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn params(&self) -> &MetricParams {
        &self.params
    }

    pub fn slot_count(&self) -> usize {
        self.geometry.slot_count()
    }

    /// Number of distinct actions in the rotation (K).
    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn actions(&self) -> &[u32] {
        &self.actions
    }

    pub fn pairs(&self) -> &[(usize, usize, f64)] {
        &self.pairs
    }

    #[inline(always)]
    pub fn slot_distance(&self, i: usize, j: usize) -> f64 {
        self.dist[i * self.geometry.slot_count() + j]
    }

    /// Total transition weight incident to a dense action.
    pub fn total_weight(&self, action: usize) -> f64 {
        self.adj_weights[self.adj_starts[action]..self.adj_starts[action + 1]]
            .iter()
            .sum()
    }

    /// Adjacency row of a dense action: (other action, pair weight).
    pub fn neighbors(&self, action: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        (self.adj_starts[action]..self.adj_starts[action + 1])
            .map(move |k| (self.adj_others[k] as usize, self.adj_weights[k]))
    }

    /// The QAP objective for a complete dense assignment
    /// (`pos[a]` = slot index of action `a`).
    pub fn assignment_cost(&self, pos: &[usize]) -> f64 {
        let n = self.geometry.slot_count();
        self.pairs
            .iter()
            .map(|&(a, b, w)| w * self.dist[pos[a] * n + pos[b]])
            .sum()
    }

    /// Exact cost change from exchanging the occupants of two slots.
    /// O(deg a + deg b) in the rotation adjacencies touching the moved
    /// actions; the mutual (a,b) term is invariant under a swap of a
    /// symmetric metric and is skipped.
    pub fn swap_delta(
        &self,
        pos: &[usize],
        occupant: &[Option<usize>],
        slot_a: usize,
        slot_b: usize,
    ) -> f64 {
        let occ_a = occupant[slot_a];
        let occ_b = occupant[slot_b];
        let mut delta = 0.0;
        if let Some(a) = occ_a {
            delta += self.move_delta(pos, a, slot_a, slot_b, occ_b);
        }
        if let Some(b) = occ_b {
            delta += self.move_delta(pos, b, slot_b, slot_a, occ_a);
        }
        delta
    }

    #[inline(always)]
    fn move_delta(
        &self,
        pos: &[usize],
        action: usize,
        from: usize,
        to: usize,
        skip: Option<usize>,
    ) -> f64 {
        let n = self.geometry.slot_count();
        let mut delta = 0.0;
        for k in self.adj_starts[action]..self.adj_starts[action + 1] {
            let other = self.adj_others[k] as usize;
            if Some(other) == skip {
                continue;
            }
            let p = pos[other];
            delta += self.adj_weights[k] * (self.dist[to * n + p] - self.dist[from * n + p]);
        }
        delta
    }

    /// Converts a dense assignment back into a Layout over this geometry.
    pub fn layout_from_assignment(&self, pos: &[usize]) -> Layout {
        let mut layout = Layout::empty(self.geometry.clone());
        for (a, &slot_idx) in pos.iter().enumerate() {
            layout.assign(self.geometry.slot_at(slot_idx), Some(self.actions[a]));
        }
        layout
    }
}

/// Full O(N) evaluation: walks consecutive rotation pairs over a Layout.
/// Returns a typed `MissingAssignment` the moment an action resolves to no
/// slot; no partial sum escapes.
pub fn rotation_cost(
    layout: &Layout,
    rotation: &Rotation,
    params: &MetricParams,
) -> HfResult<f64> {
    let geometry = layout.geometry();
    let mut resolved: HashMap<u32, Slot> = HashMap::new();
    for &action in rotation.actions() {
        if !resolved.contains_key(&action) {
            let slot = layout
                .slot_of(action)
                .ok_or(HotForgeError::MissingAssignment { action })?;
            resolved.insert(action, slot);
        }
    }

    let mut total = 0.0;
    for pair in rotation.actions().windows(2) {
        total += metric::travel(geometry, resolved[&pair[0]], resolved[&pair[1]], params);
    }
    Ok(total)
}
