pub mod exact;
pub mod runner;
pub mod seed;

use crate::scorer::Scorer;
use std::sync::Arc;

const IMPROVE_EPS: f64 = 1e-9;

/// One independent annealing trajectory. Owns its candidate assignment and
/// RNG exclusively; only the Scorer tables are shared, read-only.
pub struct Replica {
    pub scorer: Arc<Scorer>,

    /// Dense assignment: action index -> slot index.
    pub pos: Vec<usize>,
    /// Inverse view: slot index -> occupying action.
    pub occupant: Vec<Option<usize>>,
    pub cost: f64,

    pub best_pos: Vec<usize>,
    pub best_cost: f64,

    pub temperature: f64,
    pub cooling: f64,
    pub rng: fastrand::Rng,
}

impl Replica {
    pub fn new(
        scorer: Arc<Scorer>,
        pos: Vec<usize>,
        temperature: f64,
        cooling: f64,
        rng: fastrand::Rng,
    ) -> Self {
        let occupant = seed::build_occupancy(&pos, scorer.slot_count());
        let cost = scorer.assignment_cost(&pos);
        Replica {
            scorer,
            best_pos: pos.clone(),
            best_cost: cost,
            pos,
            occupant,
            cost,
            temperature,
            cooling,
            rng,
        }
    }

    /// Attempts `steps` random two-slot exchanges under the Metropolis
    /// criterion, then cools. Returns the number of accepted moves.
    pub fn evolve(&mut self, steps: usize) -> usize {
        let n = self.scorer.slot_count();
        let mut accepted = 0;

        for _ in 0..steps {
            let slot_a = self.rng.usize(0..n);
            let slot_b = self.rng.usize(0..n);
            if slot_a == slot_b {
                continue;
            }
            if self.occupant[slot_a].is_none() && self.occupant[slot_b].is_none() {
                continue;
            }

            let delta = self
                .scorer
                .swap_delta(&self.pos, &self.occupant, slot_a, slot_b);

            if delta < 0.0 || self.rng.f64() < (-delta / self.temperature).exp() {
                self.apply_swap(slot_a, slot_b, delta);
                accepted += 1;
                if self.cost < self.best_cost - IMPROVE_EPS {
                    self.best_cost = self.cost;
                    self.best_pos.copy_from_slice(&self.pos);
                }
            }
        }

        self.temperature *= self.cooling;
        accepted
    }

    fn apply_swap(&mut self, slot_a: usize, slot_b: usize, delta: f64) {
        let occ_a = self.occupant[slot_a];
        let occ_b = self.occupant[slot_b];
        self.occupant[slot_a] = occ_b;
        self.occupant[slot_b] = occ_a;
        if let Some(a) = occ_a {
            self.pos[a] = slot_b;
        }
        if let Some(b) = occ_b {
            self.pos[b] = slot_a;
        }
        self.cost += delta;
    }

    /// Rewinds the working state to the best assignment seen so far.
    pub fn restore_best(&mut self) {
        self.pos.copy_from_slice(&self.best_pos);
        self.occupant = seed::build_occupancy(&self.pos, self.scorer.slot_count());
        self.cost = self.best_cost;
    }

    /// Steepest-descent 2-opt polish: applies the best strictly improving
    /// swap until none remains. Rescores from the tables first so the
    /// incremental drift of a long annealing run cannot accumulate.
    pub fn descend(&mut self) {
        self.cost = self.scorer.assignment_cost(&self.pos);
        let n = self.scorer.slot_count();
        loop {
            let mut best_move: Option<(usize, usize, f64)> = None;
            for slot_a in 0..n {
                for slot_b in (slot_a + 1)..n {
                    if self.occupant[slot_a].is_none() && self.occupant[slot_b].is_none() {
                        continue;
                    }
                    let delta = self
                        .scorer
                        .swap_delta(&self.pos, &self.occupant, slot_a, slot_b);
                    if delta < best_move.map_or(-IMPROVE_EPS, |(_, _, d)| d) {
                        best_move = Some((slot_a, slot_b, delta));
                    }
                }
            }
            match best_move {
                Some((slot_a, slot_b, delta)) => self.apply_swap(slot_a, slot_b, delta),
                None => break,
            }
        }
        if self.cost <= self.best_cost {
            self.best_cost = self.cost;
            self.best_pos.copy_from_slice(&self.pos);
        }
    }
}
