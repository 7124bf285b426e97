use crate::config::{MetricParams, SearchParams};
use crate::error::{HfResult, HotForgeError};
use crate::geometry::Geometry;
use crate::layout::Layout;
use crate::optimizer::{exact, seed, Replica};
use crate::rotation::Rotation;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const IMPROVE_EPS: f64 = 1e-9;

#[derive(Debug, Clone)]
pub struct SearchBudget {
    pub epochs: usize,
    pub steps_per_epoch: usize,
    pub patience: usize,
    pub temp_start: f64,
    pub cooling: f64,
    pub exact_threshold: usize,
    pub workers: usize,
    pub max_time: Option<Duration>,
}

impl From<&SearchParams> for SearchBudget {
    fn from(params: &SearchParams) -> Self {
        Self {
            epochs: params.search_epochs,
            steps_per_epoch: params.search_steps,
            patience: params.search_patience,
            temp_start: params.temp_start,
            cooling: params.cooling,
            exact_threshold: params.exact_threshold,
            workers: params.workers.unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            }),
            max_time: None,
        }
    }
}

/// A best-cost improvement observed by the winning worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracePoint {
    pub epoch: usize,
    pub cost: f64,
}

#[derive(Debug, Clone)]
pub struct Optimized {
    pub layout: Layout,
    pub cost: f64,
    pub trace: Vec<TracePoint>,
}

struct WorkerOutcome {
    cost: f64,
    pos: Vec<usize>,
    trace: Vec<TracePoint>,
}

/// Searches the action->slot assignment space for the given rotation.
/// Deterministic for a fixed seed: worker `i` owns the RNG stream
/// `seed + i`, and the reduction prefers the lowest worker index on equal
/// cost. The returned cost is never worse than the greedy seed's.
pub fn optimize(
    geometry: &Geometry,
    rotation: &Rotation,
    params: &MetricParams,
    budget: &SearchBudget,
    seed_value: u64,
) -> HfResult<Optimized> {
    let scorer = Arc::new(Scorer::new(geometry.clone(), rotation, params.clone())?);
    let distinct = scorer.action_count();
    let slots = scorer.slot_count();

    if distinct > slots {
        return Err(HotForgeError::Infeasible {
            actions: distinct,
            slots,
        });
    }
    if distinct == 0 {
        return Ok(Optimized {
            layout: Layout::empty(geometry.clone()),
            cost: 0.0,
            trace: Vec::new(),
        });
    }

    let seed_pos = seed::greedy_seed(&scorer);
    let seed_cost = scorer.assignment_cost(&seed_pos);

    // Full-coverage precondition: refuse to search rather than fail mid-run.
    scorer.layout_from_assignment(&seed_pos).validate(rotation)?;

    if distinct <= budget.exact_threshold {
        info!(distinct, slots, seed_cost, "exact branch-and-bound search");
        return run_exact(&scorer, rotation, budget, seed_pos, seed_cost);
    }

    info!(
        distinct,
        slots,
        seed_cost,
        workers = budget.workers,
        "annealing search"
    );
    run_annealing(&scorer, rotation, budget, seed_value, seed_pos, seed_cost)
}

fn run_exact(
    scorer: &Arc<Scorer>,
    rotation: &Rotation,
    budget: &SearchBudget,
    seed_pos: Vec<usize>,
    seed_cost: f64,
) -> HfResult<Optimized> {
    let deadline = budget.max_time.map(|d| Instant::now() + d);
    let (pos, cost) = exact::solve(scorer, &seed_pos, seed_cost, deadline);

    let mut trace = vec![TracePoint {
        epoch: 0,
        cost: seed_cost,
    }];
    if cost < seed_cost - IMPROVE_EPS {
        trace.push(TracePoint { epoch: 1, cost });
    }

    let layout = scorer.layout_from_assignment(&pos);
    layout.validate(rotation)?;
    Ok(Optimized { layout, cost, trace })
}

fn run_annealing(
    scorer: &Arc<Scorer>,
    rotation: &Rotation,
    budget: &SearchBudget,
    seed_value: u64,
    seed_pos: Vec<usize>,
    seed_cost: f64,
) -> HfResult<Optimized> {
    let deadline = budget.max_time.map(|d| Instant::now() + d);
    let slots = scorer.slot_count();
    let distinct = scorer.action_count();
    let workers = budget.workers.max(1);

    let outcomes: Vec<WorkerOutcome> = (0..workers)
        .into_par_iter()
        .map(|worker| {
            let mut rng = fastrand::Rng::with_seed(seed_value.wrapping_add(worker as u64));

            // Worker 0 starts from the greedy seed so the reduction can
            // never return anything worse than it; the rest diversify.
            let start = if worker == 0 {
                seed_pos.clone()
            } else {
                seed::random_seed(&mut rng, slots, distinct)
            };

            let mut replica = Replica::new(
                scorer.clone(),
                start,
                budget.temp_start,
                budget.cooling,
                rng,
            );
            let mut trace = vec![TracePoint {
                epoch: 0,
                cost: replica.best_cost,
            }];
            let mut stall = 0;

            for epoch in 1..=budget.epochs {
                if let Some(limit) = deadline {
                    if Instant::now() >= limit {
                        break;
                    }
                }
                replica.evolve(budget.steps_per_epoch);

                let last = trace.last().map(|t| t.cost).unwrap_or(f64::INFINITY);
                if replica.best_cost < last - IMPROVE_EPS {
                    trace.push(TracePoint {
                        epoch,
                        cost: replica.best_cost,
                    });
                    stall = 0;
                } else {
                    stall += 1;
                    if stall >= budget.patience {
                        break;
                    }
                }
            }

            replica.restore_best();
            let expired = deadline.map_or(false, |limit| Instant::now() >= limit);
            if !expired {
                replica.descend();
            }
            if replica.best_cost < trace.last().map(|t| t.cost).unwrap_or(f64::INFINITY) {
                trace.push(TracePoint {
                    epoch: budget.epochs,
                    cost: replica.best_cost,
                });
            }

            debug!(worker, cost = replica.best_cost, "worker finished");
            WorkerOutcome {
                cost: replica.best_cost,
                pos: replica.best_pos,
                trace,
            }
        })
        .collect();

    // Minimum-selection over the collected results; iteration order is the
    // worker index order, so equal costs keep the lowest index.
    let mut winner: Option<WorkerOutcome> = None;
    for outcome in outcomes {
        if winner.as_ref().map_or(true, |w| outcome.cost < w.cost) {
            winner = Some(outcome);
        }
    }
    let winner = winner.expect("at least one worker must report");

    let layout = scorer.layout_from_assignment(&winner.pos);
    layout.validate(rotation)?;
    Ok(Optimized {
        layout,
        cost: winner.cost,
        trace: winner.trace,
    })
}
