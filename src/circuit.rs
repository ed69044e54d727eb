//! Circuit optimization over the distance matrix.
//!
//! The model picks a visiting order and an approach side per stop: `order`
//! is a permutation of the stops anchored at the depot, `side` selects the
//! Down/Up vertex of each visited site, and the objective is the sum of the
//! matrix legs around the closed walk. A mirror traversal costs the same,
//! so only the direction with `order[1] > order[last]` is searched.
//!
//! Solving is expressed as a capability so the same model can be handed to
//! any backend able to prove optimality; the built-in backend is an exact
//! depth-first branch-and-bound.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::connector::Side;
use crate::matrix::{vertex_index, DistanceMatrix};

/// The order+side model over a distance matrix.
#[derive(Debug, Clone, Copy)]
pub struct CircuitModel<'a> {
    matrix: &'a DistanceMatrix,
}

impl<'a> CircuitModel<'a> {
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        self.matrix
    }

    /// Number of sites to visit (stops minus the depot).
    pub fn site_count(&self) -> usize {
        self.matrix.site_count()
    }

    /// Number of steps in the circuit, depot included.
    pub fn steps(&self) -> usize {
        self.site_count() + 1
    }

    /// Cost of moving between two step assignments.
    pub fn leg_cost(&self, from: (usize, Side), to: (usize, Side)) -> i64 {
        self.matrix
            .get(vertex_index(from.0, from.1), vertex_index(to.0, to.1))
    }

    /// Per-leg costs and total of a complete assignment, wrapping back to
    /// the first step.
    pub fn assignment_cost(&self, order: &[usize], sides: &[Side]) -> (Vec<i64>, i64) {
        let steps = order.len();
        let mut legs = Vec::with_capacity(steps);
        let mut total = 0;
        for i in 0..steps {
            let j = (i + 1) % steps;
            let cost = self.leg_cost((order[i], sides[i]), (order[j], sides[j]));
            legs.push(cost);
            total += cost;
        }
        (legs, total)
    }
}

/// A proven-optimal assignment of the circuit model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitAssignment {
    /// `order[i]` is the stop visited at step `i`; `order[0]` is the depot.
    pub order: Vec<usize>,
    /// Approach side per step; `sides[0]` is always `Up`.
    pub sides: Vec<Side>,
    /// Scaled leg costs, `legs[i]` covering step `i` to step `i + 1`
    /// (wrapping).
    pub legs: Vec<i64>,
    /// Objective value at the matrix scale.
    pub total: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Wall-clock budget for the solve; `None` means unbounded.
    pub deadline: Option<Duration>,
}

/// Result of a solve attempt. `Infeasible` means no circuit exists (an
/// upstream data problem for a complete matrix); `DeadlineExceeded` means
/// optimality was not proven in time. Both are outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    Solved(CircuitAssignment),
    Infeasible,
    DeadlineExceeded,
}

/// Capability of solving the circuit model to proven optimality.
pub trait CircuitBackend {
    fn solve(&self, model: &CircuitModel<'_>, options: &SolveOptions) -> SolveOutcome;
}

/// Exact depth-first search with partial-cost pruning.
///
/// Legs are non-negative, so the cost of a partial walk is a lower bound on
/// every completion and branches at or above the incumbent are cut.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchAndBound;

impl CircuitBackend for BranchAndBound {
    fn solve(&self, model: &CircuitModel<'_>, options: &SolveOptions) -> SolveOutcome {
        let steps = model.steps();
        let mut search = Search {
            model,
            deadline: options.deadline.map(|budget| Instant::now() + budget),
            best_total: i64::MAX,
            best: None,
            order: vec![0; steps],
            sides: vec![Side::Up; steps],
            used: vec![false; steps],
            nodes: 0,
            out_of_time: false,
        };
        search.used[0] = true;
        search.dfs(1, 0, 0);

        debug!(nodes = search.nodes, "circuit search finished");
        if search.out_of_time {
            return SolveOutcome::DeadlineExceeded;
        }
        match search.best {
            Some((order, sides)) => {
                let (legs, total) = model.assignment_cost(&order, &sides);
                info!(total, steps, "optimal circuit found");
                SolveOutcome::Solved(CircuitAssignment {
                    order,
                    sides,
                    legs,
                    total,
                })
            }
            None => SolveOutcome::Infeasible,
        }
    }
}

struct Search<'a> {
    model: &'a CircuitModel<'a>,
    deadline: Option<Instant>,
    best_total: i64,
    best: Option<(Vec<usize>, Vec<Side>)>,
    order: Vec<usize>,
    sides: Vec<Side>,
    used: Vec<bool>,
    nodes: u64,
    out_of_time: bool,
}

impl Search<'_> {
    fn dfs(&mut self, depth: usize, prev_vertex: usize, cost: i64) {
        if self
            .deadline
            .is_some_and(|deadline| Instant::now() >= deadline)
        {
            self.out_of_time = true;
            return;
        }
        self.nodes += 1;

        let n = self.model.site_count();
        if depth > n {
            let total = cost + self.model.matrix().get(prev_vertex, 0);
            if total < self.best_total {
                self.best_total = total;
                self.best = Some((self.order.clone(), self.sides.clone()));
            }
            return;
        }

        for stop in 1..=n {
            if self.used[stop] {
                continue;
            }
            // Mirror elimination: the first visited stop must outrank the
            // last one. Skipped for a single site, where it would forbid
            // the only circuit.
            if n >= 2 && depth == n && stop >= self.order[1] {
                continue;
            }
            for side in Side::BOTH {
                let vertex = vertex_index(stop, side);
                let next_cost = cost + self.model.matrix().get(prev_vertex, vertex);
                if next_cost >= self.best_total {
                    continue;
                }
                self.used[stop] = true;
                self.order[depth] = stop;
                self.sides[depth] = side;
                self.dfs(depth + 1, vertex, next_cost);
                self.used[stop] = false;
                if self.out_of_time {
                    return;
                }
            }
        }
    }
}
