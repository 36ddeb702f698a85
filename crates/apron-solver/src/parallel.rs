// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Root-Partitioned Parallel Enumeration
//!
//! A driver that fans the exhaustive search out over the root variable's
//! domain: one worker per bay value, each enumerating the subtree below
//! that pinned first binding with its own independent solver state. The
//! subtrees are mutually disjoint and jointly cover the whole tree, so the
//! merged result equals the sequential one.
//!
//! ## Shared state
//!
//! - An `AtomicU64` counts solutions globally so a solution limit applies
//!   across all workers.
//! - An `AtomicBool` stop signal lets an aborted worker stop its siblings
//!   cooperatively.
//!
//! ## Ordering
//!
//! Workers discover solutions in an interleaving that depends on
//! scheduling; the driver canonically sorts the merged set before returning
//! so ordering-sensitive consumers observe one total order regardless of
//! how the run was parallelized. An `Exhausted` parallel outcome therefore
//! carries exactly the sequential solution set.

use crate::{
    branching::VariableOrder,
    constraints::ConstraintSet,
    dfs::ExhaustiveSolver,
    fixed::FixedAssignment,
    monitor::{
        composite::CompositeSearchMonitor, interrupt::InterruptMonitor,
        solution::SolutionMonitor, time_limit::TimeLimitMonitor,
    },
    result::{SolverOutcome, TerminationReason},
    state::SearchState,
    stats::SolverStatistics,
};
use apron_model::{index::BayIndex, model::Model, solution::SolutionSet};
use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

/// A parallel enumeration driver partitioning the root variable's domain
/// across scoped threads.
#[derive(Debug, Clone, Default)]
pub struct ParallelSolver {
    solution_limit: Option<u64>,
    time_limit: Option<Duration>,
}

impl ParallelSolver {
    /// Creates a new `ParallelSolver` without limits.
    #[inline]
    pub fn new() -> Self {
        Self {
            solution_limit: None,
            time_limit: None,
        }
    }

    /// Stops all workers once the shared solution count reaches `limit`.
    /// The outcome is then `Aborted` and the set may be partial.
    #[inline]
    pub fn with_solution_limit(mut self, limit: u64) -> Self {
        self.solution_limit = Some(limit);
        self
    }

    /// Stops every worker after the given wall-clock time.
    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Returns the configured solution limit.
    #[inline]
    pub fn solution_limit(&self) -> Option<u64> {
        self.solution_limit
    }

    /// Returns the configured time limit.
    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    /// Enumerates every feasible total assignment of the given model, using
    /// one worker per root bay value.
    pub fn solve<O>(
        &self,
        model: &Model,
        constraints: &ConstraintSet,
        order: &O,
    ) -> SolverOutcome
    where
        O: VariableOrder + Sync,
    {
        let start_time = std::time::Instant::now();

        let stop = AtomicBool::new(false);
        let solutions_found = AtomicU64::new(0);

        let probe = SearchState::new(model.num_aircraft(), model.num_slots());
        let root_variable = match order.next_variable(model, &probe) {
            Some(variable) => variable,
            None => {
                // No variables to branch on; the sequential engine handles
                // the degenerate instance directly.
                let mut monitor = CompositeSearchMonitor::new();
                monitor.add_monitor(InterruptMonitor::new(&stop));
                monitor.add_monitor(SolutionMonitor::new(
                    &solutions_found,
                    self.solution_limit,
                ));
                if let Some(limit) = self.time_limit {
                    monitor.add_monitor(TimeLimitMonitor::new(limit));
                }
                let mut solver =
                    ExhaustiveSolver::preallocated(model.num_bays(), model.num_variables());
                return solver.solve(model, constraints, order, monitor);
            }
        };

        let solution_limit = self.solution_limit;
        let time_limit = self.time_limit;

        let outcomes: Vec<SolverOutcome> = std::thread::scope(|scope| {
            let stop = &stop;
            let solutions_found = &solutions_found;

            let mut handles = Vec::with_capacity(model.num_bays());
            for bay in 0..model.num_bays() {
                handles.push(scope.spawn(move || {
                    let mut monitor = CompositeSearchMonitor::new();
                    monitor.add_monitor(InterruptMonitor::new(stop));
                    monitor.add_monitor(SolutionMonitor::new(solutions_found, solution_limit));
                    if let Some(limit) = time_limit {
                        monitor.add_monitor(TimeLimitMonitor::new(limit));
                    }

                    let mut solver =
                        ExhaustiveSolver::preallocated(model.num_bays(), model.num_variables());
                    let fixed = [FixedAssignment::new(root_variable, BayIndex::new(bay))];
                    let outcome =
                        solver.solve_with_fixed(model, constraints, order, monitor, &fixed);

                    // An aborted worker stops its siblings; exhausting a
                    // subtree is just that worker finishing its share.
                    if !outcome.is_exhaustive() {
                        stop.store(true, Ordering::Relaxed);
                    }

                    outcome
                }));
            }

            handles
                .into_iter()
                .map(|handle| handle.join().expect("enumeration worker thread panicked"))
                .collect()
        });

        let mut solutions = SolutionSet::new();
        let mut statistics = SolverStatistics::default();
        let mut abort_reason: Option<String> = None;

        for outcome in outcomes {
            statistics.merge(outcome.statistics());
            if let TerminationReason::Aborted(reason) = outcome.termination_reason() {
                if abort_reason.is_none() {
                    abort_reason = Some(reason.clone());
                }
            }
            solutions.merge(outcome.into_solutions());
        }

        solutions.sort_canonical();
        statistics.set_total_time(start_time.elapsed());

        match abort_reason {
            Some(reason) => SolverOutcome::aborted(solutions, reason, statistics),
            None => SolverOutcome::exhausted(solutions, statistics),
        }
    }
}
