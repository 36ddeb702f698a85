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

//! # Solution Count Monitor
//!
//! A search monitor that tracks the number of solutions discovered using a
//! shared `AtomicU64` counter, and optionally terminates the search when a
//! configured global limit is reached. Multiple monitors can share the same
//! counter to enforce cross-worker limits.
//!
//! ## Motivation
//!
//! In exhaustive enumeration you may want to:
//! - Stop after N solutions for sampling or inspection.
//! - Collect only a bounded set of feasible solutions.
//! - Coordinate termination across the parallel driver's workers.
//!
//! This monitor provides a lightweight, thread-friendly mechanism to do so.
//! Note that bounding the solution count turns the outcome into `Aborted`:
//! the engine no longer guarantees the set is complete.

use crate::{
    branching::decision::Decision,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    state::SearchState,
    stats::SolverStatistics,
};
use apron_model::{model::Model, solution::Solution};
use std::sync::atomic::{AtomicU64, Ordering};

/// A monitor that terminates the search when a specified number of solutions
/// has been found, or continues indefinitely if no limit is set, just
/// updating the shared solution count.
#[derive(Debug)]
pub struct SolutionMonitor<'a> {
    solutions_found: &'a AtomicU64,
    solution_limit: Option<u64>,
}

impl<'a> SolutionMonitor<'a> {
    /// Creates a new `SolutionMonitor`.
    #[inline]
    pub fn new(solutions_found: &'a AtomicU64, solution_limit: Option<u64>) -> Self {
        Self {
            solutions_found,
            solution_limit,
        }
    }

    /// Creates a new `SolutionMonitor` with a specified solution limit.
    #[inline]
    pub fn with_limit(solutions_found: &'a AtomicU64, limit: u64) -> Self {
        Self::new(solutions_found, Some(limit))
    }

    /// Creates a new `SolutionMonitor` without a solution limit.
    #[inline]
    pub fn without_limit(solutions_found: &'a AtomicU64) -> Self {
        Self::new(solutions_found, None)
    }

    /// Checks if the solution limit has been reached.
    #[inline]
    fn reached_limit(&self) -> bool {
        if let Some(limit) = self.solution_limit {
            return self.solutions_found.load(Ordering::Relaxed) >= limit;
        }
        false
    }
}

impl<'a> SearchMonitor for SolutionMonitor<'a> {
    fn name(&self) -> &str {
        "SolutionMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model, _statistics: &SolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &SolverStatistics) {}

    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &SolverStatistics,
    ) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate("global solution limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }

    fn on_step(&mut self, _state: &SearchState, _statistics: &SolverStatistics) {}

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &SolverStatistics,
    ) {
    }

    fn on_descend(
        &mut self,
        _state: &SearchState,
        _decision: Decision,
        _statistics: &SolverStatistics,
    ) {
    }

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &SolverStatistics) {}

    fn on_prune(&mut self, _state: &SearchState, _violated: &str, _statistics: &SolverStatistics) {}

    fn on_solution_found(&mut self, _solution: &Solution, _statistics: &SolverStatistics) {
        self.solutions_found.fetch_add(1, Ordering::Relaxed);
    }
}
