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

//! Search monitoring interface.
//!
//! Declares the `SearchMonitor` trait for observing and controlling the
//! enumeration engine. Callbacks track the solver lifecycle, and a monitor
//! can influence execution via `SearchCommand` (default: Continue).
//!
//! Lifecycle highlights
//! - enter → step → {decisions/descend | prune | backtrack} → solution → exit
//! - `SolverStatistics` is provided to every callback for telemetry.
//!
//! Design notes
//! - Methods take `&mut self`; monitors are assumed single-threaded (each
//!   parallel worker builds its own monitor stack over shared atomics).
//! - Keep callbacks lightweight; avoid blocking I/O in hot paths.

use crate::{branching::decision::Decision, state::SearchState, stats::SolverStatistics};
use apron_model::{model::Model, solution::Solution};

/// A cooperative control signal polled by the engine once per loop
/// iteration.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Trait for monitoring and controlling the search process of the engine.
pub trait SearchMonitor {
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called when the search starts.
    fn on_enter_search(&mut self, model: &Model, statistics: &SolverStatistics);

    /// Called when the search ends.
    fn on_exit_search(&mut self, statistics: &SolverStatistics);

    /// Called to determine the next action of the search.
    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &SolverStatistics,
    ) -> SearchCommand {
        SearchCommand::Continue
    }

    /// Called at each step of the search.
    fn on_step(&mut self, state: &SearchState, statistics: &SolverStatistics);

    /// Called when decisions are enqueued for exploration.
    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &SolverStatistics,
    );

    /// Called when descending into a child state.
    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &SolverStatistics);

    /// Called when backtracking to a parent state.
    fn on_backtrack(&mut self, state: &SearchState, statistics: &SolverStatistics);

    /// Called when a branch is discarded. `violated` names the failed
    /// constraint.
    fn on_prune(&mut self, state: &SearchState, violated: &str, statistics: &SolverStatistics);

    /// Called when a new solution is recorded.
    fn on_solution_found(&mut self, solution: &Solution, statistics: &SolverStatistics);
}

impl std::fmt::Debug for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl std::fmt::Display for dyn SearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
