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

use crate::{
    branching::decision::Decision,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    state::SearchState,
    stats::SolverStatistics,
};
use apron_model::{model::Model, solution::Solution};
use std::sync::atomic::{AtomicBool, Ordering};

/// A monitor that observes a shared stop flag.
///
/// The parallel driver hands every worker an `InterruptMonitor` over one
/// shared `AtomicBool`; any party storing `true` (an aborted sibling worker,
/// a signal handler, an embedding application) stops all workers
/// cooperatively at their next step.
#[derive(Debug)]
pub struct InterruptMonitor<'a> {
    stop: &'a AtomicBool,
}

impl<'a> InterruptMonitor<'a> {
    /// Creates a new `InterruptMonitor` observing the given flag.
    #[inline]
    pub fn new(stop: &'a AtomicBool) -> Self {
        Self { stop }
    }
}

impl<'a> SearchMonitor for InterruptMonitor<'a> {
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _model: &Model, _statistics: &SolverStatistics) {}

    fn on_exit_search(&mut self, _statistics: &SolverStatistics) {}

    fn search_command(
        &mut self,
        _state: &SearchState,
        _statistics: &SolverStatistics,
    ) -> SearchCommand {
        if self.stop.load(Ordering::Relaxed) {
            SearchCommand::Terminate("external interrupt".to_string())
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

    fn on_solution_found(&mut self, _solution: &Solution, _statistics: &SolverStatistics) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continues_until_flag_is_set() {
        let stop = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::new(&stop);
        let state = SearchState::new(1, 1);
        let stats = SolverStatistics::default();

        assert_eq!(
            monitor.search_command(&state, &stats),
            SearchCommand::Continue
        );

        stop.store(true, Ordering::Relaxed);
        assert!(matches!(
            monitor.search_command(&state, &stats),
            SearchCommand::Terminate(_)
        ));
    }
}
