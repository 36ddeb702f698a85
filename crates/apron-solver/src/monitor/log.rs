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
    monitor::search_monitor::SearchMonitor,
    state::SearchState,
    stats::SolverStatistics,
};
use apron_model::{model::Model, solution::Solution};
use std::time::{Duration, Instant};

/// A monitor that prints a periodic progress table to stdout.
///
/// Checking the wall clock on every node would dominate the search loop, so
/// the clock is only consulted when the node counter matches
/// `clock_check_mask`; the mask must be one less than a power of two.
#[derive(Debug, Clone)]
pub struct LogSearchMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
}

impl LogSearchMonitor {
    /// Creates a new `LogSearchMonitor` printing at most one line per
    /// `log_interval`, consulting the clock every `clock_check_mask + 1`
    /// explored nodes.
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        Self {
            start_time: Instant::now(),
            last_log_time: Instant::now(),
            log_interval,
            clock_check_mask,
        }
    }

    #[inline(always)]
    fn print_header(&self) {
        println!(
            "{:<9} | {:<14} | {:<7} | {:<11} | {:<10} | {:<13}",
            "Elapsed", "Nodes", "Depth", "Solutions", "Backtracks", "Pruned"
        );
        println!("{}", "-".repeat(78));
    }

    #[inline(always)]
    fn log_line(&mut self, state: &SearchState, stats: &SolverStatistics) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.start_time).as_secs_f32();
        let elapsed_field = format!("{:.1}s", elapsed);

        println!(
            "{:<9} | {:<14} | {:<7} | {:<11} | {:<10} | {:<13}",
            elapsed_field,
            stats.nodes_explored,
            state.num_bound(),
            stats.solutions_found,
            stats.backtracks,
            stats.prunings_constraint
        );

        self.last_log_time = now;
    }
}

impl Default for LogSearchMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogSearchMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogSearchMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl SearchMonitor for LogSearchMonitor {
    fn name(&self) -> &str {
        "LogSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, _statistics: &SolverStatistics) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        println!(
            "Enumerating {} ({} candidate assignments)",
            model,
            model.complexity()
        );
        self.print_header();
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        println!(
            "Search finished after {:.2?}: {} solutions.",
            self.start_time.elapsed(),
            statistics.solutions_found
        );
    }

    fn on_step(&mut self, _state: &SearchState, _statistics: &SolverStatistics) {}

    fn on_decisions_enqueued(
        &mut self,
        _state: &SearchState,
        _count: usize,
        _statistics: &SolverStatistics,
    ) {
    }

    fn on_descend(&mut self, state: &SearchState, _decision: Decision, stats: &SolverStatistics) {
        if (stats.nodes_explored & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_line(state, stats);
        }
    }

    fn on_backtrack(&mut self, _state: &SearchState, _statistics: &SolverStatistics) {}

    fn on_prune(&mut self, _state: &SearchState, _violated: &str, _statistics: &SolverStatistics) {}

    fn on_solution_found(&mut self, _solution: &Solution, _statistics: &SolverStatistics) {}
}
