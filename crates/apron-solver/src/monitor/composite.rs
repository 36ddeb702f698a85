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

//! Monitoring combinators for the enumeration engine.
//!
//! Provides `CompositeSearchMonitor`, a fan-out monitor that forwards every
//! event to its children. This lets you mix logging, limits, and external
//! interrupts without coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short-circuits on the first non-`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    branching::decision::Decision,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    state::SearchState,
    stats::SolverStatistics,
};
use apron_model::{model::Model, solution::Solution};

/// A search monitor that aggregates multiple monitors and forwards events to
/// all of them. This allows combining different monitoring behaviors into a
/// single monitor.
#[derive(Default)]
pub struct CompositeSearchMonitor<'a> {
    monitors: Vec<Box<dyn SearchMonitor + 'a>>,
}

impl<'a> CompositeSearchMonitor<'a> {
    /// Creates a new empty `CompositeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeSearchMonitor` with the specified capacity.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: SearchMonitor + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns the number of child monitors.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite holds no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Clears all monitors from the composite monitor.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.monitors.clear();
    }
}

impl<'a> SearchMonitor for CompositeSearchMonitor<'a> {
    fn name(&self) -> &str {
        "CompositeSearchMonitor"
    }

    fn on_enter_search(&mut self, model: &Model, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(model, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(
        &mut self,
        state: &SearchState,
        statistics: &SolverStatistics,
    ) -> SearchCommand {
        for monitor in self.monitors.iter_mut() {
            match monitor.search_command(state, statistics) {
                SearchCommand::Continue => continue,
                terminate => return terminate,
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: &SearchState, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step(state, statistics);
        }
    }

    fn on_decisions_enqueued(
        &mut self,
        state: &SearchState,
        count: usize,
        statistics: &SolverStatistics,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_decisions_enqueued(state, count, statistics);
        }
    }

    fn on_descend(&mut self, state: &SearchState, decision: Decision, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_descend(state, decision, statistics);
        }
    }

    fn on_backtrack(&mut self, state: &SearchState, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_backtrack(state, statistics);
        }
    }

    fn on_prune(&mut self, state: &SearchState, violated: &str, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_prune(state, violated, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution, statistics: &SolverStatistics) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_solution_found(solution, statistics);
        }
    }
}
