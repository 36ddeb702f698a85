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

use std::time::Duration;

/// Statistics collected during the execution of the enumeration engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Total nodes visited.
    pub nodes_explored: u64,
    /// Total frames unwound (dead-ends, exhausted levels, and recorded
    /// solutions all backtrack).
    pub backtracks: u64,
    /// Total branching decisions enqueued.
    pub decisions_generated: u64,
    /// The deepest level reached in the tree.
    pub max_depth: u64,
    /// Total constraint predicate evaluations.
    pub constraint_checks: u64,
    /// Branches discarded because a constraint predicate failed.
    pub prunings_constraint: u64,
    /// Total solutions recorded during the search.
    pub solutions_found: u64,
    /// Total time spent in the solver.
    pub time_total: Duration,
}

impl SolverStatistics {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_decisions_generated(&mut self, count: usize) {
        self.decisions_generated = self.decisions_generated.saturating_add(count as u64);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_constraint_check(&mut self) {
        self.constraint_checks = self.constraint_checks.saturating_add(1);
    }

    #[inline]
    pub fn on_pruning_constraint(&mut self) {
        self.prunings_constraint = self.prunings_constraint.saturating_add(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Folds another run's counters into this one.
    ///
    /// Counters are summed, the maximum depth is maxed, and the time is
    /// maxed (parallel workers run concurrently; the driver overwrites the
    /// merged time with the observed wall time afterwards).
    pub fn merge(&mut self, other: &SolverStatistics) {
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.decisions_generated = self
            .decisions_generated
            .saturating_add(other.decisions_generated);
        self.max_depth = self.max_depth.max(other.max_depth);
        self.constraint_checks = self
            .constraint_checks
            .saturating_add(other.constraint_checks);
        self.prunings_constraint = self
            .prunings_constraint
            .saturating_add(other.prunings_constraint);
        self.solutions_found = self.solutions_found.saturating_add(other.solutions_found);
        self.time_total = self.time_total.max(other.time_total);
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Apron Solver Statistics:")?;
        writeln!(f, "  Nodes explored:        {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:            {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:     {}", self.max_depth)?;
        writeln!(f, "  Decisions generated:   {}", self.decisions_generated)?;
        writeln!(f, "  Constraint checks:     {}", self.constraint_checks)?;
        writeln!(f, "  Prunings (constraint): {}", self.prunings_constraint)?;
        writeln!(f, "  Solutions found:       {}", self.solutions_found)?;
        writeln!(f, "  Total time:            {:.2?}", self.time_total)?;
        Ok(())
    }
}
