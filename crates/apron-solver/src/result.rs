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

use crate::stats::SolverStatistics;
use apron_model::solution::SolutionSet;

/// Why the search stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The search tree was fully explored; the solution set is complete.
    Exhausted,
    /// A monitor commanded termination; the solution set may be partial.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the enumeration engine after termination.
///
/// An empty solution set under `Exhausted` is a valid outcome: the instance
/// simply has no feasible assignment. Only under `Aborted` may the set be a
/// strict subset of the complete solution set.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    solutions: SolutionSet,
    termination_reason: TerminationReason,
    statistics: SolverStatistics,
}

impl SolverOutcome {
    /// Creates an outcome for a fully explored search tree.
    #[inline]
    pub fn exhausted(solutions: SolutionSet, statistics: SolverStatistics) -> Self {
        Self {
            solutions,
            termination_reason: TerminationReason::Exhausted,
            statistics,
        }
    }

    /// Creates an outcome for a search aborted by a monitor.
    #[inline]
    pub fn aborted<R>(solutions: SolutionSet, reason: R, statistics: SolverStatistics) -> Self
    where
        R: Into<String>,
    {
        Self {
            solutions,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the enumerated solutions.
    #[inline]
    pub fn solutions(&self) -> &SolutionSet {
        &self.solutions
    }

    /// Consumes the outcome, returning the enumerated solutions.
    #[inline]
    pub fn into_solutions(self) -> SolutionSet {
        self.solutions
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns `true` if the solution set is guaranteed complete.
    #[inline]
    pub fn is_exhaustive(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Exhausted)
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}

impl std::fmt::Display for SolverOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverOutcome(solutions: {}, termination: {})",
            self.solutions.len(),
            self.termination_reason
        )
    }
}
