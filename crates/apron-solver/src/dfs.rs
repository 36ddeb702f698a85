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

//! Exhaustive depth-first enumeration of feasible bay assignments.
//!
//! This module implements a stateful search engine that explores every
//! total assignment of aircraft to bays over the planning horizon and
//! records each one that satisfies all constraints. The `ExhaustiveSolver`
//! manages reusable internal structures and accepts fixed assignments when
//! solving pinned variants of the model (the parallel driver's workers each
//! pin the root variable to one bay). A preallocation path minimizes memory
//! churn across repeated solves, and a fast `reset` keeps capacities while
//! clearing per-run state.
//!
//! Unlike a branch-and-bound optimizer there is no incumbent and no bound:
//! completeness of the returned solution set requires visiting every branch
//! a constraint does not rule out, so the only pruning is constraint
//! violation and the search never exits early on a solution. A search
//! session object encapsulates per-run state, statistics, and timing,
//! enabling reproducible and debuggable runs. The design emphasizes
//! determinism under a fixed variable order, internal consistency at
//! backtrack points, and end-state cleanliness after each solve.

use crate::{
    branching::{decision::Decision, VariableOrder},
    constraints::ConstraintSet,
    fixed::FixedAssignment,
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    result::{SolverOutcome, TerminationReason},
    stack::SearchStack,
    state::SearchState,
    stats::SolverStatistics,
    trail::SearchTrail,
};
use apron_model::{
    index::{AircraftIndex, BayIndex, SlotIndex, VariableIndex},
    model::Model,
    solution::{Solution, SolutionSet},
};

/// An exhaustive constraint solver for the bay allocation problem using a
/// backtracking search algorithm with scope-triggered constraint checks.
/// Note that this is just the execution engine; the selection of the next
/// variable is delegated to a `VariableOrder` and the rules to a
/// `ConstraintSet`.
#[derive(Clone, Debug, Default)]
pub struct ExhaustiveSolver {
    trail: SearchTrail,
    stack: SearchStack,
}

impl ExhaustiveSolver {
    /// Creates a new solver instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            stack: SearchStack::new(),
        }
    }

    /// Creates a new solver instance with preallocated storage for the
    /// given number of bays and assignment variables.
    ///
    /// # Note
    ///
    /// When you invoke the solver it will internally ensure that the trail
    /// and stack have sufficient capacity for the given model. Constructing
    /// the solver with preallocated storage only moves the cost of the
    /// memory allocations to the construction time of the solver.
    #[inline]
    pub fn preallocated(num_bays: usize, num_variables: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_variables),
            stack: SearchStack::preallocated(num_bays, num_variables),
        }
    }

    /// Enumerates every feasible total assignment of the given model.
    #[inline]
    pub fn solve<O, M>(
        &mut self,
        model: &Model,
        constraints: &ConstraintSet,
        order: &O,
        monitor: M,
    ) -> SolverOutcome
    where
        O: VariableOrder,
        M: SearchMonitor,
    {
        self.solve_with_fixed(model, constraints, order, monitor, &[])
    }

    /// Enumerates every feasible total assignment that extends the given
    /// fixed assignments.
    ///
    /// Fixed assignments that violate a constraint whose scope they
    /// complete yield an empty solution set, not an error.
    pub fn solve_with_fixed<O, M>(
        &mut self,
        model: &Model,
        constraints: &ConstraintSet,
        order: &O,
        mut monitor: M,
        fixed: &[FixedAssignment],
    ) -> SolverOutcome
    where
        O: VariableOrder,
        M: SearchMonitor,
    {
        let session =
            SearchSession::new(self, model, constraints, order, &mut monitor, fixed);
        let outcome = session.run();
        self.reset();
        outcome
    }

    /// Resets the internal state of the solver, clearing any stored trail
    /// and stack information.
    ///
    /// # Note
    ///
    /// This does not deallocate any memory used by the trail or stack, but
    /// only resets their logical state.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.stack.reset();
    }

    #[cfg(test)]
    fn trail(&self) -> &SearchTrail {
        &self.trail
    }

    #[cfg(test)]
    fn stack(&self) -> &SearchStack {
        &self.stack
    }
}

/// A search session for the enumeration engine.
/// This struct encapsulates the state and logic of a single search run.
struct SearchSession<'a, O, M>
where
    O: VariableOrder,
    M: SearchMonitor,
{
    solver: &'a mut ExhaustiveSolver,
    model: &'a Model,
    constraints: &'a ConstraintSet,
    order: &'a O,
    monitor: &'a mut M,
    fixed: &'a [FixedAssignment],
    state: SearchState,
    solutions: SolutionSet,
    stats: SolverStatistics,
    start_time: std::time::Instant,
}

impl<'a, O, M> SearchSession<'a, O, M>
where
    O: VariableOrder,
    M: SearchMonitor,
{
    /// Creates a new search session.
    #[inline]
    fn new(
        solver: &'a mut ExhaustiveSolver,
        model: &'a Model,
        constraints: &'a ConstraintSet,
        order: &'a O,
        monitor: &'a mut M,
        fixed: &'a [FixedAssignment],
    ) -> Self {
        let state = SearchState::new(model.num_aircraft(), model.num_slots());

        Self {
            solver,
            model,
            constraints,
            order,
            monitor,
            fixed,
            state,
            solutions: SolutionSet::new(),
            stats: SolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the search session.
    #[inline]
    fn run(mut self) -> SolverOutcome {
        self.monitor.on_enter_search(self.model, &self.stats);

        // Initialize the search. It will return false if the fixed
        // assignments already violate a fully bound scope.
        if !self.initialize() {
            return self.finalize(TerminationReason::Exhausted);
        }

        let termination_reason = loop {
            self.monitor.on_step(&self.state, &self.stats);

            if let SearchCommand::Terminate(msg) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                break TerminationReason::Aborted(msg);
            }

            if self.solver.stack.is_current_level_empty() {
                if self.solver.stack.depth() <= 1 {
                    break TerminationReason::Exhausted;
                }
                self.backtrack_step();
            } else {
                self.process_next_decision();
            }
        };

        self.finalize(termination_reason)
    }

    /// Finalizes the solver result based on the enumerated solutions and
    /// the termination reason.
    ///
    /// # Note
    ///
    /// This consumes self.
    #[inline]
    fn finalize(mut self, reason: TerminationReason) -> SolverOutcome {
        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        match reason {
            TerminationReason::Exhausted => SolverOutcome::exhausted(self.solutions, self.stats),
            TerminationReason::Aborted(msg) => {
                SolverOutcome::aborted(self.solutions, msg, self.stats)
            }
        }
    }

    /// Initializes the search session.
    ///
    /// This applies the fixed assignments, verifies every scope they
    /// complete, sets up the root trail and stack frames, makes sure enough
    /// memory is allocated to *not* resize during the search, and pushes
    /// the first decisions onto the stack.
    #[inline]
    fn initialize(&mut self) -> bool {
        self.solver.trail.ensure_capacity(self.model.num_variables());
        self.solver
            .stack
            .ensure_capacity(self.model.num_bays(), self.model.num_variables());

        for assignment in self.fixed.iter() {
            let (variable, bay) = (assignment.variable, assignment.bay);

            debug_assert!(
                variable.get() < self.model.num_variables(),
                "called `SearchSession::initialize` with fixed variable index out of bounds: the len is {} but the index is {}",
                self.model.num_variables(),
                variable.get()
            );
            debug_assert!(
                bay.get() < self.model.num_bays(),
                "called `SearchSession::initialize` with fixed bay index out of bounds: the len is {} but the index is {}",
                self.model.num_bays(),
                bay.get()
            );
            debug_assert!(
                !self.state.is_bound(variable),
                "called `SearchSession::initialize` with already fixed variable: {}",
                variable
            );

            self.state.bind(variable, bay);
        }

        // Verify every scope the fixed assignments completed.
        for aircraft in 0..self.model.num_aircraft() {
            let aircraft = AircraftIndex::new(aircraft);
            if self.state.is_aircraft_complete(aircraft)
                && !self.check_aircraft_scope(aircraft)
            {
                return false;
            }
        }
        for slot in 0..self.model.num_slots() {
            let slot = SlotIndex::new(slot);
            if self.state.is_slot_complete(slot) && !self.check_slot_scope(slot) {
                return false;
            }
        }

        if self.state.is_complete() {
            self.record_solution();
        }

        // Root frame. Crucial to have this before pushing decisions!
        self.solver.trail.push_frame();
        self.solver.stack.push_frame();
        self.stats.on_node_explored();

        self.enqueue_decisions();

        true
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);

        self.solver.trail.backtrack(&mut self.state);
        self.solver.stack.pop_frame();
    }

    /// Processes the next decision from the stack.
    ///
    /// # Panics
    ///
    /// In debug builds, this function will panic if called when the current
    /// decision stack level is empty.
    #[inline]
    fn process_next_decision(&mut self) {
        debug_assert!(
            !self.solver.stack.is_current_level_empty(),
            "called `SearchSession::process_next_decision` with empty decision stack"
        );

        let decision = match self.solver.stack.pop() {
            Some(decision) => decision,
            None => return,
        };

        self.descend(decision);
    }

    /// Descends into the child state produced by the given decision.
    #[inline]
    fn descend(&mut self, decision: Decision) {
        self.solver.trail.push_frame();
        self.solver
            .trail
            .apply_assignment(&mut self.state, decision.variable(), decision.bay());
        self.solver.stack.push_frame();

        self.stats.on_node_explored();
        self.stats.on_depth_update(self.solver.stack.depth() as u64);
        self.monitor.on_descend(&self.state, decision, &self.stats);

        if let Some(violated) = self.violated_constraint(decision.variable()) {
            self.stats.on_pruning_constraint();
            self.monitor.on_prune(&self.state, violated, &self.stats);
            self.backtrack_step();
            return;
        }

        if self.state.is_complete() {
            // Record and return; the now-empty level backtracks on the next
            // loop iteration, continuing the enumeration.
            self.record_solution();
            return;
        }

        self.enqueue_decisions();
    }

    /// Evaluates every constraint whose scope the given binding completed,
    /// returning the name of the first violated one.
    ///
    /// One binding can complete both its aircraft's scope and its slot's
    /// scope; both triggers are checked.
    #[inline]
    fn violated_constraint(&mut self, variable: VariableIndex) -> Option<&'a str> {
        let constraints = self.constraints;

        let aircraft = self.model.aircraft_of(variable);
        if self.state.is_aircraft_complete(aircraft) {
            for constraint in constraints.for_aircraft(aircraft) {
                self.stats.on_constraint_check();
                if !constraint.is_satisfied(self.model, &self.state) {
                    return Some(constraint.name());
                }
            }
        }

        let slot = self.model.slot_of(variable);
        if self.state.is_slot_complete(slot) {
            for constraint in constraints.for_slot(slot) {
                self.stats.on_constraint_check();
                if !constraint.is_satisfied(self.model, &self.state) {
                    return Some(constraint.name());
                }
            }
        }

        None
    }

    /// Runs the aircraft-scoped constraints of one aircraft, counting
    /// checks and prune events. Used for scopes completed by fixed
    /// assignments.
    fn check_aircraft_scope(&mut self, aircraft: AircraftIndex) -> bool {
        for constraint in self.constraints.for_aircraft(aircraft) {
            self.stats.on_constraint_check();
            if !constraint.is_satisfied(self.model, &self.state) {
                self.stats.on_pruning_constraint();
                self.monitor
                    .on_prune(&self.state, constraint.name(), &self.stats);
                return false;
            }
        }
        true
    }

    /// Runs the slot-scoped constraints of one slot, counting checks and
    /// prune events. Used for scopes completed by fixed assignments.
    fn check_slot_scope(&mut self, slot: SlotIndex) -> bool {
        for constraint in self.constraints.for_slot(slot) {
            self.stats.on_constraint_check();
            if !constraint.is_satisfied(self.model, &self.state) {
                self.stats.on_pruning_constraint();
                self.monitor
                    .on_prune(&self.state, constraint.name(), &self.stats);
                return false;
            }
        }
        true
    }

    /// Enqueues one decision per bay for the next unbound variable, in
    /// reverse bay order so they pop in ascending order.
    #[inline]
    fn enqueue_decisions(&mut self) {
        let variable = match self.order.next_variable(self.model, &self.state) {
            Some(variable) => variable,
            None => return,
        };

        let num_bays = self.model.num_bays();
        let count_before = self.solver.stack.num_entries();
        self.solver.stack.extend(
            (0..num_bays)
                .rev()
                .map(|bay| Decision::new(variable, BayIndex::new(bay))),
        );
        let added = self.solver.stack.num_entries() - count_before;

        self.stats.on_decisions_generated(added);
        self.monitor
            .on_decisions_enqueued(&self.state, added, &self.stats);
    }

    /// Records the current (complete) state as a solution.
    #[inline]
    fn record_solution(&mut self) {
        if let Ok(solution) = Solution::try_from(&self.state) {
            self.stats.on_solution_found();
            self.monitor.on_solution_found(&solution, &self.stats);
            self.solutions.push(solution);
        } else {
            self.stats.on_pruning_constraint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        branching::{aircraft_major::AircraftMajorOrder, slot_major::SlotMajorOrder},
        monitor::{no_op::NoOperationMonitor, solution::SolutionMonitor},
    };
    use apron_model::{
        layout::{AircraftKind, BayCategory, Restriction},
        model::ModelBuilder,
    };
    use std::sync::atomic::AtomicU64;

    fn a(i: usize) -> AircraftIndex {
        AircraftIndex::new(i)
    }

    fn t(i: usize) -> SlotIndex {
        SlotIndex::new(i)
    }

    fn b(i: usize) -> BayIndex {
        BayIndex::new(i)
    }

    fn enumerate(model: &Model) -> SolverOutcome {
        let constraints = ConstraintSet::standard(model);
        let mut solver = ExhaustiveSolver::new();
        solver.solve(
            model,
            &constraints,
            &AircraftMajorOrder,
            NoOperationMonitor::new(),
        )
    }

    #[test]
    fn test_single_aircraft_single_slot_unique_solution() {
        // 1x2 grid: (0,0) standard, (0,1) parking. One aircraft with one
        // type-1 task can only stand in the workshop.
        let mut builder = ModelBuilder::new(1, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        assert!(outcome.is_exhaustive());
        assert_eq!(outcome.solutions().len(), 1);
        assert_eq!(
            outcome.solutions().get(0).unwrap().bay_for(a(0), t(0)),
            b(0)
        );
        assert_eq!(outcome.statistics().solutions_found, 1);
    }

    #[test]
    fn test_workshopless_apron_has_no_solutions() {
        // Same aircraft, but the only declared bay is a parking position.
        let mut builder = ModelBuilder::new(1, 1, 2);
        builder
            .add_bay(0, 1, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        assert!(outcome.is_exhaustive());
        assert!(outcome.solutions().is_empty());
    }

    #[test]
    fn test_two_jumbos_on_a_two_bay_strip_are_infeasible() {
        // Both bays specialized, single slot: sharing a bay violates
        // capacity, adjacent bays violate separation and maneuverability.
        let mut builder = ModelBuilder::new(1, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Specialized)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_aircraft(AircraftKind::Jumbo, Restriction::None, 0, 0)
            .add_aircraft(AircraftKind::Jumbo, Restriction::None, 0, 0);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        assert!(outcome.is_exhaustive());
        assert!(outcome.solutions().is_empty());
    }

    #[test]
    fn test_zero_task_aircraft_may_stand_anywhere() {
        // 1x3 strip, one idle aircraft, one slot: every bay is feasible.
        let mut builder = ModelBuilder::new(1, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(0, 2, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        assert_eq!(outcome.solutions().len(), 3);

        let found: Vec<usize> = outcome
            .solutions()
            .iter()
            .map(|solution| solution.bay_for(a(0), t(0)).get())
            .collect();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn test_empty_fleet_yields_one_empty_solution() {
        let mut builder = ModelBuilder::new(2, 1, 1);
        builder.add_bay(0, 0, BayCategory::Standard);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        assert!(outcome.is_exhaustive());
        assert_eq!(outcome.solutions().len(), 1);
        assert_eq!(outcome.solutions().get(0).unwrap().num_aircraft(), 0);
    }

    #[test]
    fn test_ordered_aircraft_must_finish_type2_first() {
        // 1x3 strip: standard, specialized, parking. Two slots, one ordered
        // aircraft with one type-1 and one type-2 task. The aircraft must
        // open in the specialized bay; the second slot may be either
        // workshop (type-1 work runs in both kinds), never parking.
        let mut builder = ModelBuilder::new(2, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(0, 2, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::Ordered, 1, 1);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        assert_eq!(outcome.solutions().len(), 2);
        for solution in outcome.solutions().iter() {
            assert_eq!(solution.bay_for(a(0), t(0)), b(1));
        }
        assert_eq!(outcome.solutions().get(0).unwrap().bay_for(a(0), t(1)), b(0));
        assert_eq!(outcome.solutions().get(1).unwrap().bay_for(a(0), t(1)), b(1));
    }

    #[test]
    fn test_both_variable_orders_enumerate_the_same_set() {
        let mut builder = ModelBuilder::new(2, 2, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(1, 0, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0)
            .add_aircraft(AircraftKind::Jumbo, Restriction::None, 0, 1);
        let model = builder.build().unwrap();
        let constraints = ConstraintSet::standard(&model);

        let mut solver = ExhaustiveSolver::new();
        let mut by_aircraft = solver
            .solve(
                &model,
                &constraints,
                &AircraftMajorOrder,
                NoOperationMonitor::new(),
            )
            .into_solutions();
        let mut by_slot = solver
            .solve(
                &model,
                &constraints,
                &SlotMajorOrder,
                NoOperationMonitor::new(),
            )
            .into_solutions();

        by_aircraft.sort_canonical();
        by_slot.sort_canonical();
        assert_eq!(by_aircraft, by_slot);
    }

    #[test]
    fn test_idempotent_re_solve_same_solution_set() {
        let mut builder = ModelBuilder::new(2, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(0, 2, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();
        let constraints = ConstraintSet::standard(&model);

        let mut solver = ExhaustiveSolver::new();
        let first = solver
            .solve(
                &model,
                &constraints,
                &AircraftMajorOrder,
                NoOperationMonitor::new(),
            )
            .into_solutions();
        let second = solver
            .solve(
                &model,
                &constraints,
                &AircraftMajorOrder,
                NoOperationMonitor::new(),
            )
            .into_solutions();

        // Same members in the same order, without any canonical re-sort.
        assert_eq!(first, second);
    }

    #[test]
    fn test_backtracking_invariants_after_solve() {
        let mut builder = ModelBuilder::new(2, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
        let model = builder.build().unwrap();
        let constraints = ConstraintSet::standard(&model);

        let mut solver = ExhaustiveSolver::preallocated(model.num_bays(), model.num_variables());
        let outcome = solver.solve(
            &model,
            &constraints,
            &AircraftMajorOrder,
            NoOperationMonitor::new(),
        );
        assert!(outcome.is_exhaustive());

        // End-state: trail and stack must be reset and empty.
        assert_eq!(solver.trail().num_entries(), 0);
        assert_eq!(solver.trail().depth(), 0);
        assert_eq!(solver.stack().num_entries(), 0);
        assert_eq!(solver.stack().depth(), 0);

        // Memory accounting should be non-zero after preallocation.
        assert!(solver.trail().allocated_memory_bytes() > 0);
        assert!(solver.stack().allocated_memory_bytes() > 0);
    }

    #[test]
    fn test_fixed_assignment_pins_the_subtree() {
        // One idle aircraft on a 1x3 strip with two slots; pin slot 0 to
        // bay 1 and check every solution honors the pin.
        let mut builder = ModelBuilder::new(2, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Standard)
            .add_bay(0, 2, BayCategory::Standard)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();
        let constraints = ConstraintSet::standard(&model);

        let mut solver = ExhaustiveSolver::new();
        let fixed = [FixedAssignment::for_aircraft_slot(&model, a(0), t(0), b(1))];
        let pinned = solver
            .solve_with_fixed(
                &model,
                &constraints,
                &AircraftMajorOrder,
                NoOperationMonitor::new(),
                &fixed,
            )
            .into_solutions();

        assert_eq!(pinned.len(), 3);
        for solution in pinned.iter() {
            assert_eq!(solution.bay_for(a(0), t(0)), b(1));
        }

        let full = solver
            .solve(
                &model,
                &constraints,
                &AircraftMajorOrder,
                NoOperationMonitor::new(),
            )
            .into_solutions();
        assert_eq!(full.len(), 9);
    }

    #[test]
    fn test_infeasible_fixed_assignment_yields_empty_set() {
        // Pinning the working aircraft onto the parking bay kills the only
        // candidate before the search starts.
        let mut builder = ModelBuilder::new(1, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
        let model = builder.build().unwrap();
        let constraints = ConstraintSet::standard(&model);

        let mut solver = ExhaustiveSolver::new();
        let fixed = [FixedAssignment::new(VariableIndex::new(0), b(1))];
        let outcome = solver.solve_with_fixed(
            &model,
            &constraints,
            &AircraftMajorOrder,
            NoOperationMonitor::new(),
            &fixed,
        );

        assert!(outcome.is_exhaustive());
        assert!(outcome.solutions().is_empty());
    }

    #[test]
    fn test_solution_limit_aborts_with_partial_set() {
        // One idle aircraft, one slot, three bays: three solutions exist,
        // the limit stops the search after two.
        let mut builder = ModelBuilder::new(1, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Standard)
            .add_bay(0, 2, BayCategory::Standard)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();
        let constraints = ConstraintSet::standard(&model);

        let counter = AtomicU64::new(0);
        let mut solver = ExhaustiveSolver::new();
        let outcome = solver.solve(
            &model,
            &constraints,
            &AircraftMajorOrder,
            SolutionMonitor::with_limit(&counter, 2),
        );

        assert!(!outcome.is_exhaustive());
        assert_eq!(outcome.solutions().len(), 2);
        assert!(matches!(
            outcome.termination_reason(),
            TerminationReason::Aborted(_)
        ));
    }

    #[test]
    fn test_capacity_allows_sharing_but_not_crowding() {
        // Three aircraft on a fully declared 1x3 strip: occupying all three
        // bays blocks the middle one, so feasible placements share bays.
        let mut builder = ModelBuilder::new(1, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Standard)
            .add_bay(0, 2, BayCategory::Standard)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();

        let outcome = enumerate(&model);
        for solution in outcome.solutions().iter() {
            let bays: Vec<usize> = (0..3)
                .map(|aircraft| solution.bay_for(a(aircraft), t(0)).get())
                .collect();
            // Never all three bays occupied at once.
            let distinct: std::collections::BTreeSet<usize> = bays.iter().copied().collect();
            assert!(distinct.len() < 3, "occupying all bays blocks the middle");
            // No bay hosts all three aircraft.
            for bay in &distinct {
                assert!(bays.iter().filter(|&&x| x == *bay).count() <= 2);
            }
        }
        assert!(!outcome.solutions().is_empty());
    }
}
