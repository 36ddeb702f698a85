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
    constraints::{Constraint, ConstraintScope},
    state::SearchState,
};
use apron_model::{
    index::{AircraftIndex, SlotIndex},
    model::Model,
};

/// Task-completion feasibility for one aircraft.
///
/// Parking never advances either task type, so an aircraft needs at least
/// `type1 + type2` non-parking slots to finish its work. Checking this the
/// moment the aircraft's slot row is fully bound prunes work-infeasible
/// aircraft independent of slot ordering and of every other aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskCompletionConstraint {
    aircraft: AircraftIndex,
}

impl TaskCompletionConstraint {
    /// Creates a new `TaskCompletionConstraint` scoped to one aircraft.
    #[inline]
    pub fn new(aircraft: AircraftIndex) -> Self {
        Self { aircraft }
    }
}

impl Constraint for TaskCompletionConstraint {
    fn name(&self) -> &str {
        "TaskCompletionConstraint"
    }

    fn scope(&self) -> ConstraintScope {
        ConstraintScope::Aircraft(self.aircraft)
    }

    fn is_satisfied(&self, model: &Model, state: &SearchState) -> bool {
        debug_assert!(
            state.is_aircraft_complete(self.aircraft),
            "called `TaskCompletionConstraint::is_satisfied` before aircraft {} was fully bound",
            self.aircraft.get()
        );

        let required = model.total_task_count(self.aircraft) as usize;

        let working_slots = (0..model.num_slots())
            .filter(|&slot| {
                let bay = state.bay_for(self.aircraft, SlotIndex::new(slot));
                model.bay_category(bay).is_workshop()
            })
            .count();

        working_slots >= required
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::{
        index::BayIndex,
        layout::{AircraftKind, BayCategory, Restriction},
        model::ModelBuilder,
    };

    // Bays: 0 = STD, 1 = SPC, 2 = PRK.
    fn build_model(type1: u32, type2: u32) -> Model {
        let mut builder = ModelBuilder::new(3, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(0, 2, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, type1, type2);
        builder.build().unwrap()
    }

    fn state_with(bays: &[usize]) -> SearchState {
        let mut state = SearchState::new(1, bays.len());
        for (slot, &bay) in bays.iter().enumerate() {
            state.bind(
                apron_model::index::VariableIndex::new(slot),
                BayIndex::new(bay),
            );
        }
        state
    }

    #[test]
    fn test_enough_working_slots_passes() {
        let model = build_model(1, 1);
        let constraint = TaskCompletionConstraint::new(AircraftIndex::new(0));

        // STD, SPC, PRK: two working slots for two tasks.
        let state = state_with(&[0, 1, 2]);
        assert!(constraint.is_satisfied(&model, &state));
    }

    #[test]
    fn test_too_much_parking_fails() {
        let model = build_model(1, 1);
        let constraint = TaskCompletionConstraint::new(AircraftIndex::new(0));

        // Only one working slot for two tasks.
        let state = state_with(&[0, 2, 2]);
        assert!(!constraint.is_satisfied(&model, &state));
    }

    #[test]
    fn test_zero_task_aircraft_is_never_rejected() {
        let model = build_model(0, 0);
        let constraint = TaskCompletionConstraint::new(AircraftIndex::new(0));

        // All parking is fine when there is no work to do.
        let state = state_with(&[2, 2, 2]);
        assert!(constraint.is_satisfied(&model, &state));
    }

    #[test]
    fn test_exact_fit_passes() {
        let model = build_model(2, 1);
        let constraint = TaskCompletionConstraint::new(AircraftIndex::new(0));

        // Three working slots for three tasks.
        let state = state_with(&[0, 1, 0]);
        assert!(constraint.is_satisfied(&model, &state));
    }
}
