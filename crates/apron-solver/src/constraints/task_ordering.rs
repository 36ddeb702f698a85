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
    layout::{BayCategory, Restriction},
    model::Model,
};

/// Task-assignment correctness for one aircraft, evaluated in slot order.
///
/// Three rules:
///
/// 1. Every type-2 work unit happens in a `Specialized` bay, so the aircraft
///    needs at least `type2` specialized slots.
/// 2. Type-1 work happens in `Specialized` or `Standard` bays; the combined
///    workshop slots must cover `type1 + type2` units.
/// 3. An `Ordered` aircraft must exhaust its type-2 work before anything
///    else: while type-2 units remain outstanding it may only occupy
///    `Specialized` bays; a `Standard` bay or a `Parking` position before
///    the `type2`-th specialized visit rejects the candidate outright. This
///    is a strict ordering rule, not a counting one; specialized visits
///    after the type-2 work is done are ordinary type-1-capable visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskOrderingConstraint {
    aircraft: AircraftIndex,
}

impl TaskOrderingConstraint {
    /// Creates a new `TaskOrderingConstraint` scoped to one aircraft.
    #[inline]
    pub fn new(aircraft: AircraftIndex) -> Self {
        Self { aircraft }
    }
}

impl Constraint for TaskOrderingConstraint {
    fn name(&self) -> &str {
        "TaskOrderingConstraint"
    }

    fn scope(&self) -> ConstraintScope {
        ConstraintScope::Aircraft(self.aircraft)
    }

    fn is_satisfied(&self, model: &Model, state: &SearchState) -> bool {
        debug_assert!(
            state.is_aircraft_complete(self.aircraft),
            "called `TaskOrderingConstraint::is_satisfied` before aircraft {} was fully bound",
            self.aircraft.get()
        );

        let type1 = model.type1_count(self.aircraft) as usize;
        let type2 = model.type2_count(self.aircraft) as usize;
        let ordered = model.restriction(self.aircraft) == Restriction::Ordered;

        let mut specialized = 0usize;
        let mut standard = 0usize;
        let mut remaining_type2 = type2;

        for slot in 0..model.num_slots() {
            let bay = state.bay_for(self.aircraft, SlotIndex::new(slot));
            match model.bay_category(bay) {
                BayCategory::Specialized => {
                    specialized += 1;
                    remaining_type2 = remaining_type2.saturating_sub(1);
                }
                BayCategory::Standard => {
                    if ordered && remaining_type2 > 0 {
                        return false;
                    }
                    standard += 1;
                }
                BayCategory::Parking => {
                    if ordered && remaining_type2 > 0 {
                        return false;
                    }
                }
            }
        }

        specialized >= type2 && specialized + standard >= type1 + type2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::{
        index::BayIndex,
        layout::AircraftKind,
        model::ModelBuilder,
    };

    // Bays: 0 = STD, 1 = SPC, 2 = PRK.
    fn build_model(
        num_slots: usize,
        restriction: Restriction,
        type1: u32,
        type2: u32,
    ) -> Model {
        let mut builder = ModelBuilder::new(num_slots, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(0, 2, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, restriction, type1, type2);
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

    const STD: usize = 0;
    const SPC: usize = 1;
    const PRK: usize = 2;

    #[test]
    fn test_type2_requires_specialized_bays() {
        let model = build_model(3, Restriction::None, 0, 2);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        assert!(constraint.is_satisfied(&model, &state_with(&[SPC, SPC, PRK])));
        // Standard bays do not count toward type-2 work.
        assert!(!constraint.is_satisfied(&model, &state_with(&[SPC, STD, PRK])));
    }

    #[test]
    fn test_type1_counts_both_workshop_kinds() {
        let model = build_model(3, Restriction::None, 2, 1);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        // One specialized slot consumed by type-2; STD + SPC cover type-1.
        assert!(constraint.is_satisfied(&model, &state_with(&[SPC, STD, SPC])));
        // Two workshop slots cannot cover three work units.
        assert!(!constraint.is_satisfied(&model, &state_with(&[SPC, STD, PRK])));
    }

    #[test]
    fn test_ordered_aircraft_rejects_standard_before_type2_done() {
        let model = build_model(3, Restriction::Ordered, 1, 1);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        // Specialized first, then standard: fine.
        assert!(constraint.is_satisfied(&model, &state_with(&[SPC, STD, PRK])));
        // Standard bay while a type-2 unit is outstanding: rejected.
        assert!(!constraint.is_satisfied(&model, &state_with(&[STD, SPC, PRK])));
    }

    #[test]
    fn test_ordered_aircraft_rejects_parking_before_type2_done() {
        let model = build_model(3, Restriction::Ordered, 0, 1);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        // Parking before the specialized visit: rejected.
        assert!(!constraint.is_satisfied(&model, &state_with(&[PRK, SPC, PRK])));
        // Parking after the type-2 work is done: fine.
        assert!(constraint.is_satisfied(&model, &state_with(&[SPC, PRK, PRK])));
    }

    #[test]
    fn test_unordered_aircraft_may_interleave() {
        let model = build_model(3, Restriction::None, 1, 1);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        // Standard before specialized is fine without the restriction.
        assert!(constraint.is_satisfied(&model, &state_with(&[STD, SPC, PRK])));
        assert!(constraint.is_satisfied(&model, &state_with(&[PRK, STD, SPC])));
    }

    #[test]
    fn test_ordered_with_no_type2_work_is_unrestricted() {
        let model = build_model(2, Restriction::Ordered, 1, 0);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        assert!(constraint.is_satisfied(&model, &state_with(&[PRK, STD])));
        assert!(constraint.is_satisfied(&model, &state_with(&[STD, PRK])));
    }

    #[test]
    fn test_extra_specialized_visit_after_type2_done_is_allowed() {
        // type2 = 1: the first SPC visit finishes type-2 work, the STD slot
        // afterwards is legal even though another SPC visit follows.
        let model = build_model(3, Restriction::Ordered, 2, 1);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        assert!(constraint.is_satisfied(&model, &state_with(&[SPC, STD, SPC])));
    }

    #[test]
    fn test_zero_task_aircraft_is_never_rejected() {
        let model = build_model(2, Restriction::None, 0, 0);
        let constraint = TaskOrderingConstraint::new(AircraftIndex::new(0));

        for first in [STD, SPC, PRK] {
            for second in [STD, SPC, PRK] {
                assert!(
                    constraint.is_satisfied(&model, &state_with(&[first, second])),
                    "zero-task aircraft must pass for bays ({}, {})",
                    first,
                    second
                );
            }
        }
    }
}
