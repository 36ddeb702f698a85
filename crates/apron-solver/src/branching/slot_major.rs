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

use crate::{branching::VariableOrder, state::SearchState};
use apron_model::{
    index::{AircraftIndex, SlotIndex, VariableIndex},
    model::Model,
};

/// Binds every aircraft of slot 0, then of slot 1, and so on.
///
/// With this order a slot's aircraft variables complete as early as
/// possible, so the slot-scoped capacity and spatial constraints fire after
/// every `num_aircraft` bindings and prune overfull or blocked slots before
/// the next slot is touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotMajorOrder;

impl VariableOrder for SlotMajorOrder {
    fn name(&self) -> &str {
        "SlotMajorOrder"
    }

    fn next_variable(&self, model: &Model, state: &SearchState) -> Option<VariableIndex> {
        debug_assert!(
            state.num_variables() == model.num_variables(),
            "called `SlotMajorOrder::next_variable` with mismatched state: the model has {} variables but the state has {}",
            model.num_variables(),
            state.num_variables()
        );

        for slot in 0..model.num_slots() {
            // Fully bound slots are skipped wholesale via the scope counter.
            if state.is_slot_complete(SlotIndex::new(slot)) {
                continue;
            }
            for aircraft in 0..model.num_aircraft() {
                let variable =
                    model.variable(AircraftIndex::new(aircraft), SlotIndex::new(slot));
                if !state.is_bound(variable) {
                    return Some(variable);
                }
            }
        }

        None
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

    fn build_model() -> Model {
        let mut builder = ModelBuilder::new(2, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        builder.build().unwrap()
    }

    #[test]
    fn test_visits_all_aircraft_of_one_slot_first() {
        let model = build_model();
        let mut state = SearchState::new(2, 2);
        let order = SlotMajorOrder;

        let mut visited = Vec::new();
        while let Some(variable) = order.next_variable(&model, &state) {
            visited.push(variable.get());
            state.bind(variable, BayIndex::new(0));
        }

        // Slot 0 holds variables 0 and 2; slot 1 holds variables 1 and 3.
        assert_eq!(visited, vec![0, 2, 1, 3]);
    }

    #[test]
    fn test_skips_pre_bound_variables() {
        let model = build_model();
        let mut state = SearchState::new(2, 2);
        state.bind(VariableIndex::new(0), BayIndex::new(1));

        let order = SlotMajorOrder;
        assert_eq!(
            order.next_variable(&model, &state),
            Some(VariableIndex::new(2))
        );
    }

    #[test]
    fn test_returns_none_when_complete() {
        let model = build_model();
        let mut state = SearchState::new(2, 2);
        for i in 0..4 {
            state.bind(VariableIndex::new(i), BayIndex::new(0));
        }

        assert_eq!(SlotMajorOrder.next_variable(&model, &state), None);
    }
}
