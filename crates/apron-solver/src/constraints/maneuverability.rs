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
use fixedbitset::FixedBitSet;

/// Per-slot maneuverability.
///
/// Every occupied bay must keep at least one unoccupied in-bounds
/// 4-neighbor cell to maneuver out through. An in-bounds neighbor cell that
/// is not a declared bay can never be occupied and always counts as free; a
/// bay with zero in-bounds neighbors (a 1×1 grid) can never satisfy the
/// rule. The rule holds in every slot, not only the final one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManeuverabilityConstraint {
    slot: SlotIndex,
}

impl ManeuverabilityConstraint {
    /// Creates a new `ManeuverabilityConstraint` scoped to one slot.
    #[inline]
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot }
    }
}

impl Constraint for ManeuverabilityConstraint {
    fn name(&self) -> &str {
        "ManeuverabilityConstraint"
    }

    fn scope(&self) -> ConstraintScope {
        ConstraintScope::Slot(self.slot)
    }

    fn is_satisfied(&self, model: &Model, state: &SearchState) -> bool {
        debug_assert!(
            state.is_slot_complete(self.slot),
            "called `ManeuverabilityConstraint::is_satisfied` before slot {} was fully bound",
            self.slot.get()
        );

        let layout = model.layout();

        let mut occupied = FixedBitSet::with_capacity(layout.num_bays());
        for aircraft in 0..model.num_aircraft() {
            let bay = state.bay_for(AircraftIndex::new(aircraft), self.slot);
            occupied.insert(bay.get());
        }

        for bay_index in occupied.ones() {
            let bay = apron_model::index::BayIndex::new(bay_index);

            if layout.in_bounds_neighbor_count(bay) == 0 {
                // No way in or out at all.
                return false;
            }

            if layout.has_undeclared_neighbor(bay) {
                continue;
            }

            let blocked = layout
                .neighbor_bays(bay)
                .iter()
                .all(|neighbor| occupied.contains(neighbor.get()));
            if blocked {
                return false;
            }
        }

        true
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

    // 1x3 strip, all standard bays: 0 - 1 - 2.
    fn build_strip(num_aircraft: usize) -> Model {
        let mut builder = ModelBuilder::new(1, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Standard)
            .add_bay(0, 2, BayCategory::Standard);
        for _ in 0..num_aircraft {
            builder.add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        }
        builder.build().unwrap()
    }

    fn state_with(bays: &[usize]) -> SearchState {
        let mut state = SearchState::new(bays.len(), 1);
        for (aircraft, &bay) in bays.iter().enumerate() {
            state.bind(
                apron_model::index::VariableIndex::new(aircraft),
                BayIndex::new(bay),
            );
        }
        state
    }

    #[test]
    fn test_lone_aircraft_always_has_room() {
        let model = build_strip(1);
        let constraint = ManeuverabilityConstraint::new(SlotIndex::new(0));
        for bay in 0..3 {
            assert!(constraint.is_satisfied(&model, &state_with(&[bay])));
        }
    }

    #[test]
    fn test_fully_enclosed_middle_bay_fails() {
        let model = build_strip(3);
        let constraint = ManeuverabilityConstraint::new(SlotIndex::new(0));

        // Bay 1's only neighbors (0 and 2) are both occupied.
        assert!(!constraint.is_satisfied(&model, &state_with(&[0, 1, 2])));
    }

    #[test]
    fn test_end_bays_block_each_other_pairwise() {
        let model = build_strip(2);
        let constraint = ManeuverabilityConstraint::new(SlotIndex::new(0));

        // Bay 0's only neighbor is bay 1 and vice versa.
        assert!(!constraint.is_satisfied(&model, &state_with(&[0, 1])));
        // With a gap both have room.
        assert!(constraint.is_satisfied(&model, &state_with(&[0, 2])));
    }

    #[test]
    fn test_shared_bay_counts_as_one_occupied_cell() {
        let model = build_strip(2);
        let constraint = ManeuverabilityConstraint::new(SlotIndex::new(0));

        // Both aircraft in bay 1: bays 0 and 2 stay free.
        assert!(constraint.is_satisfied(&model, &state_with(&[1, 1])));
    }

    #[test]
    fn test_undeclared_neighbor_counts_as_free() {
        // 1x3 grid with only two declared bays; cell (0,2) is undeclared.
        let mut builder = ModelBuilder::new(1, 1, 3);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Standard)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();
        let constraint = ManeuverabilityConstraint::new(SlotIndex::new(0));

        // Bay 1 borders the undeclared cell (0,2), so both bays occupied is
        // fine for bay 1; bay 0 however only borders bay 1.
        assert!(!constraint.is_satisfied(&model, &state_with(&[0, 1])));
        // A single aircraft in bay 1 has the undeclared escape cell.
        let mut state = SearchState::new(2, 1);
        state.bind(apron_model::index::VariableIndex::new(0), BayIndex::new(1));
        state.bind(apron_model::index::VariableIndex::new(1), BayIndex::new(1));
        assert!(constraint.is_satisfied(&model, &state));
    }

    #[test]
    fn test_single_cell_grid_rejects_any_occupancy() {
        let mut builder = ModelBuilder::new(1, 1, 1);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();
        let constraint = ManeuverabilityConstraint::new(SlotIndex::new(0));

        assert!(!constraint.is_satisfied(&model, &state_with(&[0])));
    }
}
