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

/// Per-slot Jumbo separation.
///
/// Two Jumbo aircraft may never occupy 4-adjacent bays within the same
/// slot. Sharing one bay is the capacity constraint's concern; this rule is
/// purely about adjacency between distinct cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JumboSeparationConstraint {
    slot: SlotIndex,
}

impl JumboSeparationConstraint {
    /// Creates a new `JumboSeparationConstraint` scoped to one slot.
    #[inline]
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot }
    }
}

impl Constraint for JumboSeparationConstraint {
    fn name(&self) -> &str {
        "JumboSeparationConstraint"
    }

    fn scope(&self) -> ConstraintScope {
        ConstraintScope::Slot(self.slot)
    }

    fn is_satisfied(&self, model: &Model, state: &SearchState) -> bool {
        debug_assert!(
            state.is_slot_complete(self.slot),
            "called `JumboSeparationConstraint::is_satisfied` before slot {} was fully bound",
            self.slot.get()
        );

        let layout = model.layout();

        let mut jumbo_bays = FixedBitSet::with_capacity(layout.num_bays());
        for aircraft in 0..model.num_aircraft() {
            let aircraft = AircraftIndex::new(aircraft);
            if model.is_jumbo(aircraft) {
                jumbo_bays.insert(state.bay_for(aircraft, self.slot).get());
            }
        }

        for bay_index in jumbo_bays.ones() {
            let bay = apron_model::index::BayIndex::new(bay_index);
            let adjacent_jumbo = layout
                .neighbor_bays(bay)
                .iter()
                .any(|neighbor| jumbo_bays.contains(neighbor.get()));
            if adjacent_jumbo {
                return false;
            }
        }

        true
    }
}
