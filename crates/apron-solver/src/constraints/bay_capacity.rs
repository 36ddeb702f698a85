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
    index::{AircraftIndex, BayIndex, SlotIndex},
    model::Model,
};
use rustc_hash::FxHashMap;

/// Per-slot bay capacity.
///
/// Within one slot, no bay may host more than two aircraft, and no bay may
/// host more than one Jumbo. One Jumbo plus one standard aircraft is
/// permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BayCapacityConstraint {
    slot: SlotIndex,
}

impl BayCapacityConstraint {
    /// Creates a new `BayCapacityConstraint` scoped to one slot.
    #[inline]
    pub fn new(slot: SlotIndex) -> Self {
        Self { slot }
    }
}

/// Occupancy counters for one bay within one slot.
#[derive(Default, Clone, Copy)]
struct BayLoad {
    total: u8,
    jumbos: u8,
}

impl Constraint for BayCapacityConstraint {
    fn name(&self) -> &str {
        "BayCapacityConstraint"
    }

    fn scope(&self) -> ConstraintScope {
        ConstraintScope::Slot(self.slot)
    }

    fn is_satisfied(&self, model: &Model, state: &SearchState) -> bool {
        debug_assert!(
            state.is_slot_complete(self.slot),
            "called `BayCapacityConstraint::is_satisfied` before slot {} was fully bound",
            self.slot.get()
        );

        let mut loads: FxHashMap<BayIndex, BayLoad> = FxHashMap::default();

        for aircraft in 0..model.num_aircraft() {
            let aircraft = AircraftIndex::new(aircraft);
            let bay = state.bay_for(aircraft, self.slot);
            let load = loads.entry(bay).or_default();

            load.total += 1;
            if load.total > 2 {
                return false;
            }

            if model.is_jumbo(aircraft) {
                load.jumbos += 1;
                if load.jumbos > 1 {
                    return false;
                }
            }
        }

        true
    }
}
