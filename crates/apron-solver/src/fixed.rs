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

use apron_model::{
    index::{AircraftIndex, BayIndex, SlotIndex, VariableIndex},
    model::Model,
};

/// A pre-bound assignment applied before the search starts.
///
/// Fixed assignments pin variables to values for the whole run. The parallel
/// driver uses them to partition the root variable's domain across workers;
/// callers can also use them to force externally mandated placements. A
/// fixed assignment that violates a constraint whose scope it completes
/// yields an empty solution set, not an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct FixedAssignment {
    /// The variable to pin.
    pub variable: VariableIndex,
    /// The bay to pin it to.
    pub bay: BayIndex,
}

impl FixedAssignment {
    /// Creates a new `FixedAssignment`.
    #[inline]
    pub const fn new(variable: VariableIndex, bay: BayIndex) -> Self {
        Self { variable, bay }
    }

    /// Creates a `FixedAssignment` from an `(aircraft, slot)` pair.
    #[inline]
    pub fn for_aircraft_slot(
        model: &Model,
        aircraft: AircraftIndex,
        slot: SlotIndex,
        bay: BayIndex,
    ) -> Self {
        Self {
            variable: model.variable(aircraft, slot),
            bay,
        }
    }
}

impl std::fmt::Display for FixedAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FixedAssignment(variable: {}, bay: {})",
            self.variable.get(),
            self.bay.get()
        )
    }
}
