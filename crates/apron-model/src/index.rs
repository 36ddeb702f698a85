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

//! Typed index spaces of the scheduling problem.
//!
//! Four index spaces coexist in the engine: aircraft, time slots, bay
//! positions, and the flattened assignment variables keyed by
//! `(aircraft, slot)`. Each gets its own phantom-tagged index type so the
//! compiler rejects accidental mixing. The flattening convention is
//! aircraft-major: `variable = aircraft * num_slots + slot`.

use apron_core::utils::index::{TypedIndex, TypedIndexTag};

/// A tag type for aircraft indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AircraftIndexTag;

impl TypedIndexTag for AircraftIndexTag {
    const NAME: &'static str = "AircraftIndex";
}

/// A typed index for aircraft. The index is the aircraft's identity and its
/// stable ordering key.
pub type AircraftIndex = TypedIndex<AircraftIndexTag>;

/// A tag type for time-slot indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SlotIndexTag;

impl TypedIndexTag for SlotIndexTag {
    const NAME: &'static str = "SlotIndex";
}

/// A typed index for discrete time slots.
pub type SlotIndex = TypedIndex<SlotIndexTag>;

/// A tag type for bay indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BayIndexTag;

impl TypedIndexTag for BayIndexTag {
    const NAME: &'static str = "BayIndex";
}

/// A typed index into the declared bay list. The bay list is the domain of
/// every assignment variable.
pub type BayIndex = TypedIndex<BayIndexTag>;

/// A tag type for assignment-variable indices.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct VariableIndexTag;

impl TypedIndexTag for VariableIndexTag {
    const NAME: &'static str = "VariableIndex";
}

/// A typed index for assignment variables, one per `(aircraft, slot)` pair.
pub type VariableIndex = TypedIndex<VariableIndexTag>;

/// Flattens an `(aircraft, slot)` pair into its variable index.
///
/// # Examples
///
/// ```rust
/// use apron_model::index::{AircraftIndex, SlotIndex, variable_index};
///
/// let v = variable_index(3, AircraftIndex::new(2), SlotIndex::new(1));
/// assert_eq!(v.get(), 7);
/// ```
#[inline(always)]
pub fn variable_index(num_slots: usize, aircraft: AircraftIndex, slot: SlotIndex) -> VariableIndex {
    VariableIndex::new(aircraft.get() * num_slots + slot.get())
}

/// Returns the aircraft component of a flattened variable index.
#[inline(always)]
pub fn aircraft_of(num_slots: usize, variable: VariableIndex) -> AircraftIndex {
    AircraftIndex::new(variable.get() / num_slots)
}

/// Returns the slot component of a flattened variable index.
#[inline(always)]
pub fn slot_of(num_slots: usize, variable: VariableIndex) -> SlotIndex {
    SlotIndex::new(variable.get() % num_slots)
}
