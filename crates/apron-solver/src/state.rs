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

//! Search state management for the enumeration engine.
//!
//! This module provides `SearchState`, a compact, mutable container for
//! tracking the incremental binding of assignment variables to bays during
//! search.
//!
//! Key responsibilities:
//! - Maintain the bound/unbound status and value of every `(aircraft, slot)`
//!   variable.
//! - Maintain per-aircraft and per-slot bound counters so the engine can
//!   detect in O(1) when a constraint scope has just become fully bound.
//! - Maintain the invariant `num_bound <= num_variables`.
//!
//! Performance considerations:
//! - The working assignment is a flat arena mutated in place; backtracking
//!   restores it through the trail instead of copying per branch.
//! - Uses `FixedBitSet` to track bound variables efficiently.
//!
//! Safety and invariants:
//! - Debug assertions are used extensively to catch invariant violations in
//!   debug builds; bound accessors require the variable to actually be bound.

use apron_model::{
    index::{AircraftIndex, BayIndex, SlotIndex, VariableIndex},
    solution::Solution,
};
use fixedbitset::FixedBitSet;

/// A compact, mutable container holding the incremental search state for the
/// bay allocation engine.
///
/// The state tracks:
/// - `bays`: the assigned bay per variable (valid only while bound).
/// - `bound`: bitset indicating whether a variable is currently bound.
/// - `aircraft_bound_counts` / `slot_bound_counts`: how many variables of
///   each aircraft row / slot column are bound, for scope-completion checks.
/// - `num_bound` and `num_variables`: binding progress tracking.
///
/// Invariants (debug-checked):
/// - `num_bound <= num_variables`
/// - For any variable `v`: if `bound[v]` then `bays[v]` contains valid data.
#[derive(Debug, Clone)]
pub struct SearchState {
    bays: Vec<BayIndex>,               // len = num_variables
    bound: FixedBitSet,                // len = num_variables
    aircraft_bound_counts: Vec<usize>, // len = num_aircraft
    slot_bound_counts: Vec<usize>,     // len = num_slots
    num_slots: usize,
    num_bound: usize,
}

impl SearchState {
    /// Creates a new `SearchState` for the given fleet size and horizon.
    /// The initial state has every variable unbound.
    #[inline]
    pub fn new(num_aircraft: usize, num_slots: usize) -> Self {
        let num_variables = num_aircraft * num_slots;
        Self {
            bays: vec![BayIndex::new(0); num_variables],
            bound: FixedBitSet::with_capacity(num_variables),
            aircraft_bound_counts: vec![0; num_aircraft],
            slot_bound_counts: vec![0; num_slots],
            num_slots,
            num_bound: 0,
        }
    }

    /// Returns the number of aircraft covered by this state.
    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.aircraft_bound_counts.len()
    }

    /// Returns the number of slots covered by this state.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns the total number of assignment variables.
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.bays.len()
    }

    /// Returns the number of currently bound variables.
    #[inline]
    pub fn num_bound(&self) -> usize {
        self.num_bound
    }

    /// Returns `true` if every variable is bound.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_bound == self.num_variables()
    }

    /// Checks if the specified variable is bound.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `variable` is out of bounds.
    #[inline]
    pub fn is_bound(&self, variable: VariableIndex) -> bool {
        let index = variable.get();
        debug_assert!(
            index < self.num_variables(),
            "called `SearchState::is_bound` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            index
        );

        self.bound.contains(index)
    }

    /// Binds the specified variable to the specified bay.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `variable` is out of bounds, if the variable
    /// is already bound, or if the bound counter is already at the limit.
    #[inline]
    pub fn bind(&mut self, variable: VariableIndex, bay: BayIndex) {
        let index = variable.get();
        debug_assert!(
            index < self.num_variables(),
            "called `SearchState::bind` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            index
        );
        debug_assert!(
            !self.bound.contains(index),
            "called `SearchState::bind` with variable {} already bound",
            index
        );
        debug_assert!(
            self.num_bound < self.num_variables(),
            "called `SearchState::bind` but the internal bound count is already at the limit {}",
            self.num_variables()
        );

        self.bound.insert(index);
        self.bays[index] = bay;
        self.aircraft_bound_counts[index / self.num_slots] += 1;
        self.slot_bound_counts[index % self.num_slots] += 1;
        self.num_bound += 1;

        debug_assert!(self.num_bound <= self.num_variables());
    }

    /// Unbinds the specified variable.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `variable` is out of bounds, if the variable
    /// is already unbound, or if the bound counter is already zero.
    #[inline]
    pub fn unbind(&mut self, variable: VariableIndex) {
        let index = variable.get();
        debug_assert!(
            index < self.num_variables(),
            "called `SearchState::unbind` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            index
        );
        debug_assert!(
            self.bound.contains(index),
            "called `SearchState::unbind` with variable {} already unbound",
            index
        );
        debug_assert!(
            self.num_bound > 0,
            "called `SearchState::unbind` but the internal bound count is already at 0",
        );

        self.bound.set(index, false);
        self.aircraft_bound_counts[index / self.num_slots] -= 1;
        self.slot_bound_counts[index % self.num_slots] -= 1;
        self.num_bound -= 1;

        debug_assert!(self.num_bound <= self.num_variables());
    }

    /// Returns the bay bound to the specified variable.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `variable` is out of bounds or unbound.
    #[inline]
    pub fn bay(&self, variable: VariableIndex) -> BayIndex {
        let index = variable.get();
        debug_assert!(
            index < self.num_variables(),
            "called `SearchState::bay` with variable index out of bounds: the len is {} but the index is {}",
            self.num_variables(),
            index
        );
        debug_assert!(
            self.bound.contains(index),
            "called `SearchState::bay` with variable {} unbound",
            index
        );

        self.bays[index]
    }

    /// Returns the bay bound to the specified `(aircraft, slot)` pair.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if the pair is out of bounds or unbound.
    #[inline]
    pub fn bay_for(&self, aircraft: AircraftIndex, slot: SlotIndex) -> BayIndex {
        self.bay(VariableIndex::new(aircraft.get() * self.num_slots + slot.get()))
    }

    /// Returns how many of the specified aircraft's slot variables are bound.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `aircraft` is out of bounds.
    #[inline]
    pub fn aircraft_bound_count(&self, aircraft: AircraftIndex) -> usize {
        let index = aircraft.get();
        debug_assert!(
            index < self.num_aircraft(),
            "called `SearchState::aircraft_bound_count` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            index
        );

        self.aircraft_bound_counts[index]
    }

    /// Returns how many of the specified slot's aircraft variables are bound.
    ///
    /// # Panics
    ///
    /// In debug mode, panics if `slot` is out of bounds.
    #[inline]
    pub fn slot_bound_count(&self, slot: SlotIndex) -> usize {
        let index = slot.get();
        debug_assert!(
            index < self.num_slots,
            "called `SearchState::slot_bound_count` with slot index out of bounds: the len is {} but the index is {}",
            self.num_slots,
            index
        );

        self.slot_bound_counts[index]
    }

    /// Returns `true` if every slot variable of the specified aircraft is
    /// bound, i.e. the aircraft-scoped constraints can be evaluated.
    #[inline]
    pub fn is_aircraft_complete(&self, aircraft: AircraftIndex) -> bool {
        self.aircraft_bound_count(aircraft) == self.num_slots
    }

    /// Returns `true` if every aircraft variable of the specified slot is
    /// bound, i.e. the slot-scoped constraints can be evaluated.
    #[inline]
    pub fn is_slot_complete(&self, slot: SlotIndex) -> bool {
        self.slot_bound_count(slot) == self.num_aircraft()
    }

    /// Resets the search state to its initial configuration with every
    /// variable unbound.
    #[inline]
    pub fn reset(&mut self) {
        self.bound.clear();
        self.aircraft_bound_counts.fill(0);
        self.slot_bound_counts.fill(0);
        self.num_bound = 0;
    }
}

impl std::fmt::Display for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "State(bound: {}/{})",
            self.num_bound,
            self.num_variables()
        )
    }
}

/// Error indicating that a solution is incomplete.
/// This error is returned when attempting to convert a `SearchState`
/// into a `Solution`, but not all variables have been bound.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IncompleteSolutionError {
    bound_variables: usize,
    total_variables: usize,
}

impl std::fmt::Display for IncompleteSolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Incomplete solution: bound {}/{} variables",
            self.bound_variables, self.total_variables
        )
    }
}

impl std::error::Error for IncompleteSolutionError {}

impl TryFrom<&SearchState> for Solution {
    type Error = IncompleteSolutionError;

    fn try_from(state: &SearchState) -> Result<Solution, Self::Error> {
        if !state.is_complete() {
            return Err(IncompleteSolutionError {
                bound_variables: state.num_bound,
                total_variables: state.num_variables(),
            });
        }

        Ok(Solution::new(state.num_slots, state.bays.clone()))
    }
}
