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

//! Branching: decisions and variable-ordering strategies.
//!
//! The engine explores variables in a fixed total order; either order is
//! correct, order only affects traversal speed and the (deterministic)
//! sequence in which solutions are discovered, never the solution set
//! itself. Two strategies are provided, matching the two keying conventions
//! a per-slot or per-aircraft formulation naturally produces:
//!
//! - [`aircraft_major::AircraftMajorOrder`] binds all slots of one aircraft
//!   before moving on, letting the aircraft-scoped task constraints prune as
//!   early as possible.
//! - [`slot_major::SlotMajorOrder`] binds all aircraft of one slot before
//!   moving on, letting the slot-scoped capacity and spatial constraints
//!   prune as early as possible.

pub mod aircraft_major;
pub mod decision;
pub mod slot_major;

use apron_model::{index::VariableIndex, model::Model};

use crate::state::SearchState;

/// Strategy trait selecting the next variable to branch on.
///
/// Implementations must be deterministic: given the same model and the same
/// set of bound variables they must return the same variable. The engine
/// relies on this for reproducible enumeration.
pub trait VariableOrder {
    /// Returns the name of the strategy.
    fn name(&self) -> &str;

    /// Returns the next unbound variable, or `None` if every variable is
    /// bound.
    fn next_variable(&self, model: &Model, state: &SearchState) -> Option<VariableIndex>;
}
