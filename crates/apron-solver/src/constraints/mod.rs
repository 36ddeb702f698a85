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

//! Constraint predicates and their registry.
//!
//! Every rule of the bay allocation problem is a pure predicate over the
//! bound variables of one *scope*: either all slot variables of one
//! aircraft, or all aircraft variables of one slot. A [`ConstraintSet`]
//! instantiates each predicate family once per scope element and indexes the
//! instances by their trigger, so the engine can evaluate exactly the
//! constraints whose scope has just become fully bound.
//!
//! The five families:
//!
//! - [`task_completion::TaskCompletionConstraint`]: an aircraft must have
//!   enough non-parking slots to finish all its work (aircraft scope).
//! - [`bay_capacity::BayCapacityConstraint`]: at most two aircraft per bay,
//!   at most one of them a Jumbo (slot scope).
//! - [`task_ordering::TaskOrderingConstraint`]: type-2 work happens in
//!   specialized bays, counts add up, and ordered aircraft finish type-2
//!   work before visiting standard bays or parking (aircraft scope).
//! - [`maneuverability::ManeuverabilityConstraint`]: every occupied bay
//!   keeps a free 4-neighbor to maneuver out through (slot scope).
//! - [`jumbo_separation::JumboSeparationConstraint`]: two Jumbos never
//!   occupy adjacent bays (slot scope).
//!
//! Adding a sixth family means implementing [`Constraint`] and registering
//! it with [`ConstraintSet::add`]; the engine does not change.

pub mod bay_capacity;
pub mod jumbo_separation;
pub mod maneuverability;
pub mod task_completion;
pub mod task_ordering;

use crate::state::SearchState;
use apron_model::{
    index::{AircraftIndex, SlotIndex},
    model::Model,
};

/// The variable subset a constraint ranges over.
///
/// Scopes are the unit of constraint scheduling: a constraint is evaluated
/// as soon as the last variable of its scope becomes bound. Smaller scopes
/// mean earlier pruning; no constraint in this problem needs to see more
/// than one aircraft row or one slot column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConstraintScope {
    /// All slot variables of one aircraft.
    Aircraft(AircraftIndex),
    /// All aircraft variables of one slot.
    Slot(SlotIndex),
}

impl std::fmt::Display for ConstraintScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConstraintScope::Aircraft(aircraft) => {
                write!(f, "Aircraft({})", aircraft.get())
            }
            ConstraintScope::Slot(slot) => write!(f, "Slot({})", slot.get()),
        }
    }
}

/// A pure predicate over the bound variables of one scope.
///
/// Implementations must not mutate any state and must only read variables
/// inside their declared scope; the engine guarantees that every variable of
/// the scope is bound when `is_satisfied` is called. `Send + Sync` is
/// required so one `ConstraintSet` can be shared across the parallel
/// driver's workers.
pub trait Constraint: Send + Sync {
    /// Returns the name of the constraint, used in monitor callbacks.
    fn name(&self) -> &str;

    /// Returns the scope this constraint instance ranges over.
    fn scope(&self) -> ConstraintScope;

    /// Evaluates the predicate against the (fully bound) scope.
    fn is_satisfied(&self, model: &Model, state: &SearchState) -> bool;
}

impl std::fmt::Debug for dyn Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Constraint({}, scope: {})", self.name(), self.scope())
    }
}

/// The registry of constraint instances for one problem, indexed by trigger.
///
/// `for_aircraft(a)` yields the constraints to evaluate when aircraft `a`'s
/// last slot variable binds; `for_slot(t)` yields those for slot `t`'s last
/// aircraft variable. One binding can complete both an aircraft and a slot
/// scope; the engine checks both triggers.
pub struct ConstraintSet {
    constraints: Vec<Box<dyn Constraint>>,
    by_aircraft: Vec<Vec<usize>>, // len = num_aircraft
    by_slot: Vec<Vec<usize>>,     // len = num_slots
}

impl ConstraintSet {
    /// Creates an empty `ConstraintSet` for the given problem dimensions.
    pub fn empty(num_aircraft: usize, num_slots: usize) -> Self {
        Self {
            constraints: Vec::new(),
            by_aircraft: vec![Vec::new(); num_aircraft],
            by_slot: vec![Vec::new(); num_slots],
        }
    }

    /// Instantiates the five standard constraint families against every
    /// scope of the given model.
    pub fn standard(model: &Model) -> Self {
        let mut set = Self::empty(model.num_aircraft(), model.num_slots());

        for aircraft in 0..model.num_aircraft() {
            let aircraft = AircraftIndex::new(aircraft);
            set.add(task_completion::TaskCompletionConstraint::new(aircraft));
            set.add(task_ordering::TaskOrderingConstraint::new(aircraft));
        }

        for slot in 0..model.num_slots() {
            let slot = SlotIndex::new(slot);
            set.add(bay_capacity::BayCapacityConstraint::new(slot));
            set.add(maneuverability::ManeuverabilityConstraint::new(slot));
            set.add(jumbo_separation::JumboSeparationConstraint::new(slot));
        }

        set
    }

    /// Registers a constraint instance under its scope's trigger.
    ///
    /// # Panics
    ///
    /// Panics if the constraint's scope index lies outside the dimensions
    /// this set was created for.
    pub fn add<C>(&mut self, constraint: C)
    where
        C: Constraint + 'static,
    {
        let index = self.constraints.len();
        match constraint.scope() {
            ConstraintScope::Aircraft(aircraft) => {
                assert!(
                    aircraft.get() < self.by_aircraft.len(),
                    "called `ConstraintSet::add` with aircraft scope out of bounds: the len is {} but the index is {}",
                    self.by_aircraft.len(),
                    aircraft.get()
                );
                self.by_aircraft[aircraft.get()].push(index);
            }
            ConstraintScope::Slot(slot) => {
                assert!(
                    slot.get() < self.by_slot.len(),
                    "called `ConstraintSet::add` with slot scope out of bounds: the len is {} but the index is {}",
                    self.by_slot.len(),
                    slot.get()
                );
                self.by_slot[slot.get()].push(index);
            }
        }
        self.constraints.push(Box::new(constraint));
    }

    /// Returns the total number of constraint instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Returns `true` if the set holds no constraints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Returns the constraints triggered by completing the specified
    /// aircraft's scope.
    #[inline]
    pub fn for_aircraft(
        &self,
        aircraft: AircraftIndex,
    ) -> impl Iterator<Item = &dyn Constraint> {
        self.by_aircraft[aircraft.get()]
            .iter()
            .map(move |&index| self.constraints[index].as_ref())
    }

    /// Returns the constraints triggered by completing the specified slot's
    /// scope.
    #[inline]
    pub fn for_slot(&self, slot: SlotIndex) -> impl Iterator<Item = &dyn Constraint> {
        self.by_slot[slot.get()]
            .iter()
            .map(move |&index| self.constraints[index].as_ref())
    }

    /// Returns an iterator over every constraint instance.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &dyn Constraint> {
        self.constraints.iter().map(|constraint| constraint.as_ref())
    }
}

impl std::fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConstraintSet(len: {})", self.constraints.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apron_model::{
        layout::{AircraftKind, BayCategory, Restriction},
        model::ModelBuilder,
    };

    fn build_model(num_aircraft: usize, num_slots: usize) -> Model {
        let mut builder = ModelBuilder::new(num_slots, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Parking);
        for _ in 0..num_aircraft {
            builder.add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_standard_set_instantiates_all_families() {
        let model = build_model(2, 3);
        let set = ConstraintSet::standard(&model);

        // Two families per aircraft, three per slot.
        assert_eq!(set.len(), 2 * 2 + 3 * 3);

        assert_eq!(set.for_aircraft(AircraftIndex::new(0)).count(), 2);
        assert_eq!(set.for_aircraft(AircraftIndex::new(1)).count(), 2);
        for slot in 0..3 {
            assert_eq!(set.for_slot(SlotIndex::new(slot)).count(), 3);
        }
    }

    #[test]
    fn test_scopes_point_at_their_trigger() {
        let model = build_model(2, 2);
        let set = ConstraintSet::standard(&model);

        for constraint in set.for_aircraft(AircraftIndex::new(1)) {
            assert_eq!(
                constraint.scope(),
                ConstraintScope::Aircraft(AircraftIndex::new(1))
            );
        }
        for constraint in set.for_slot(SlotIndex::new(0)) {
            assert_eq!(constraint.scope(), ConstraintScope::Slot(SlotIndex::new(0)));
        }
    }

    #[test]
    fn test_empty_set() {
        let set = ConstraintSet::empty(1, 1);
        assert!(set.is_empty());
        assert_eq!(set.for_aircraft(AircraftIndex::new(0)).count(), 0);
        assert_eq!(set.for_slot(SlotIndex::new(0)).count(), 0);
    }
}
