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

use crate::index::{AircraftIndex, BayIndex, SlotIndex};

/// One total, constraint-satisfying assignment of every aircraft to a bay in
/// every slot.
///
/// This struct uses a Structure of Arrays (SoA) layout: `bays[v]` is the bay
/// assigned to variable `v`, with the aircraft-major flattening
/// `v = aircraft * num_slots + slot`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Solution {
    num_slots: usize,
    /// The assigned bay for each `(aircraft, slot)` variable.
    bays: Vec<BayIndex>,
}

impl Solution {
    /// Constructs a new `Solution`.
    ///
    /// # Panics
    ///
    /// Panics if `num_slots` is zero, or if `bays.len()` is not a multiple of
    /// `num_slots`.
    pub fn new(num_slots: usize, bays: Vec<BayIndex>) -> Self {
        assert!(
            num_slots > 0,
            "called Solution::new with a zero slot count"
        );
        assert!(
            bays.len() % num_slots == 0,
            "called Solution::new with inconsistent dimensions: bays.len() = {} is not a multiple of num_slots = {}",
            bays.len(),
            num_slots
        );

        Self { num_slots, bays }
    }

    /// Returns the number of aircraft covered by this solution.
    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.bays.len() / self.num_slots
    }

    /// Returns the number of slots covered by this solution.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns the bay assigned to the specified aircraft in the specified
    /// slot.
    ///
    /// # Panics
    ///
    /// Panics if the `(aircraft, slot)` pair is out of bounds.
    #[inline]
    pub fn bay_for(&self, aircraft: AircraftIndex, slot: SlotIndex) -> BayIndex {
        let index = aircraft.get() * self.num_slots + slot.get();
        debug_assert!(
            index < self.bays.len(),
            "called `Solution::bay_for` with variable index out of bounds: the len is {} but the index is {}",
            self.bays.len(),
            index
        );

        self.bays[index]
    }

    /// Returns the assignment vector, indexed by variable.
    #[inline]
    pub fn bays(&self) -> &[BayIndex] {
        &self.bays
    }

    /// Returns the per-slot assignments of one aircraft.
    ///
    /// # Panics
    ///
    /// Panics if `aircraft` is out of bounds.
    #[inline]
    pub fn bays_for_aircraft(&self, aircraft: AircraftIndex) -> &[BayIndex] {
        let start = aircraft.get() * self.num_slots;
        debug_assert!(
            start + self.num_slots <= self.bays.len(),
            "called `Solution::bays_for_aircraft` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            aircraft.get()
        );

        &self.bays[start..start + self.num_slots]
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution")?;

        if self.bays.is_empty() {
            writeln!(f, "   (no aircraft)")?;
            return Ok(());
        }

        write!(f, "   {:<10} |", "Aircraft")?;
        for slot in 0..self.num_slots {
            write!(f, " {:<8}", format!("Slot {}", slot))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "   {:-<10}-+{:-<width$}",
            "",
            "",
            width = self.num_slots * 9
        )?;

        for aircraft in 0..self.num_aircraft() {
            write!(f, "   {:<10} |", aircraft)?;
            for slot in 0..self.num_slots {
                let bay = self.bays[aircraft * self.num_slots + slot];
                write!(f, " {:<8}", bay.get())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// The ordered collection of **all** accepted solutions of one problem
/// instance.
///
/// The sequential engine appends solutions in deterministic traversal order;
/// the parallel driver merges per-worker sets and imposes a total order with
/// [`SolutionSet::sort_canonical`]. An empty set is a valid, reportable
/// outcome, distinct from any error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SolutionSet {
    solutions: Vec<Solution>,
}

impl SolutionSet {
    /// Creates a new, empty `SolutionSet`.
    #[inline]
    pub fn new() -> Self {
        Self {
            solutions: Vec::new(),
        }
    }

    /// Creates a `SolutionSet` from a vector of solutions.
    #[inline]
    pub fn from_vec(solutions: Vec<Solution>) -> Self {
        Self { solutions }
    }

    /// Appends a solution to the set.
    #[inline]
    pub fn push(&mut self, solution: Solution) {
        self.solutions.push(solution);
    }

    /// Returns the number of solutions in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Returns `true` if the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Returns the solution at the given position in the set's order.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Solution> {
        self.solutions.get(index)
    }

    /// Returns an iterator over the solutions.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Sorts the set lexicographically by assignment vector.
    ///
    /// Different traversal partitions (e.g. the parallel driver's workers)
    /// discover the same solutions in different interleavings; the canonical
    /// sort imposes one total order so ordering-sensitive consumers see
    /// identical output regardless of how the set was produced.
    #[inline]
    pub fn sort_canonical(&mut self) {
        self.solutions.sort_unstable();
    }

    /// Merges another set into this one.
    #[inline]
    pub fn merge(&mut self, other: SolutionSet) {
        self.solutions.extend(other.solutions);
    }
}

impl IntoIterator for SolutionSet {
    type Item = Solution;
    type IntoIter = std::vec::IntoIter<Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.into_iter()
    }
}

impl<'a> IntoIterator for &'a SolutionSet {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

impl std::fmt::Display for SolutionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SolutionSet(len: {})", self.len())
    }
}
