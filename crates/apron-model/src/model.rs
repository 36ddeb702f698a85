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
    index::{AircraftIndex, BayIndex, SlotIndex, VariableIndex, variable_index},
    layout::{AircraftKind, BayCategory, BayLayout, Restriction},
};

/// Represents the theoretical search space size of the bay allocation
/// problem.
///
/// Every one of the $A \cdot T$ assignment variables ranges over all $B$
/// declared bays, so the raw space holds $B^{A \cdot T}$ total assignments.
/// Since this exceeds standard integer limits very quickly, the value is
/// stored in **Logarithmic Space** ($\log_{10}$).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct Complexity {
    /// The base-10 logarithm of the total search space size.
    log_val: f64,
}

impl Complexity {
    /// Calculates the complexity for the given problem dimensions.
    pub fn new(num_aircraft: usize, num_slots: usize, num_bays: usize) -> Self {
        let num_variables = num_aircraft * num_slots;
        if num_variables == 0 {
            return Complexity { log_val: 0.0 }; // a single empty assignment
        }

        let bay_log = if num_bays > 0 {
            (num_bays as f64).log10()
        } else {
            0.0
        };

        Complexity {
            log_val: num_variables as f64 * bay_log,
        }
    }

    /// Returns the percentage of the search space that was actually explored.
    /// Returns `None` if the space is too massive to represent as `f64`.
    pub fn coverage(&self, nodes_explored: u64) -> Option<f64> {
        if self.log_val > 15.0 {
            return Some(0.0);
        }

        let total_size = 10.0_f64.powf(self.log_val);
        if total_size == 0.0 {
            return None;
        }

        Some((nodes_explored as f64 / total_size) * 100.0)
    }

    /// Returns the exponent (order of magnitude).
    #[inline]
    pub fn exponent(&self) -> u64 {
        self.log_val.floor() as u64
    }

    /// Returns the mantissa (coefficient).
    #[inline]
    pub fn mantissa(&self) -> f64 {
        let fractional_part = self.log_val - self.log_val.floor();
        10.0_f64.powf(fractional_part)
    }

    /// Returns the raw log10 value.
    #[inline]
    pub fn raw(&self) -> f64 {
        self.log_val
    }
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} × 10^{}", self.mantissa(), self.exponent())
    }
}

impl std::fmt::Debug for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Complexity(log10={:.4})", self.log_val)
    }
}

/// The error type for malformed or inconsistent problem definitions.
///
/// A `ConfigurationError` is fatal: it is raised by `ModelBuilder::build`
/// before any search begins and is never recovered. An empty solution set,
/// by contrast, is *not* an error; it is a valid, reportable outcome of a
/// well-formed problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The slot count must be a positive integer.
    NonPositiveSlotCount,
    /// A bay was declared outside the grid bounds.
    BayOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    /// The same cell was declared as a bay more than once, either within one
    /// category or across categories.
    DuplicateBay { row: usize, col: usize },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveSlotCount => {
                write!(f, "The slot count must be a positive integer")
            }
            Self::BayOutOfBounds {
                row,
                col,
                rows,
                cols,
            } => write!(
                f,
                "Bay ({}, {}) lies outside the {}x{} grid",
                row, col, rows, cols
            ),
            Self::DuplicateBay { row, col } => {
                write!(f, "Cell ({}, {}) is declared as a bay more than once", row, col)
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// The immutable data model describing the apron grid, the planning horizon,
/// and the aircraft fleet.
///
/// This struct holds all pre-validated, queryable data:
/// - the [`BayLayout`] with bay categories and precomputed neighborhoods,
/// - `num_slots`: the number of discrete time slots,
/// - `kinds[aircraft]` / `restrictions[aircraft]`: fleet attributes,
/// - `type1_counts[aircraft]` / `type2_counts[aircraft]`: required work units.
///
/// Construction:
/// - Use `ModelBuilder` and call `ModelBuilder::build` to obtain a validated
///   `Model`. The builder fails fast with [`ConfigurationError`] on malformed
///   input; the engine never sees an invalid model.
#[derive(Clone, Debug)]
pub struct Model {
    layout: BayLayout,
    num_slots: usize,
    kinds: Vec<AircraftKind>,         // len = num_aircraft
    restrictions: Vec<Restriction>,   // len = num_aircraft
    type1_counts: Vec<u32>,           // len = num_aircraft
    type2_counts: Vec<u32>,           // len = num_aircraft
}

impl Model {
    /// Returns the apron layout.
    #[inline]
    pub fn layout(&self) -> &BayLayout {
        &self.layout
    }

    /// Returns the number of time slots in the planning horizon.
    #[inline]
    pub fn num_slots(&self) -> usize {
        self.num_slots
    }

    /// Returns the number of aircraft in the fleet.
    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.kinds.len()
    }

    /// Returns the number of declared bays (the domain size of every
    /// assignment variable).
    #[inline]
    pub fn num_bays(&self) -> usize {
        self.layout.num_bays()
    }

    /// Returns the number of assignment variables (`num_aircraft × num_slots`).
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.num_aircraft() * self.num_slots
    }

    /// Returns the complexity of the model's search space.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use apron_model::model::ModelBuilder;
    /// # use apron_model::layout::{AircraftKind, BayCategory, Restriction};
    ///
    /// let mut builder = ModelBuilder::new(2, 1, 2);
    /// builder
    ///     .add_bay(0, 0, BayCategory::Standard)
    ///     .add_bay(0, 1, BayCategory::Parking)
    ///     .add_aircraft(AircraftKind::Standard, Restriction::None, 1, 0);
    /// let model = builder.build().unwrap();
    /// // 2 variables over 2 bays: 2^2 = 4 total assignments.
    /// assert!((model.complexity().raw() - 4f64.log10()).abs() < 1e-12);
    /// ```
    #[inline]
    pub fn complexity(&self) -> Complexity {
        Complexity::new(self.num_aircraft(), self.num_slots, self.num_bays())
    }

    /// Flattens an `(aircraft, slot)` pair into its variable index.
    #[inline(always)]
    pub fn variable(&self, aircraft: AircraftIndex, slot: SlotIndex) -> VariableIndex {
        variable_index(self.num_slots, aircraft, slot)
    }

    /// Returns the aircraft component of a variable index.
    #[inline(always)]
    pub fn aircraft_of(&self, variable: VariableIndex) -> AircraftIndex {
        crate::index::aircraft_of(self.num_slots, variable)
    }

    /// Returns the slot component of a variable index.
    #[inline(always)]
    pub fn slot_of(&self, variable: VariableIndex) -> SlotIndex {
        crate::index::slot_of(self.num_slots, variable)
    }

    /// Returns the category of the specified bay in O(1).
    #[inline]
    pub fn bay_category(&self, bay: BayIndex) -> BayCategory {
        self.layout.bay_category(bay)
    }

    /// Returns the kind of the specified aircraft.
    ///
    /// # Panics
    ///
    /// Panics if `aircraft` is not in `0..num_aircraft()`.
    #[inline]
    pub fn aircraft_kind(&self, aircraft: AircraftIndex) -> AircraftKind {
        let index = aircraft.get();
        debug_assert!(
            index < self.num_aircraft(),
            "called `Model::aircraft_kind` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            index
        );

        self.kinds[index]
    }

    /// Returns the restriction of the specified aircraft.
    ///
    /// # Panics
    ///
    /// Panics if `aircraft` is not in `0..num_aircraft()`.
    #[inline]
    pub fn restriction(&self, aircraft: AircraftIndex) -> Restriction {
        let index = aircraft.get();
        debug_assert!(
            index < self.num_aircraft(),
            "called `Model::restriction` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            index
        );

        self.restrictions[index]
    }

    /// Returns the number of required type-1 work units of the specified
    /// aircraft.
    ///
    /// # Panics
    ///
    /// Panics if `aircraft` is not in `0..num_aircraft()`.
    #[inline]
    pub fn type1_count(&self, aircraft: AircraftIndex) -> u32 {
        let index = aircraft.get();
        debug_assert!(
            index < self.num_aircraft(),
            "called `Model::type1_count` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            index
        );

        self.type1_counts[index]
    }

    /// Returns the number of required type-2 work units of the specified
    /// aircraft. Type-2 work must be performed in `Specialized` bays.
    ///
    /// # Panics
    ///
    /// Panics if `aircraft` is not in `0..num_aircraft()`.
    #[inline]
    pub fn type2_count(&self, aircraft: AircraftIndex) -> u32 {
        let index = aircraft.get();
        debug_assert!(
            index < self.num_aircraft(),
            "called `Model::type2_count` with aircraft index out of bounds: the len is {} but the index is {}",
            self.num_aircraft(),
            index
        );

        self.type2_counts[index]
    }

    /// Returns the total number of required work units of the specified
    /// aircraft (`type1 + type2`).
    #[inline]
    pub fn total_task_count(&self, aircraft: AircraftIndex) -> u32 {
        self.type1_count(aircraft) + self.type2_count(aircraft)
    }

    /// Returns `true` if the specified aircraft is a `Jumbo`.
    #[inline]
    pub fn is_jumbo(&self, aircraft: AircraftIndex) -> bool {
        self.aircraft_kind(aircraft) == AircraftKind::Jumbo
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Model(num_aircraft: {}, num_slots: {}, num_bays: {})",
            self.num_aircraft(),
            self.num_slots,
            self.num_bays()
        )
    }
}

/// Mutable builder for [`Model`].
///
/// The builder starts from an empty apron and an empty fleet; bays and
/// aircraft are appended with `add_bay` / `add_aircraft`, and `build`
/// validates the accumulated definition eagerly:
///
/// 1. **Positive horizon:** the slot count must be strictly positive.
/// 2. **Grid containment:** every declared bay must lie inside the grid.
/// 3. **Disjoint categories:** no cell may be declared twice; the three
///    category sets are disjoint by construction.
///
/// # Note on feasibility
///
/// A valid model is not necessarily satisfiable. An apron with too few
/// workshop bays, or a fleet too large for the grid, simply yields an empty
/// solution set; only *structural* defects are configuration errors.
#[derive(Clone, Debug)]
pub struct ModelBuilder {
    num_slots: usize,
    rows: usize,
    cols: usize,
    bays: Vec<(usize, usize, BayCategory)>,
    kinds: Vec<AircraftKind>,
    restrictions: Vec<Restriction>,
    type1_counts: Vec<u32>,
    type2_counts: Vec<u32>,
}

impl ModelBuilder {
    /// Creates a new `ModelBuilder` for the given planning horizon and grid
    /// dimensions.
    pub fn new(num_slots: usize, rows: usize, cols: usize) -> Self {
        Self {
            num_slots,
            rows,
            cols,
            bays: Vec::new(),
            kinds: Vec::new(),
            restrictions: Vec::new(),
            type1_counts: Vec::new(),
            type2_counts: Vec::new(),
        }
    }

    /// Returns the number of declared bays so far.
    #[inline]
    pub fn num_bays(&self) -> usize {
        self.bays.len()
    }

    /// Returns the number of declared aircraft so far.
    #[inline]
    pub fn num_aircraft(&self) -> usize {
        self.kinds.len()
    }

    /// Declares a bay at the given cell with the given category.
    ///
    /// Validation happens in `build`; declaring an out-of-bounds or
    /// duplicate cell here is accepted and rejected later.
    #[inline]
    pub fn add_bay(&mut self, row: usize, col: usize, category: BayCategory) -> &mut Self {
        self.bays.push((row, col, category));
        self
    }

    /// Declares multiple bays of one category.
    pub fn add_bays<I>(&mut self, category: BayCategory, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        for (row, col) in cells {
            self.bays.push((row, col, category));
        }
        self
    }

    /// Appends an aircraft to the fleet. The aircraft's index (and identity)
    /// is its position in insertion order.
    #[inline]
    pub fn add_aircraft(
        &mut self,
        kind: AircraftKind,
        restriction: Restriction,
        type1_count: u32,
        type2_count: u32,
    ) -> &mut Self {
        self.kinds.push(kind);
        self.restrictions.push(restriction);
        self.type1_counts.push(type1_count);
        self.type2_counts.push(type2_count);
        self
    }

    /// Validates the accumulated definition and builds the immutable
    /// [`Model`].
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if the slot count is zero, a bay lies
    /// outside the grid, or a cell is declared twice.
    pub fn build(&self) -> Result<Model, ConfigurationError> {
        if self.num_slots == 0 {
            return Err(ConfigurationError::NonPositiveSlotCount);
        }

        let mut seen = vec![false; self.rows * self.cols];
        for &(row, col, _) in &self.bays {
            if row >= self.rows || col >= self.cols {
                return Err(ConfigurationError::BayOutOfBounds {
                    row,
                    col,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
            let cell = row * self.cols + col;
            if seen[cell] {
                return Err(ConfigurationError::DuplicateBay { row, col });
            }
            seen[cell] = true;
        }

        Ok(Model {
            layout: BayLayout::new(self.rows, self.cols, &self.bays),
            num_slots: self.num_slots,
            kinds: self.kinds.clone(),
            restrictions: self.restrictions.clone(),
            type1_counts: self.type1_counts.clone(),
            type2_counts: self.type2_counts.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(i: usize) -> AircraftIndex {
        AircraftIndex::new(i)
    }

    fn b(i: usize) -> BayIndex {
        BayIndex::new(i)
    }

    #[test]
    fn test_build_valid_model() {
        let mut builder = ModelBuilder::new(3, 2, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Specialized)
            .add_bay(1, 0, BayCategory::Parking)
            .add_aircraft(AircraftKind::Jumbo, Restriction::Ordered, 1, 2)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);

        let model = builder.build().expect("model must build");
        assert_eq!(model.num_slots(), 3);
        assert_eq!(model.num_aircraft(), 2);
        assert_eq!(model.num_bays(), 3);
        assert_eq!(model.num_variables(), 6);

        assert_eq!(model.aircraft_kind(a(0)), AircraftKind::Jumbo);
        assert!(model.is_jumbo(a(0)));
        assert!(!model.is_jumbo(a(1)));
        assert_eq!(model.restriction(a(0)), Restriction::Ordered);
        assert_eq!(model.type1_count(a(0)), 1);
        assert_eq!(model.type2_count(a(0)), 2);
        assert_eq!(model.total_task_count(a(0)), 3);
        assert_eq!(model.bay_category(b(2)), BayCategory::Parking);
    }

    #[test]
    fn test_zero_slots_is_a_configuration_error() {
        let mut builder = ModelBuilder::new(0, 1, 1);
        builder.add_bay(0, 0, BayCategory::Standard);
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigurationError::NonPositiveSlotCount
        );
    }

    #[test]
    fn test_out_of_bounds_bay_is_a_configuration_error() {
        let mut builder = ModelBuilder::new(1, 2, 2);
        builder.add_bay(2, 0, BayCategory::Standard);
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigurationError::BayOutOfBounds {
                row: 2,
                col: 0,
                rows: 2,
                cols: 2
            }
        );
    }

    #[test]
    fn test_duplicate_bay_is_a_configuration_error() {
        // The same cell in two different categories must be rejected; the
        // category sets are required to be disjoint.
        let mut builder = ModelBuilder::new(1, 2, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 0, BayCategory::Parking);
        assert_eq!(
            builder.build().unwrap_err(),
            ConfigurationError::DuplicateBay { row: 0, col: 0 }
        );
    }

    #[test]
    fn test_variable_flattening_accessors() {
        let mut builder = ModelBuilder::new(2, 1, 2);
        builder
            .add_bay(0, 0, BayCategory::Standard)
            .add_bay(0, 1, BayCategory::Parking)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0)
            .add_aircraft(AircraftKind::Standard, Restriction::None, 0, 0);
        let model = builder.build().unwrap();

        let v = model.variable(a(1), crate::index::SlotIndex::new(1));
        assert_eq!(v.get(), 3);
        assert_eq!(model.aircraft_of(v), a(1));
        assert_eq!(model.slot_of(v).get(), 1);
    }

    #[test]
    fn test_complexity_of_empty_fleet_is_single_assignment() {
        let mut builder = ModelBuilder::new(4, 1, 1);
        builder.add_bay(0, 0, BayCategory::Standard);
        let model = builder.build().unwrap();
        assert_eq!(model.complexity().raw(), 0.0);
        assert_eq!(model.complexity().coverage(1), Some(100.0));
    }

    #[test]
    fn test_complexity_display() {
        let complexity = Complexity::new(2, 3, 10);
        // 10^6 total assignments.
        assert_eq!(complexity.exponent(), 6);
        assert!((complexity.mantissa() - 1.0).abs() < 1e-9);
        assert_eq!(format!("{}", complexity), "1.00 × 10^6");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = ConfigurationError::BayOutOfBounds {
            row: 3,
            col: 1,
            rows: 2,
            cols: 2,
        };
        assert_eq!(err.to_string(), "Bay (3, 1) lies outside the 2x2 grid");
    }
}
