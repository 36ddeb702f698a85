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

//! The apron grid layout.
//!
//! An apron is a `rows × cols` grid of cells, a subset of which are declared
//! as bays. Every declared bay belongs to exactly one of three categories:
//! `Standard` (general maintenance), `Specialized` (required for type-2
//! tasks), or `Parking` (no maintenance progress). The declared bay list is
//! the domain of every assignment variable.
//!
//! The layout precomputes, per bay, the number of in-bounds neighbor cells
//! (0 to 4) and the list of in-bounds neighbors that are themselves declared
//! bays. Undeclared in-bounds cells can never be occupied, so for the
//! maneuverability constraint they always count as free; the spatial
//! predicates therefore only ever need the declared-neighbor lists plus the
//! in-bounds count.

use crate::index::BayIndex;
use smallvec::SmallVec;

/// Sentinel in the dense cell → bay map for cells with no declared bay.
const NO_BAY: usize = usize::MAX;

/// The category of a declared bay position. Immutable once loaded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BayCategory {
    /// General maintenance bay; type-1 tasks can be performed here.
    Standard,
    /// Specialized maintenance bay; required for type-2 tasks, also
    /// suitable for type-1 tasks.
    Specialized,
    /// Parking position; no maintenance progress is made here.
    Parking,
}

impl BayCategory {
    /// Returns `true` if maintenance work can progress in this category.
    #[inline(always)]
    pub const fn is_workshop(&self) -> bool {
        matches!(self, BayCategory::Standard | BayCategory::Specialized)
    }

    /// The three-letter code used by the instance text format.
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            BayCategory::Standard => "STD",
            BayCategory::Specialized => "SPC",
            BayCategory::Parking => "PRK",
        }
    }
}

impl std::fmt::Display for BayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The kind of an aircraft. Only `Jumbo` triggers additional capacity and
/// adjacency rules; all other type codes collapse to `Standard`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AircraftKind {
    Standard,
    Jumbo,
}

impl std::fmt::Display for AircraftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AircraftKind::Standard => write!(f, "STD"),
            AircraftKind::Jumbo => write!(f, "JMB"),
        }
    }
}

/// The task-ordering restriction of an aircraft.
///
/// An `Ordered` aircraft must finish all of its type-2 work before it may
/// occupy a `Standard` bay or a `Parking` position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Restriction {
    None,
    Ordered,
}

impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Restriction::None => write!(f, "F"),
            Restriction::Ordered => write!(f, "T"),
        }
    }
}

/// The immutable apron grid: declared bays in SoA form, a dense reverse map
/// from cells to bays, and precomputed 4-neighborhoods.
#[derive(Clone, Debug)]
pub struct BayLayout {
    rows: usize,
    cols: usize,
    bay_rows: Vec<usize>,                       // len = num_bays
    bay_cols: Vec<usize>,                       // len = num_bays
    categories: Vec<BayCategory>,               // len = num_bays
    cell_to_bay: Vec<usize>,                    // len = rows * cols, NO_BAY sentinel
    neighbor_counts: Vec<u8>,                   // len = num_bays, in-bounds neighbor cells
    neighbor_bays: Vec<SmallVec<[BayIndex; 4]>>, // len = num_bays, declared neighbors only
}

impl BayLayout {
    /// Builds a layout from pre-validated bay declarations.
    ///
    /// The caller (normally `ModelBuilder::build`) must have verified that
    /// every `(row, col)` is inside the grid and that no cell is declared
    /// twice; this constructor only assembles the derived structures.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if a declaration violates the preconditions.
    pub(crate) fn new(rows: usize, cols: usize, bays: &[(usize, usize, BayCategory)]) -> Self {
        let num_bays = bays.len();
        let mut bay_rows = Vec::with_capacity(num_bays);
        let mut bay_cols = Vec::with_capacity(num_bays);
        let mut categories = Vec::with_capacity(num_bays);
        let mut cell_to_bay = vec![NO_BAY; rows * cols];

        for (index, &(row, col, category)) in bays.iter().enumerate() {
            debug_assert!(
                row < rows && col < cols,
                "called `BayLayout::new` with cell ({}, {}) outside the {}x{} grid",
                row,
                col,
                rows,
                cols
            );
            debug_assert!(
                cell_to_bay[row * cols + col] == NO_BAY,
                "called `BayLayout::new` with cell ({}, {}) declared twice",
                row,
                col
            );

            bay_rows.push(row);
            bay_cols.push(col);
            categories.push(category);
            cell_to_bay[row * cols + col] = index;
        }

        let mut neighbor_counts = Vec::with_capacity(num_bays);
        let mut neighbor_bays = Vec::with_capacity(num_bays);

        for bay in 0..num_bays {
            let row = bay_rows[bay];
            let col = bay_cols[bay];

            let mut count = 0u8;
            let mut declared: SmallVec<[BayIndex; 4]> = SmallVec::new();

            let mut visit = |r: usize, c: usize| {
                count += 1;
                let mapped = cell_to_bay[r * cols + c];
                if mapped != NO_BAY {
                    declared.push(BayIndex::new(mapped));
                }
            };

            if row > 0 {
                visit(row - 1, col);
            }
            if row + 1 < rows {
                visit(row + 1, col);
            }
            if col > 0 {
                visit(row, col - 1);
            }
            if col + 1 < cols {
                visit(row, col + 1);
            }

            neighbor_counts.push(count);
            neighbor_bays.push(declared);
        }

        Self {
            rows,
            cols,
            bay_rows,
            bay_cols,
            categories,
            cell_to_bay,
            neighbor_counts,
            neighbor_bays,
        }
    }

    /// Returns the number of grid rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of grid columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of declared bays.
    #[inline]
    pub fn num_bays(&self) -> usize {
        self.categories.len()
    }

    /// Returns the grid row of the specified bay.
    ///
    /// # Panics
    ///
    /// Panics if `bay` is not in `0..num_bays()`.
    #[inline]
    pub fn bay_row(&self, bay: BayIndex) -> usize {
        let index = bay.get();
        debug_assert!(
            index < self.num_bays(),
            "called `BayLayout::bay_row` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays(),
            index
        );

        self.bay_rows[index]
    }

    /// Returns the grid column of the specified bay.
    ///
    /// # Panics
    ///
    /// Panics if `bay` is not in `0..num_bays()`.
    #[inline]
    pub fn bay_col(&self, bay: BayIndex) -> usize {
        let index = bay.get();
        debug_assert!(
            index < self.num_bays(),
            "called `BayLayout::bay_col` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays(),
            index
        );

        self.bay_cols[index]
    }

    /// Returns the category of the specified bay.
    ///
    /// This is the O(1) category lookup the reporting layer relies on.
    ///
    /// # Panics
    ///
    /// Panics if `bay` is not in `0..num_bays()`.
    #[inline]
    pub fn bay_category(&self, bay: BayIndex) -> BayCategory {
        let index = bay.get();
        debug_assert!(
            index < self.num_bays(),
            "called `BayLayout::bay_category` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays(),
            index
        );

        self.categories[index]
    }

    /// Returns the category of the specified bay without bounds checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `bay` is within `0..num_bays()`. Undefined
    /// behavior may occur if this precondition is violated.
    #[inline]
    pub unsafe fn bay_category_unchecked(&self, bay: BayIndex) -> BayCategory {
        let index = bay.get();
        debug_assert!(
            index < self.num_bays(),
            "called `BayLayout::bay_category_unchecked` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays(),
            index
        );

        unsafe { *self.categories.get_unchecked(index) }
    }

    /// Returns the bay declared at the given cell, if any.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` lies outside the grid.
    #[inline]
    pub fn bay_at(&self, row: usize, col: usize) -> Option<BayIndex> {
        debug_assert!(
            row < self.rows && col < self.cols,
            "called `BayLayout::bay_at` with cell ({}, {}) outside the {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );

        match self.cell_to_bay[row * self.cols + col] {
            NO_BAY => None,
            index => Some(BayIndex::new(index)),
        }
    }

    /// Returns the number of in-bounds neighbor cells of the specified bay
    /// (0 to 4), counting both declared and undeclared cells.
    ///
    /// # Panics
    ///
    /// Panics if `bay` is not in `0..num_bays()`.
    #[inline]
    pub fn in_bounds_neighbor_count(&self, bay: BayIndex) -> usize {
        let index = bay.get();
        debug_assert!(
            index < self.num_bays(),
            "called `BayLayout::in_bounds_neighbor_count` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays(),
            index
        );

        self.neighbor_counts[index] as usize
    }

    /// Returns the declared bays 4-adjacent to the specified bay.
    ///
    /// # Panics
    ///
    /// Panics if `bay` is not in `0..num_bays()`.
    #[inline]
    pub fn neighbor_bays(&self, bay: BayIndex) -> &[BayIndex] {
        let index = bay.get();
        debug_assert!(
            index < self.num_bays(),
            "called `BayLayout::neighbor_bays` with bay index out of bounds: the len is {} but the index is {}",
            self.num_bays(),
            index
        );

        &self.neighbor_bays[index]
    }

    /// Returns `true` if the specified bay has at least one in-bounds
    /// neighbor cell that is not a declared bay. Such a cell can never be
    /// occupied, so the bay trivially satisfies the maneuverability rule.
    #[inline]
    pub fn has_undeclared_neighbor(&self, bay: BayIndex) -> bool {
        self.neighbor_bays(bay).len() < self.in_bounds_neighbor_count(bay)
    }

    /// Returns an iterator over all bay indices.
    #[inline]
    pub fn bays(&self) -> impl Iterator<Item = BayIndex> + '_ {
        (0..self.num_bays()).map(BayIndex::new)
    }
}

impl std::fmt::Display for BayLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BayLayout({}x{} grid, {} bays)",
            self.rows,
            self.cols,
            self.num_bays()
        )
    }
}
