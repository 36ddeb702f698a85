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

//! # Apron Model
//!
//! **The Core Domain Model for the Apron Maintenance Scheduling Solver.**
//!
//! This crate defines the fundamental data structures used to represent the
//! aircraft maintenance bay allocation problem: a fleet of aircraft must be
//! assigned to physical bay positions on a 2-D apron grid, once per discrete
//! time slot, subject to capacity, task-completion, precedence, and spatial
//! safety constraints. It serves as the data interchange layer between the
//! problem definition (user input) and the enumeration engine
//! (`apron_solver`).
//!
//! ## Architecture
//!
//! The crate is designed around a strict separation of concerns between
//! **construction** and **solving**:
//!
//! * **`index`**: Strongly-typed wrappers (`AircraftIndex`, `SlotIndex`,
//!   `BayIndex`, `VariableIndex`) to prevent logical indexing errors.
//! * **`layout`**: The apron grid: bay positions, their categories, and
//!   precomputed 4-neighborhoods for the spatial constraints.
//! * **`model`**: The `Model` (immutable, optimized for solving) and
//!   `ModelBuilder` (mutable, optimized for configuration, validating
//!   eagerly with `ConfigurationError`).
//! * **`solution`**: The output format: one total assignment per
//!   `Solution`, and the `SolutionSet` holding **every** feasible assignment
//!   the engine enumerates.
//! * **`loading`**: A text-format loader for problem instances.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Indices are distinct types. You cannot accidentally
//!     use an `AircraftIndex` to access a bay.
//! 2.  **Memory Layout**: Data is stored in **Structure of Arrays (SoA)**
//!     format (flattened vectors) rather than Arrays of Structures (AoS) to
//!     maximize cache locality during the depth-first search.
//! 3.  **Fail-Fast**: Builders and loaders validate inputs eagerly so the
//!     solver never encounters an invalid problem definition; the search
//!     itself never fails, it merely enumerates zero or more solutions.

pub mod index;
pub mod layout;
pub mod loading;
pub mod model;
pub mod solution;
