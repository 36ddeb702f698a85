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

//! Apron-Solver: exhaustive search for maintenance bay allocation
//!
//! High-level crate that implements a deterministic, modular depth-first
//! enumeration engine for the aircraft maintenance bay allocation problem.
//! The solver separates variable ordering, constraint checking, and
//! monitoring so you can swap strategies without touching core search logic.
//!
//! Core flow
//! - Provide an `apron_model::model::Model`.
//! - Build a `constraints::ConstraintSet` (normally `ConstraintSet::standard`).
//! - Choose a `branching::VariableOrder` (aircraft-major or slot-major).
//! - Optionally set fixed assignments and monitors.
//! - Run `dfs::ExhaustiveSolver` directly, or fan out with `parallel`.
//!
//! Design highlights
//! - Complete enumeration: every total assignment satisfying all constraints
//!   is collected; there is no incumbent, no bound, and no early exit on the
//!   first solution. An empty solution set is a valid outcome.
//! - Scope-triggered checking: each constraint declares the aircraft or slot
//!   whose variables it ranges over and is evaluated exactly when that scope
//!   becomes fully bound, never earlier and never redundantly later.
//! - Tight inner loop: state is mutated in place and restored via a trail;
//!   no per-branch copies of the working assignment are made.
//! - Deterministic given a fixed variable order and the ascending bay value
//!   order; re-running an unchanged instance reproduces the identical set.
//!
//! Module map
//! - `state`: the mutable working assignment with scope counters.
//! - `trail`: undo log for backtracking.
//! - `stack`: frame-structured stack of pending decisions.
//! - `branching`: decisions and variable-ordering strategies.
//! - `constraints`: the five constraint predicate families and their registry.
//! - `dfs`: the enumeration engine and session orchestration.
//! - `monitor`: search monitors (log, limits, interrupt, composite).
//! - `parallel`: root-domain partitioning across scoped threads.
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.
//! - `fixed`: pre-bound assignments for subtree pinning and warm starts.

pub mod branching;
pub mod constraints;
pub mod dfs;
pub mod fixed;
pub mod monitor;
pub mod parallel;
pub mod result;
pub mod stack;
pub mod state;
pub mod stats;
pub mod trail;
