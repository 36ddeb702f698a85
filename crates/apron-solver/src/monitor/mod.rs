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

//! Search monitoring.
//!
//! Monitors observe the search lifecycle and can command cooperative
//! termination without the engine knowing why. The engine calls back on
//! every step, descend, backtrack, prune, and recorded solution, and polls
//! `search_command` once per loop iteration.
//!
//! The enumeration contract is unaffected by monitors that merely observe;
//! a monitor that terminates the search turns the outcome into `Aborted`,
//! marking the solution set as potentially partial.

pub mod composite;
pub mod interrupt;
pub mod log;
pub mod no_op;
pub mod search_monitor;
pub mod solution;
pub mod time_limit;
