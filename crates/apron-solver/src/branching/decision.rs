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

use apron_model::index::{BayIndex, VariableIndex};

/// A decision to bind one assignment variable to one bay.
///
/// All decisions of one stack level concern the same variable; the engine
/// enqueues them so they pop in ascending bay order, which keeps the
/// traversal deterministic and with it the order of the enumerated
/// solution set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decision {
    variable: VariableIndex,
    bay: BayIndex,
}

impl Decision {
    /// Creates a new `Decision`.
    #[inline(always)]
    pub const fn new(variable: VariableIndex, bay: BayIndex) -> Self {
        Self { variable, bay }
    }

    /// Returns the variable to be bound.
    #[inline(always)]
    pub const fn variable(&self) -> VariableIndex {
        self.variable
    }

    /// Returns the bay the variable is bound to.
    #[inline(always)]
    pub const fn bay(&self) -> BayIndex {
        self.bay
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Decision(variable: {}, bay: {})",
            self.variable.get(),
            self.bay.get()
        )
    }
}
