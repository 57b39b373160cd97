// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::fmt::Display;

/// A position or a span inside the pattern text.
///
/// All fields count chars (Unicode scalar values), not bytes.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Location {
    pub index: usize,  // The char index in the pattern
    pub line: usize,   // The line number (0-based index)
    pub column: usize, // The column number (0-based index)
    pub length: usize, // The length of the span; 0 for a single position
}

impl Location {
    pub fn new_position(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
            length: 0,
        }
    }

    pub fn new_range(index: usize, line: usize, column: usize, length: usize) -> Self {
        Self {
            index,
            line,
            column,
            length,
        }
    }

    /// A span of `length` chars that starts at `position`.
    pub fn from_position_and_length(position: &Location, length: usize) -> Self {
        Self::new_range(position.index, position.line, position.column, length)
    }

    /// A span from `position_start` to `position_end_included`, both ends inclusive.
    pub fn from_position_pair_with_end_included(
        position_start: &Location,
        position_end_included: &Location,
    ) -> Self {
        Self::new_range(
            position_start.index,
            position_start.line,
            position_start.column,
            position_end_included.index - position_start.index + 1,
        )
    }

    pub fn get_position_by_range_start(&self) -> Self {
        Self::new_position(self.index, self.line, self.column)
    }

    /// The position of the next char on the same line.
    pub fn move_position_forward(&self) -> Self {
        Self {
            index: self.index + 1,
            column: self.column + 1,
            length: 0,
            ..*self
        }
    }
}

impl Display for Location {
    // Lines and columns are printed 1-based.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "at line {}, column {}", self.line + 1, self.column + 1)
    }
}
