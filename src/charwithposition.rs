// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::str::Chars;

use crate::location::Location;

#[derive(Debug, PartialEq)]
pub struct CharWithPosition {
    pub character: char,
    pub position: Location,
}

impl CharWithPosition {
    pub fn new(character: char, position: Location) -> Self {
        Self {
            character,
            position,
        }
    }
}

/// Iterates over the chars of a pattern together with their positions.
///
/// The ECMAScript line terminators (LF, CR, LS and PS) start a new line,
/// and a CR LF pair counts as a single line break.
pub struct CharsWithPositionIter<'a> {
    upstream: Chars<'a>,
    next_position: Location,

    // the column of the previous char if it was a CR
    carriage_return_column: Option<usize>,
}

impl<'a> CharsWithPositionIter<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            upstream: text.chars(),
            next_position: Location::default(),
            carriage_return_column: None,
        }
    }
}

impl Iterator for CharsWithPositionIter<'_> {
    type Item = CharWithPosition;

    fn next(&mut self) -> Option<Self::Item> {
        let character = self.upstream.next()?;

        let position = match (character, self.carriage_return_column) {
            ('\n', Some(column)) => Location::new_position(
                self.next_position.index,
                self.next_position.line - 1,
                column + 1,
            ),
            _ => self.next_position,
        };

        self.next_position.index += 1;

        if character == '\n' && self.carriage_return_column.is_some() {
            // the line has been advanced by the CR already
        } else if is_line_terminator(character) {
            self.next_position.line += 1;
            self.next_position.column = 0;
        } else {
            self.next_position.column += 1;
        }

        self.carriage_return_column = if character == '\r' {
            Some(position.column)
        } else {
            None
        };

        Some(CharWithPosition::new(character, position))
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        charwithposition::{CharWithPosition, CharsWithPositionIter},
        location::Location,
    };

    fn collect_positions(text: &str) -> Vec<(char, usize, usize, usize)> {
        CharsWithPositionIter::new(text)
            .map(
                |CharWithPosition {
                     character,
                     position,
                 }| (character, position.index, position.line, position.column),
            )
            .collect()
    }

    #[test]
    fn test_chars_with_position_iter() {
        let mut iter = CharsWithPositionIter::new("ab");
        assert_eq!(
            iter.next(),
            Some(CharWithPosition::new('a', Location::new_position(0, 0, 0)))
        );
        assert_eq!(
            iter.next(),
            Some(CharWithPosition::new('b', Location::new_position(1, 0, 1)))
        );
        assert!(iter.next().is_none());

        assert_eq!(
            collect_positions("a\nmn\u{2028}x"),
            vec![
                ('a', 0, 0, 0),
                ('\n', 1, 0, 1),
                ('m', 2, 1, 0),
                ('n', 3, 1, 1),
                ('\u{2028}', 4, 1, 2),
                ('x', 5, 2, 0),
            ]
        );
    }

    #[test]
    fn test_chars_with_position_iter_crlf() {
        assert_eq!(
            collect_positions("a\r\nb\r\rc"),
            vec![
                ('a', 0, 0, 0),
                ('\r', 1, 0, 1),
                ('\n', 2, 0, 2),
                ('b', 3, 1, 0),
                ('\r', 4, 1, 1),
                ('\r', 5, 2, 0),
                ('c', 6, 3, 0),
            ]
        );
    }
}
