// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::collections::VecDeque;

/// An iterator adapter that can look at any number of upcoming items
/// without consuming them.
///
/// `initial_capacity` is the number of items the lookahead buffer is
/// expected to hold; peeking further simply grows the buffer.
pub struct PeekableIter<'a, T> {
    upstream: &'a mut dyn Iterator<Item = T>,
    buffer: VecDeque<T>,
}

impl<'a, T> PeekableIter<'a, T> {
    pub fn new(upstream: &'a mut dyn Iterator<Item = T>, initial_capacity: usize) -> Self {
        Self {
            upstream,
            buffer: VecDeque::with_capacity(initial_capacity),
        }
    }

    /// Returns the item at `offset` (0 is the next item), or `None` if the
    /// upstream ends before it.
    pub fn peek(&mut self, offset: usize) -> Option<&T> {
        while self.buffer.len() <= offset {
            let item = self.upstream.next()?;
            self.buffer.push_back(item);
        }
        self.buffer.get(offset)
    }
}

impl<T> Iterator for PeekableIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        match self.buffer.pop_front() {
            Some(item) => Some(item),
            None => self.upstream.next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::PeekableIter;

    #[test]
    fn test_peekable_iter() {
        let mut chars = "abcd".chars();
        let mut iter = PeekableIter::new(&mut chars, 2);

        assert_eq!(iter.peek(0), Some(&'a'));
        assert_eq!(iter.peek(2), Some(&'c'));
        assert_eq!(iter.next(), Some('a'));
        assert_eq!(iter.peek(0), Some(&'b'));
        assert_eq!(iter.peek(2), Some(&'d'));
        assert_eq!(iter.peek(3), None);
        assert_eq!(iter.next(), Some('b'));
        assert_eq!(iter.next(), Some('c'));
        assert_eq!(iter.next(), Some('d'));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.peek(0), None);
    }
}
