// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::Range;

use crate::flags::Flags;

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize, // excluded
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Counter {
    pub count: usize,

    // where the current iteration began, an iteration that consumes
    // nothing is rejected once the minimum count is reached.
    pub iteration_start: usize,
}

// Every change of the matching state is recorded, so that backtracking
// can restore the state by undoing the changes in reverse order.
#[derive(Debug)]
enum TrailEntry {
    CaptureStart(usize, Option<usize>),
    MatchRange(usize, Option<MatchRange>),
    CounterPushed,
    CounterPopped(Counter),
    CounterChanged(Counter),
}

/// The state of one matching attempt.
pub struct Context<'a> {
    pub text: &'a str,
    pub flags: Flags,

    capture_starts: Vec<Option<usize>>,
    match_ranges: Vec<Option<MatchRange>>,
    counters: Vec<Counter>,
    trail: Vec<TrailEntry>,
}

impl<'a> Context<'a> {
    pub fn new(text: &'a str, flags: Flags, capture_group_count: usize) -> Self {
        Context {
            text,
            flags,
            capture_starts: vec![None; capture_group_count],
            match_ranges: vec![None; capture_group_count],
            counters: vec![],
            trail: vec![],
        }
    }

    /// Clear all captures and counters before matching at a new position.
    pub fn reset(&mut self) {
        self.capture_starts.fill(None);
        self.match_ranges.fill(None);
        self.counters.clear();
        self.trail.clear();
    }

    pub fn match_ranges(&self) -> &[Option<MatchRange>] {
        &self.match_ranges
    }

    pub fn get_match_range(&self, capture_group_index: usize) -> Option<MatchRange> {
        self.match_ranges.get(capture_group_index).copied().flatten()
    }

    pub fn get_capture_start(&self, capture_group_index: usize) -> Option<usize> {
        self.capture_starts.get(capture_group_index).copied().flatten()
    }

    pub fn set_capture_start(&mut self, capture_group_index: usize, position: usize) {
        let previous = self.capture_starts[capture_group_index].replace(position);
        self.trail
            .push(TrailEntry::CaptureStart(capture_group_index, previous));
    }

    pub fn set_match_range(&mut self, capture_group_index: usize, match_range: Option<MatchRange>) {
        let previous = std::mem::replace(&mut self.match_ranges[capture_group_index], match_range);
        self.trail
            .push(TrailEntry::MatchRange(capture_group_index, previous));
    }

    pub fn clear_match_ranges(&mut self, capture_group_indices: Range<usize>) {
        for capture_group_index in capture_group_indices {
            if self.match_ranges[capture_group_index].is_some() {
                self.set_match_range(capture_group_index, None);
            }
        }
    }

    pub fn push_counter(&mut self, counter: Counter) {
        self.counters.push(counter);
        self.trail.push(TrailEntry::CounterPushed);
    }

    pub fn pop_counter(&mut self) -> Option<Counter> {
        let counter = self.counters.pop()?;
        self.trail.push(TrailEntry::CounterPopped(counter));
        Some(counter)
    }

    pub fn peek_counter(&self) -> Option<Counter> {
        self.counters.last().copied()
    }

    pub fn update_counter(&mut self, counter: Counter) {
        if let Some(last) = self.counters.last_mut() {
            let previous = std::mem::replace(last, counter);
            self.trail.push(TrailEntry::CounterChanged(previous));
        }
    }

    /// The current length of the trail, pass it to `rewind` to restore the
    /// state of this moment.
    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    pub fn rewind(&mut self, mark: usize) {
        while self.trail.len() > mark {
            let Some(entry) = self.trail.pop() else {
                break;
            };

            match entry {
                TrailEntry::CaptureStart(index, previous) => {
                    self.capture_starts[index] = previous;
                }
                TrailEntry::MatchRange(index, previous) => {
                    self.match_ranges[index] = previous;
                }
                TrailEntry::CounterPushed => {
                    self.counters.pop();
                }
                TrailEntry::CounterPopped(counter) => {
                    self.counters.push(counter);
                }
                TrailEntry::CounterChanged(previous) => {
                    if let Some(last) = self.counters.last_mut() {
                        *last = previous;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::flags::Flags;

    use super::{Context, Counter, MatchRange};

    #[test]
    fn test_rewind() {
        let mut context = Context::new("abc", Flags::default(), 2);

        context.set_capture_start(1, 0);
        context.set_match_range(1, Some(MatchRange { start: 0, end: 1 }));
        context.push_counter(Counter {
            count: 0,
            iteration_start: 0,
        });

        let mark = context.mark();

        context.set_capture_start(1, 1);
        context.set_match_range(1, Some(MatchRange { start: 1, end: 3 }));
        context.update_counter(Counter {
            count: 1,
            iteration_start: 1,
        });
        context.pop_counter();
        context.clear_match_ranges(0..2);

        assert_eq!(context.get_match_range(1), None);
        assert_eq!(context.peek_counter(), None);

        context.rewind(mark);

        assert_eq!(context.get_capture_start(1), Some(0));
        assert_eq!(
            context.get_match_range(1),
            Some(MatchRange { start: 0, end: 1 })
        );
        assert_eq!(
            context.peek_counter(),
            Some(Counter {
                count: 0,
                iteration_start: 0
            })
        );

        context.rewind(0);
        assert_eq!(context.get_capture_start(1), None);
        assert_eq!(context.match_ranges(), &[None, None]);
        assert_eq!(context.peek_counter(), None);
    }
}
