// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{fmt::Display, ops::Range};

use crate::{
    ast::{AnchorAssertionName, BoundaryAssertionName},
    context::{Context, Counter, MatchRange},
    object_file::ObjectFile,
    process::start_route,
    utf8reader::{get_position_by_chars_backward, read_char, read_previous_char},
};

#[derive(Debug)]
pub enum Transition {
    Jump(JumpTransition),
    Char(CharTransition),
    String(StringTransition),
    AnyChar(AnyCharTransition),
    CharSet(CharSetTransition),
    BackReference(BackReferenceTransition),
    AnchorAssertion(AnchorAssertionTransition),
    BoundaryAssertion(BoundaryAssertionTransition),

    // capture
    CaptureStart(CaptureStartTransition),
    CaptureEnd(CaptureEndTransition),

    // repetition
    CounterReset(CounterResetTransition),
    CounterSave(CounterSaveTransition),
    CounterInc(CounterIncTransition),
    CounterCheck(CounterCheckTransition),
    Repetition(RepetitionTransition),

    // lookaround
    LookAheadAssertion(LookAheadAssertionTransition),
    LookBehindAssertion(LookBehindAssertionTransition),
}

#[derive(Debug)]
pub struct JumpTransition;

#[derive(Debug)]
pub struct CharTransition {
    pub character: char,
}

#[derive(Debug)]
pub struct StringTransition {
    pub chars: Vec<char>,
}

// `.`, line terminators are excluded unless the `s` flag is set.
#[derive(Debug)]
pub struct AnyCharTransition;

#[derive(Debug)]
pub struct CharSetTransition {
    pub items: Vec<CharSetItem>,
    pub negative: bool,
}

#[derive(Debug, PartialEq)]
pub enum CharSetItem {
    Char(u32),
    Range(CharRange),
}

#[derive(Debug, PartialEq)]
pub struct CharRange {
    pub start: u32,
    pub end_included: u32,
}

#[derive(Debug)]
pub struct BackReferenceTransition {
    pub capture_group_index: usize,
}

#[derive(Debug)]
pub struct AnchorAssertionTransition {
    pub name: AnchorAssertionName,
}

#[derive(Debug)]
pub struct BoundaryAssertionTransition {
    pub name: BoundaryAssertionName,
}

#[derive(Debug)]
pub struct CaptureStartTransition {
    pub capture_group_index: usize,
}

#[derive(Debug)]
pub struct CaptureEndTransition {
    pub capture_group_index: usize,
}

#[derive(Debug)]
pub struct CounterResetTransition;

// Starts an iteration, the captures inside the repeated
// expression are cleared.
#[derive(Debug)]
pub struct CounterSaveTransition {
    pub capture_group_indices: Range<usize>,
}

#[derive(Debug)]
pub struct CounterIncTransition {
    pub repetition_type: RepetitionType,
}

#[derive(Debug)]
pub struct CounterCheckTransition {
    pub repetition_type: RepetitionType,
}

#[derive(Debug)]
pub struct RepetitionTransition {
    pub repetition_type: RepetitionType,
}

#[derive(Debug)]
pub struct LookAheadAssertionTransition {
    pub route_index: usize,
    pub negative: bool,
}

#[derive(Debug)]
pub struct LookBehindAssertionTransition {
    pub route_index: usize,
    pub negative: bool,

    // `None` when the pattern has a variable length
    pub match_length_in_char: Option<usize>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum RepetitionType {
    Specified(usize),
    Range(usize, usize), // `usize::MAX` for unbounded
}

impl RepetitionType {
    pub fn min(&self) -> usize {
        match self {
            RepetitionType::Specified(n) => *n,
            RepetitionType::Range(m, _) => *m,
        }
    }

    pub fn max(&self) -> usize {
        match self {
            RepetitionType::Specified(n) => *n,
            RepetitionType::Range(_, n) => *n,
        }
    }
}

impl CharTransition {
    pub fn new(character: char) -> Self {
        CharTransition { character }
    }
}

impl StringTransition {
    pub fn new(s: &str) -> Self {
        StringTransition {
            chars: s.chars().collect(),
        }
    }
}

impl CharSetItem {
    pub fn new_char(character: char) -> Self {
        CharSetItem::Char(character as u32)
    }

    pub fn new_range(start: char, end_included: char) -> Self {
        CharSetItem::Range(CharRange {
            start: start as u32,
            end_included: end_included as u32,
        })
    }

    fn contains(&self, codepoint: u32) -> bool {
        match self {
            CharSetItem::Char(c) => *c == codepoint,
            CharSetItem::Range(r) => codepoint >= r.start && codepoint <= r.end_included,
        }
    }
}

impl CharSetTransition {
    pub fn new(items: Vec<CharSetItem>, negative: bool) -> Self {
        CharSetTransition { items, negative }
    }

    pub fn new_preset_word() -> Self {
        let mut items: Vec<CharSetItem> = vec![];
        add_preset_word(&mut items);
        CharSetTransition::new(items, false)
    }

    pub fn new_preset_not_word() -> Self {
        let mut items: Vec<CharSetItem> = vec![];
        add_preset_word(&mut items);
        CharSetTransition::new(items, true)
    }

    pub fn new_preset_space() -> Self {
        let mut items: Vec<CharSetItem> = vec![];
        add_preset_space(&mut items);
        CharSetTransition::new(items, false)
    }

    pub fn new_preset_not_space() -> Self {
        let mut items: Vec<CharSetItem> = vec![];
        add_preset_space(&mut items);
        CharSetTransition::new(items, true)
    }

    pub fn new_preset_digit() -> Self {
        let mut items: Vec<CharSetItem> = vec![];
        add_preset_digit(&mut items);
        CharSetTransition::new(items, false)
    }

    pub fn new_preset_not_digit() -> Self {
        let mut items: Vec<CharSetItem> = vec![];
        add_preset_digit(&mut items);
        CharSetTransition::new(items, true)
    }

    fn matches(&self, c: char, ignore_case: bool) -> bool {
        let found = if ignore_case {
            // a member matches when it canonicalizes to the same char,
            // range members are tested with the case variants of `c`.
            let canonical = canonicalize(c);
            let candidates = [
                c,
                canonical,
                single_lowercase(c),
                single_lowercase(canonical),
            ];

            self.items.iter().any(|item| match item {
                CharSetItem::Char(member) => {
                    char::from_u32(*member).is_some_and(|m| canonicalize(m) == canonical)
                }
                CharSetItem::Range(_) => candidates.iter().any(|candidate| {
                    canonicalize(*candidate) == canonical && item.contains(*candidate as u32)
                }),
            })
        } else {
            self.items.iter().any(|item| item.contains(c as u32))
        };

        found ^ self.negative
    }
}

fn single_lowercase(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

pub fn add_char(items: &mut Vec<CharSetItem>, c: char) {
    items.push(CharSetItem::new_char(c));
}

pub fn add_range(items: &mut Vec<CharSetItem>, start: char, end_included: char) {
    items.push(CharSetItem::new_range(start, end_included));
}

pub fn add_preset_space(items: &mut Vec<CharSetItem>) {
    // https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide/Regular_expressions/Character_classes
    // [\t\n\v\f\r \u00a0\u1680\u2000-\u200a\u2028\u2029\u202f\u205f\u3000\ufeff]
    add_range(items, '\t', '\r'); // \t \n \v \f \r
    add_char(items, ' ');
    add_char(items, '\u{a0}');
    add_char(items, '\u{1680}');
    add_range(items, '\u{2000}', '\u{200a}');
    add_range(items, '\u{2028}', '\u{2029}');
    add_char(items, '\u{202f}');
    add_char(items, '\u{205f}');
    add_char(items, '\u{3000}');
    add_char(items, '\u{feff}');
}

pub fn add_preset_word(items: &mut Vec<CharSetItem>) {
    // [A-Za-z0-9_]
    add_range(items, 'A', 'Z');
    add_range(items, 'a', 'z');
    add_range(items, '0', '9');
    add_char(items, '_');
}

pub fn add_preset_digit(items: &mut Vec<CharSetItem>) {
    // [0-9]
    add_range(items, '0', '9');
}

/// Append the complement of a sorted, non-overlapping item list, it is
/// used for the negated preset charsets inside a charset, e.g. `[\D_]`.
pub fn add_complement(items: &mut Vec<CharSetItem>, positive_items: &[CharSetItem]) {
    let mut ranges: Vec<(u32, u32)> = positive_items
        .iter()
        .map(|item| match item {
            CharSetItem::Char(c) => (*c, *c),
            CharSetItem::Range(r) => (r.start, r.end_included),
        })
        .collect();
    ranges.sort();

    let mut next_start: u32 = 0;
    for (start, end_included) in ranges {
        if start > next_start {
            items.push(CharSetItem::Range(CharRange {
                start: next_start,
                end_included: start - 1,
            }));
        }
        next_start = next_start.max(end_included + 1);
    }

    if next_start <= char::MAX as u32 {
        items.push(CharSetItem::Range(CharRange {
            start: next_start,
            end_included: char::MAX as u32,
        }));
    }
}

impl BackReferenceTransition {
    pub fn new(capture_group_index: usize) -> Self {
        BackReferenceTransition {
            capture_group_index,
        }
    }
}

impl AnchorAssertionTransition {
    pub fn new(name: AnchorAssertionName) -> Self {
        AnchorAssertionTransition { name }
    }
}

impl BoundaryAssertionTransition {
    pub fn new(name: BoundaryAssertionName) -> Self {
        BoundaryAssertionTransition { name }
    }
}

impl CaptureStartTransition {
    pub fn new(capture_group_index: usize) -> Self {
        CaptureStartTransition {
            capture_group_index,
        }
    }
}

impl CaptureEndTransition {
    pub fn new(capture_group_index: usize) -> Self {
        CaptureEndTransition {
            capture_group_index,
        }
    }
}

impl CounterSaveTransition {
    pub fn new(capture_group_indices: Range<usize>) -> Self {
        CounterSaveTransition {
            capture_group_indices,
        }
    }
}

impl CounterIncTransition {
    pub fn new(repetition_type: RepetitionType) -> Self {
        CounterIncTransition { repetition_type }
    }
}

impl CounterCheckTransition {
    pub fn new(repetition_type: RepetitionType) -> Self {
        CounterCheckTransition { repetition_type }
    }
}

impl RepetitionTransition {
    pub fn new(repetition_type: RepetitionType) -> Self {
        RepetitionTransition { repetition_type }
    }
}

impl LookAheadAssertionTransition {
    pub fn new(route_index: usize, negative: bool) -> Self {
        LookAheadAssertionTransition {
            route_index,
            negative,
        }
    }
}

impl LookBehindAssertionTransition {
    pub fn new(route_index: usize, negative: bool, match_length_in_char: Option<usize>) -> Self {
        LookBehindAssertionTransition {
            route_index,
            negative,
            match_length_in_char,
        }
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Jump(j) => write!(f, "{}", j),
            Transition::Char(c) => write!(f, "{}", c),
            Transition::String(s) => write!(f, "{}", s),
            Transition::AnyChar(a) => write!(f, "{}", a),
            Transition::CharSet(c) => write!(f, "{}", c),
            Transition::BackReference(b) => write!(f, "{}", b),
            Transition::AnchorAssertion(a) => write!(f, "{}", a),
            Transition::BoundaryAssertion(b) => write!(f, "{}", b),
            Transition::CaptureStart(m) => write!(f, "{}", m),
            Transition::CaptureEnd(m) => write!(f, "{}", m),
            Transition::CounterReset(c) => write!(f, "{}", c),
            Transition::CounterSave(c) => write!(f, "{}", c),
            Transition::CounterInc(c) => write!(f, "{}", c),
            Transition::CounterCheck(c) => write!(f, "{}", c),
            Transition::Repetition(r) => write!(f, "{}", r),
            Transition::LookAheadAssertion(l) => write!(f, "{}", l),
            Transition::LookBehindAssertion(l) => write!(f, "{}", l),
        }
    }
}

impl Display for JumpTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Jump")
    }
}

impl Display for CharTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Char {:?}", self.character)
    }
}

impl Display for StringTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = String::from_iter(&self.chars);
        write!(f, "String {:?}", s)
    }
}

impl Display for AnyCharTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Any char")
    }
}

impl Display for CharSetTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines = vec![];
        for item in &self.items {
            let line = match item {
                CharSetItem::Char(codepoint) => format!("{}", DebugCodepoint(*codepoint)),
                CharSetItem::Range(r) => format!(
                    "{}..{}",
                    DebugCodepoint(r.start),
                    DebugCodepoint(r.end_included)
                ),
            };
            lines.push(line);
        }

        let content = lines.join(", ");
        if self.negative {
            write!(f, "Charset ![{}]", content)
        } else {
            write!(f, "Charset [{}]", content)
        }
    }
}

// Items of a complement charset may be surrogate code points which are
// not valid chars.
struct DebugCodepoint(u32);

impl Display for DebugCodepoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match char::from_u32(self.0) {
            Some(c) if !c.is_control() && !c.is_whitespace() => write!(f, "'{}'", c),
            _ => write!(f, "U+{:04X}", self.0),
        }
    }
}

impl Display for BackReferenceTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Back reference {{{}}}", self.capture_group_index)
    }
}

impl Display for AnchorAssertionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name {
            AnchorAssertionName::Start => f.write_str("Assertion \"start\""),
            AnchorAssertionName::End => f.write_str("Assertion \"end\""),
        }
    }
}

impl Display for BoundaryAssertionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name {
            BoundaryAssertionName::IsBound => f.write_str("Assertion \"is_bound\""),
            BoundaryAssertionName::IsNotBound => f.write_str("Assertion \"is_not_bound\""),
        }
    }
}

impl Display for CaptureStartTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Capture start {{{}}}", self.capture_group_index)
    }
}

impl Display for CaptureEndTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Capture end {{{}}}", self.capture_group_index)
    }
}

impl Display for CounterResetTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Counter reset")
    }
}

impl Display for CounterSaveTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Range { start, end } = self.capture_group_indices;
        if start == end {
            f.write_str("Counter save")
        } else {
            write!(f, "Counter save, clear {{{}}} to {{{}}}", start, end - 1)
        }
    }
}

impl Display for CounterIncTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Counter inc")
    }
}

impl Display for CounterCheckTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Counter check {}", self.repetition_type)
    }
}

impl Display for RepetitionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Repetition {}", self.repetition_type)
    }
}

impl Display for RepetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepetitionType::Specified(n) => write!(f, "times {}", n),
            RepetitionType::Range(m, n) => {
                if n == &usize::MAX {
                    write!(f, "from {} to MAX", m)
                } else {
                    write!(f, "from {} to {}", m, n)
                }
            }
        }
    }
}

impl Display for LookAheadAssertionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "Look ahead negative ${}", self.route_index)
        } else {
            write!(f, "Look ahead ${}", self.route_index)
        }
    }
}

impl Display for LookBehindAssertionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = if self.negative {
            "Look behind negative"
        } else {
            "Look behind"
        };

        match self.match_length_in_char {
            Some(length) => write!(f, "{} ${}, match length {}", name, self.route_index, length),
            None => write!(f, "{} ${}, variable length", name, self.route_index),
        }
    }
}

impl Transition {
    /// Check the transition at `position`. A transition of a lookbehind
    /// route reads the chars before `position` when `backward` is set.
    pub fn check(
        &self,
        context: &mut Context,
        object_file: &ObjectFile,
        position: usize,
        backward: bool,
    ) -> CheckResult {
        let ignore_case = context.flags.ignore_case;

        match self {
            Transition::Jump(_) => {
                // jumping transition always success
                CheckResult::Success(0)
            }
            Transition::Char(transition) => {
                match read_char_directed(context.text, position, backward) {
                    Some(c) if chars_equal(c, transition.character, ignore_case) => {
                        CheckResult::Success(c.len_utf8())
                    }
                    _ => CheckResult::Failure,
                }
            }
            Transition::String(transition) => {
                match_chars(context.text, position, &transition.chars, ignore_case, backward)
            }
            Transition::AnyChar(_) => {
                match read_char_directed(context.text, position, backward) {
                    Some(c) if context.flags.dot_all || !is_line_terminator(c) => {
                        CheckResult::Success(c.len_utf8())
                    }
                    _ => CheckResult::Failure,
                }
            }
            Transition::CharSet(transition) => {
                match read_char_directed(context.text, position, backward) {
                    Some(c) if transition.matches(c, ignore_case) => {
                        CheckResult::Success(c.len_utf8())
                    }
                    _ => CheckResult::Failure,
                }
            }
            Transition::BackReference(transition) => {
                // a group which has not participated matches the empty string
                let MatchRange { start, end } =
                    match context.get_match_range(transition.capture_group_index) {
                        Some(match_range) => match_range,
                        None => return CheckResult::Success(0),
                    };

                let captured: Vec<char> = context.text[start..end].chars().collect();
                match_chars(context.text, position, &captured, ignore_case, backward)
            }
            Transition::AnchorAssertion(transition) => {
                let text = context.text;
                let multiline = context.flags.multiline;

                let success = match transition.name {
                    AnchorAssertionName::Start => {
                        position == 0
                            || (multiline
                                && read_previous_char(text, position)
                                    .is_some_and(is_line_terminator))
                    }
                    AnchorAssertionName::End => {
                        position == text.len()
                            || (multiline
                                && read_char(text, position).is_some_and(is_line_terminator))
                    }
                };

                if success {
                    CheckResult::Success(0)
                } else {
                    CheckResult::Failure
                }
            }
            Transition::BoundaryAssertion(transition) => {
                let is_bound = is_word_bound(context.text, position);
                let success = match transition.name {
                    BoundaryAssertionName::IsBound => is_bound,
                    BoundaryAssertionName::IsNotBound => !is_bound,
                };

                if success {
                    CheckResult::Success(0)
                } else {
                    CheckResult::Failure
                }
            }
            Transition::CaptureStart(transition) => {
                context.set_capture_start(transition.capture_group_index, position);
                CheckResult::Success(0)
            }
            Transition::CaptureEnd(transition) => {
                let index = transition.capture_group_index;
                let recorded = context.get_capture_start(index).unwrap_or(position);

                // inside a lookbehind route the group is entered at its end
                context.set_match_range(
                    index,
                    Some(MatchRange {
                        start: recorded.min(position),
                        end: recorded.max(position),
                    }),
                );
                CheckResult::Success(0)
            }
            Transition::CounterReset(_) => {
                context.push_counter(Counter {
                    count: 0,
                    iteration_start: position,
                });
                CheckResult::Success(0)
            }
            Transition::CounterSave(transition) => match context.peek_counter() {
                Some(counter) => {
                    context.update_counter(Counter {
                        iteration_start: position,
                        ..counter
                    });
                    context.clear_match_ranges(transition.capture_group_indices.clone());
                    CheckResult::Success(0)
                }
                None => CheckResult::Failure,
            },
            Transition::CounterInc(transition) => match context.peek_counter() {
                // an iteration matching the empty string is rejected once
                // the minimum count has been reached, it prevents endless loops.
                Some(counter)
                    if counter.iteration_start == position
                        && counter.count >= transition.repetition_type.min() =>
                {
                    CheckResult::Failure
                }
                Some(counter) => {
                    context.update_counter(Counter {
                        count: counter.count + 1,
                        ..counter
                    });
                    CheckResult::Success(0)
                }
                None => CheckResult::Failure,
            },
            Transition::CounterCheck(transition) => match context.peek_counter() {
                Some(counter) if counter.count >= transition.repetition_type.min() => {
                    context.pop_counter();
                    CheckResult::Success(0)
                }
                _ => CheckResult::Failure,
            },
            Transition::Repetition(transition) => match context.peek_counter() {
                Some(counter) if counter.count < transition.repetition_type.max() => {
                    CheckResult::Success(0)
                }
                _ => CheckResult::Failure,
            },
            Transition::LookAheadAssertion(transition) => {
                let matched =
                    start_route(context, object_file, transition.route_index, position).is_some();

                // assertion does not move the position
                if matched ^ transition.negative {
                    CheckResult::Success(0)
                } else {
                    CheckResult::Failure
                }
            }
            Transition::LookBehindAssertion(transition) => {
                // the sub-route matches backward from the current position,
                // a body of fixed length fails fast near the text start.
                let matched = match transition.match_length_in_char {
                    Some(length)
                        if get_position_by_chars_backward(context.text, position, length)
                            .is_none() =>
                    {
                        false
                    }
                    _ => start_route(context, object_file, transition.route_index, position)
                        .is_some(),
                };

                if matched ^ transition.negative {
                    CheckResult::Success(0)
                } else {
                    CheckResult::Failure
                }
            }
        }
    }
}

fn read_char_directed(text: &str, position: usize, backward: bool) -> Option<char> {
    if backward {
        read_previous_char(text, position)
    } else {
        read_char(text, position)
    }
}

// Match a char sequence at `position`, a backward match compares the
// chars before `position` starting from the last one.
fn match_chars(
    text: &str,
    position: usize,
    chars: &[char],
    ignore_case: bool,
    backward: bool,
) -> CheckResult {
    let mut consumed = 0;

    let mut compare = |expected_char: &char| {
        let current_position = if backward {
            position - consumed
        } else {
            position + consumed
        };

        match read_char_directed(text, current_position, backward) {
            Some(c) if chars_equal(c, *expected_char, ignore_case) => {
                consumed += c.len_utf8();
                true
            }
            _ => false,
        }
    };

    let matched = if backward {
        chars.iter().rev().all(&mut compare)
    } else {
        chars.iter().all(&mut compare)
    };

    if matched {
        CheckResult::Success(consumed)
    } else {
        CheckResult::Failure
    }
}

// ECMAScript `Canonicalize` for non-unicode patterns: the simple upper
// case mapping, except for mappings to multiple chars and mappings from
// non-ASCII to ASCII.
fn canonicalize(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) if c.is_ascii() || !u.is_ascii() => u,
        _ => c,
    }
}

fn chars_equal(a: char, b: char, ignore_case: bool) -> bool {
    a == b || (ignore_case && canonicalize(a) == canonicalize(b))
}

pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word_bound(text: &str, position: usize) -> bool {
    let previous_is_word = read_previous_char(text, position).is_some_and(is_word_char);
    let current_is_word = read_char(text, position).is_some_and(is_word_char);
    previous_is_word != current_is_word
}

pub enum CheckResult {
    Success(/* consumed bytes */ usize),
    Failure,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{
        add_complement, add_preset_digit, canonicalize, is_word_bound, CharRange, CharSetItem,
    };

    #[test]
    fn test_canonicalize() {
        assert_eq!(canonicalize('a'), 'A');
        assert_eq!(canonicalize('A'), 'A');
        assert_eq!(canonicalize('é'), 'É');
        assert_eq!(canonicalize('1'), '1');

        // 'ß' upper cases to "SS"
        assert_eq!(canonicalize('ß'), 'ß');

        // 'ſ' (long s) upper cases to the ASCII 'S'
        assert_eq!(canonicalize('ſ'), 'ſ');
    }

    #[test]
    fn test_word_bound() {
        assert!(is_word_bound("Hola mundo", 0));
        assert!(is_word_bound("Hola mundo", 4));
        assert!(is_word_bound("Hola mundo", 5));
        assert!(!is_word_bound("Hola mundo", 2));
        assert!(is_word_bound("Hola mundo", 10));
        assert!(!is_word_bound("", 0));
        assert!(!is_word_bound("  ", 1));
    }

    #[test]
    fn test_complement() {
        let mut digits = vec![];
        add_preset_digit(&mut digits);

        let mut items = vec![];
        add_complement(&mut items, &digits);

        assert_eq!(
            items,
            vec![
                CharSetItem::Range(CharRange {
                    start: 0,
                    end_included: '0' as u32 - 1
                }),
                CharSetItem::Range(CharRange {
                    start: '9' as u32 + 1,
                    end_included: char::MAX as u32
                }),
            ]
        );
    }
}
