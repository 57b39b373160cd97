// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{
    cell::Cell,
    fmt::Display,
    ops::{Index, Range},
    str::FromStr,
};

use crate::{
    compiler::compile,
    context::{Context, MatchRange},
    flags::Flags,
    object_file::ObjectFile,
    parser::parse_from_str,
    process::start_process,
    replacer::get_substitution,
    utf8reader::next_char_position,
    RegexError,
};

/// A compiled regular expression with its flags and its `lastIndex`.
///
/// ```
/// use jsre::Regex;
///
/// let re = Regex::with_flags("gusta", "i").unwrap();
/// assert!(re.test("Me GUSTA JavaScript"));
/// assert_eq!(re.search("Me gusta JS"), Some(3));
/// ```
#[derive(Debug)]
pub struct Regex {
    object_file: ObjectFile,
    source: String,
    flags: Flags,

    // `lastIndex` of JavaScript, it is updated by `exec` and `test`
    // only when the `g` or `y` flag is set.
    last_index: Cell<usize>,
}

/// The result of `match_str`.
#[derive(Debug, PartialEq)]
pub enum MatchResult<'a, 'b> {
    /// Without the `g` flag: the same as `exec`.
    Captures(Captures<'a, 'b>),

    /// With the `g` flag: all matched strings.
    All(Vec<&'b str>),
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, RegexError> {
        Regex::with_options(pattern, Flags::default())
    }

    /// e.g. `Regex::with_flags("hola", "gi")`
    pub fn with_flags(pattern: &str, flags: &str) -> Result<Self, RegexError> {
        Regex::with_options(pattern, flags.parse()?)
    }

    pub fn with_options(pattern: &str, flags: Flags) -> Result<Self, RegexError> {
        let program = parse_from_str(pattern)?;
        let object_file = compile(&program)?;

        Ok(Regex {
            object_file,
            source: pattern.to_owned(),
            flags,
            last_index: Cell::new(0),
        })
    }

    /// Create from the JavaScript literal form, e.g. `/\d+/g`.
    pub fn from_literal(literal: &str) -> Result<Self, RegexError> {
        let body = literal.strip_prefix('/').ok_or_else(|| {
            RegexError::InvalidLiteral(format!("Missing the leading \"/\" in {:?}.", literal))
        })?;

        // flags never contain "/", so the last one closes the pattern
        let close_position = body.rfind('/').ok_or_else(|| {
            RegexError::InvalidLiteral(format!("Missing the closing \"/\" in {:?}.", literal))
        })?;

        Regex::with_flags(&body[..close_position], &body[close_position + 1..])
    }

    /// The pattern text, `(?:)` for the empty pattern.
    pub fn source(&self) -> &str {
        if self.source.is_empty() {
            "(?:)"
        } else {
            &self.source
        }
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn global(&self) -> bool {
        self.flags.global
    }

    pub fn ignore_case(&self) -> bool {
        self.flags.ignore_case
    }

    pub fn multiline(&self) -> bool {
        self.flags.multiline
    }

    pub fn dot_all(&self) -> bool {
        self.flags.dot_all
    }

    pub fn sticky(&self) -> bool {
        self.flags.sticky
    }

    pub fn last_index(&self) -> usize {
        self.last_index.get()
    }

    pub fn set_last_index(&self, last_index: usize) {
        self.last_index.set(last_index);
    }

    /// Index 0 is the whole match, unnamed groups are `None`.
    pub fn capture_group_names(&self) -> &[Option<String>] {
        &self.object_file.capture_group_names
    }

    // Search from `start`, with the `y` flag (or `force_sticky`) only
    // at `start`.
    fn execute<'a, 'b>(
        &'a self,
        text: &'b str,
        start: usize,
        force_sticky: bool,
    ) -> Option<Captures<'a, 'b>> {
        let flags = Flags {
            sticky: self.flags.sticky || force_sticky,
            ..self.flags
        };

        let number_of_capture_groups = self.object_file.capture_group_names.len();
        let mut context = Context::new(text, flags, number_of_capture_groups);

        if !start_process(&mut context, &self.object_file, start) {
            return None;
        }

        let matches = context
            .match_ranges()
            .iter()
            .enumerate()
            .map(|(idx, match_range)| {
                match_range.map(|MatchRange { start, end }| {
                    Match::new(
                        start,
                        end,
                        self.object_file.get_capture_group_name_by_index(idx),
                        &text[start..end],
                    )
                })
            })
            .collect();

        Some(Captures {
            matches,
            input: text,
        })
    }

    /// `RegExp.prototype.exec`
    ///
    /// With the `g` or `y` flag the search starts at `last_index`, which is
    /// then moved to the end of the match, or reset to 0 when nothing is found.
    pub fn exec<'a, 'b>(&'a self, text: &'b str) -> Option<Captures<'a, 'b>> {
        let stateful = self.flags.global || self.flags.sticky;
        let start = if stateful { self.last_index.get() } else { 0 };

        let captures = if start > text.len() {
            None
        } else {
            self.execute(text, start, false)
        };

        if stateful {
            let next_last_index = match &captures {
                Some(captures) => captures.end(),
                None => 0,
            };
            self.last_index.set(next_last_index);
        }

        captures
    }

    /// `RegExp.prototype.test`
    pub fn test(&self, text: &str) -> bool {
        self.exec(text).is_some()
    }

    /// `String.prototype.match`
    pub fn match_str<'a, 'b>(&'a self, text: &'b str) -> Option<MatchResult<'a, 'b>> {
        if !self.flags.global {
            return self.exec(text).map(MatchResult::Captures);
        }

        let values: Vec<&'b str> = self
            .exec_all(text)
            .iter()
            .map(|captures| &text[captures.range()])
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(MatchResult::All(values))
        }
    }

    /// `String.prototype.matchAll`, the `g` flag is required.
    ///
    /// The iteration starts at `last_index`, which itself is left unchanged.
    pub fn match_all<'a, 'b>(&'a self, text: &'b str) -> Result<CaptureMatches<'a, 'b>, RegexError> {
        if !self.flags.global {
            return Err(RegexError::NonGlobal("match_all"));
        }

        Ok(CaptureMatches::new(self, text, self.last_index.get()))
    }

    /// `String.prototype.search`, returns the start position of the first match.
    pub fn search(&self, text: &str) -> Option<usize> {
        self.execute(text, 0, false).map(|captures| captures.index())
    }

    /// `String.prototype.replace` with a replacement template, see
    /// `get_substitution` for the `$` patterns.
    ///
    /// Only the first match is replaced unless the `g` flag is set.
    pub fn replace(&self, text: &str, replacement: &str) -> String {
        let capture_group_names = self.capture_group_names();
        self.replace_with(text, |captures| {
            get_substitution(replacement, captures, capture_group_names)
        })
    }

    /// `String.prototype.replace` with a replacer function.
    pub fn replace_with<F>(&self, text: &str, mut replacer: F) -> String
    where
        F: FnMut(&Captures) -> String,
    {
        let all_captures = if self.flags.global {
            self.exec_all(text)
        } else {
            self.exec(text).into_iter().collect()
        };

        let mut result = String::with_capacity(text.len());
        let mut next_source_position = 0;

        for captures in &all_captures {
            let Range { start, end } = captures.range();
            if start < next_source_position {
                continue;
            }

            result.push_str(&text[next_source_position..start]);
            result.push_str(&replacer(captures));
            next_source_position = end;
        }

        result.push_str(&text[next_source_position..]);
        result
    }

    /// `String.prototype.replaceAll`, the `g` flag is required.
    pub fn replace_all(&self, text: &str, replacement: &str) -> Result<String, RegexError> {
        if !self.flags.global {
            return Err(RegexError::NonGlobal("replace_all"));
        }

        Ok(self.replace(text, replacement))
    }

    pub fn replace_all_with<F>(&self, text: &str, replacer: F) -> Result<String, RegexError>
    where
        F: FnMut(&Captures) -> String,
    {
        if !self.flags.global {
            return Err(RegexError::NonGlobal("replace_all"));
        }

        Ok(self.replace_with(text, replacer))
    }

    /// `String.prototype.split`
    ///
    /// The captured groups are inserted between the pieces, `None` for the
    /// groups which did not participate. The `g` and `y` flags are ignored.
    pub fn split<'b>(&self, text: &'b str, limit: Option<usize>) -> Vec<Option<&'b str>> {
        let limit = limit.unwrap_or(usize::MAX);
        let mut items: Vec<Option<&'b str>> = vec![];

        if limit == 0 {
            return items;
        }

        let size = text.len();

        if size == 0 {
            if self.execute(text, 0, true).is_none() {
                items.push(Some(text));
            }
            return items;
        }

        // the end of the last piece
        let mut last_end = 0;
        let mut position = 0;

        while position < size {
            let captures = match self.execute(text, position, true) {
                Some(captures) => captures,
                None => {
                    position = next_char_position(text, position);
                    continue;
                }
            };

            let end = captures.end().min(size);
            if end == last_end {
                position = next_char_position(text, position);
                continue;
            }

            items.push(Some(&text[last_end..position]));
            if items.len() == limit {
                return items;
            }

            last_end = end;

            for group in captures.iter().skip(1) {
                items.push(group.map(|m| m.as_str()));
                if items.len() == limit {
                    return items;
                }
            }

            position = last_end;
        }

        items.push(Some(&text[last_end..]));
        items
    }

    // Collect all matches the way `match` and `replace` do with the `g`
    // flag, `last_index` is 0 when finished.
    fn exec_all<'a, 'b>(&'a self, text: &'b str) -> Vec<Captures<'a, 'b>> {
        let mut all_captures = vec![];
        self.last_index.set(0);

        while let Some(captures) = self.exec(text) {
            // an empty match moves forward one char
            if captures.range().is_empty() {
                let end = captures.end();
                self.last_index.set(next_char_position(text, end));
            }
            all_captures.push(captures);
        }

        all_captures
    }

    // The following methods are stateless and always search from the
    // start of the text. They are intended to be compatible with the
    // API of crate 'regex': https://docs.rs/regex/latest/regex/struct.Regex.html

    pub fn is_match(&self, text: &str) -> bool {
        self.execute(text, 0, false).is_some()
    }

    pub fn find<'a, 'b>(&'a self, text: &'b str) -> Option<Match<'a, 'b>> {
        self.execute(text, 0, false)
            .and_then(|captures| captures.matches.into_iter().next().flatten())
    }

    pub fn find_iter<'a, 'b>(&'a self, text: &'b str) -> Matches<'a, 'b> {
        Matches {
            capture_matches: CaptureMatches::new(self, text, 0),
        }
    }

    pub fn captures<'a, 'b>(&'a self, text: &'b str) -> Option<Captures<'a, 'b>> {
        self.execute(text, 0, false)
    }

    pub fn captures_iter<'a, 'b>(&'a self, text: &'b str) -> CaptureMatches<'a, 'b> {
        CaptureMatches::new(self, text, 0)
    }
}

impl FromStr for Regex {
    type Err = RegexError;

    /// Parse the literal form, e.g. `"/ab+c/gi".parse::<Regex>()`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Regex::from_literal(s)
    }
}

impl Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}/{}", self.source(), self.flags)
    }
}

pub struct CaptureMatches<'a, 'b> {
    regex: &'a Regex,
    text: &'b str,
    next_position: usize,
}

impl<'a, 'b> CaptureMatches<'a, 'b> {
    fn new(regex: &'a Regex, text: &'b str, start: usize) -> Self {
        CaptureMatches {
            regex,
            text,
            next_position: start,
        }
    }
}

impl<'a, 'b> Iterator for CaptureMatches<'a, 'b> {
    type Item = Captures<'a, 'b>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_position > self.text.len() {
            return None;
        }

        let captures = match self.regex.execute(self.text, self.next_position, false) {
            Some(captures) => captures,
            None => {
                // finished
                self.next_position = self.text.len() + 1;
                return None;
            }
        };

        let Range { start, end } = captures.range();
        self.next_position = if start == end {
            next_char_position(self.text, end)
        } else {
            end
        };

        Some(captures)
    }
}

pub struct Matches<'a, 'b> {
    capture_matches: CaptureMatches<'a, 'b>,
}

impl<'a, 'b> Iterator for Matches<'a, 'b> {
    type Item = Match<'a, 'b>;

    fn next(&mut self) -> Option<Self::Item> {
        let captures = self.capture_matches.next()?;
        captures.matches.into_iter().next().flatten()
    }
}

/// The groups of one match, index 0 is the whole match.
#[derive(Debug, PartialEq, Clone)]
pub struct Captures<'a, 'b> {
    pub matches: Vec<Option<Match<'a, 'b>>>,
    pub input: &'b str,
}

impl<'a, 'b> Captures<'a, 'b> {
    // the following methods are intended to
    // be compatible with the 'Captures' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Captures.html

    /// `None` when the group did not participate in the match.
    pub fn get(&self, index: usize) -> Option<&Match<'a, 'b>> {
        self.matches.get(index)?.as_ref()
    }

    pub fn name(&self, name: &str) -> Option<&Match<'a, 'b>> {
        self.matches
            .iter()
            .flatten()
            .find(|item| item.name == Some(name))
    }

    /// The start position of the whole match, i.e. `index` of the JavaScript
    /// match result.
    pub fn index(&self) -> usize {
        self.range().start
    }

    pub fn input(&self) -> &'b str {
        self.input
    }

    fn range(&self) -> Range<usize> {
        self.get(0).map_or(0..0, |m| m.range())
    }

    fn end(&self) -> usize {
        self.range().end
    }

    // e.g.
    //
    // ```
    //   let c = re.captures("...").unwrap();
    //   let (whole, [one, two, three]) = c.extract();
    // ```
    //
    // groups which did not participate are empty strings.
    pub fn extract<const N: usize>(&self) -> (&'b str, [&'b str; N]) {
        let mut items: [&str; N] = [""; N];
        for (idx, item) in items.iter_mut().enumerate() {
            if let Some(m) = self.get(idx + 1) {
                *item = m.as_str();
            }
        }

        let whole = self.get(0).map_or("", |m| m.as_str());
        (whole, items)
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<&Match<'a, 'b>>> + '_ {
        self.matches.iter().map(|item| item.as_ref())
    }

    /// The named groups which participated in the match, i.e. the
    /// `groups` of the JavaScript match result.
    pub fn named_groups(&self) -> Vec<(&'a str, &'b str)> {
        self.matches
            .iter()
            .flatten()
            .filter_map(|item| item.name.map(|name| (name, item.value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<usize> for Captures<'_, '_> {
    type Output = str;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index)
            .unwrap_or_else(|| panic!(
                "Index {} is out of range of the capture groups or the group did not participate, the length of capture groups is {}.",
                index, self.len()))
            .as_str()
    }
}

impl Index<&str> for Captures<'_, '_> {
    type Output = str;

    fn index(&self, name: &str) -> &Self::Output {
        self.name(name)
            .unwrap_or_else(|| panic!("Cannot find the capture group named \"{}\".", name))
            .as_str()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Match<'a, 'b> {
    pub start: usize, // the position of utf-8 byte stream (value included)
    pub end: usize,   // the position of utf-8 byte stream (value excluded)
    pub name: Option<&'a str>,
    pub value: &'b str,
}

impl<'a, 'b> Match<'a, 'b> {
    pub fn new(start: usize, end: usize, name: Option<&'a str>, value: &'b str) -> Self {
        Match {
            start,
            end,
            name,
            value,
        }
    }

    // the following methods are intended to
    // be compatible with the 'Match' API of crate 'regex':
    // https://docs.rs/regex/latest/regex/struct.Match.html

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn range(&self) -> Range<usize> {
        Range {
            start: self.start,
            end: self.end,
        }
    }

    pub fn as_str(&self) -> &'b str {
        self.value
    }
}
