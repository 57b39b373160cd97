// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Syntax Summary:
//
// Meta characters and their meanings:
//
// - [ ]      Character set
// - [^ ]     Negated character set
// - {m}      Exact repetition (m times)
// - {m,n}    Repetition range (m to n times)
// - {m,}     At least m repetitions
// - (xyz)    Capture group
// - *        Zero or more repetitions
// - +        One or more repetitions
// - ?        Optional, or lazy repetition when it follows a quantifier
// - |        Logical OR
// - ^        Start assertion
// - $        End assertion
// - .        Any character except line terminators (\n, \r, \u2028, \u2029)
// - \        Escape character
//
// A `{` that does not start a well-formed repetition is a literal char,
// so are a lone `}` and a lone `]`.
//
// Escaped characters:
//
// - \t \n \r \f \v   Tab, line feed, carriage return, form feed, vertical tab
// - \0               Null character (must not be followed by a digit)
// - \xhh             Character with the 2-digit hexadecimal code
// - \uhhhh           Character with the 4-digit hexadecimal code; a pair of
//                    surrogates is combined into one character
// - \u{h...}         Unicode code point, 1 to 6 hexadecimal digits
// - \cX              Control character, X is an ASCII letter
// - \<punctuation>   The punctuation itself, e.g. `\.`, `\/`, `\-`
//
// Preset character sets:
//
// - \w       Alphanumeric characters: [a-zA-Z0-9_]
// - \W       Negated \w: [^\w]
// - \d       Digits: [0-9]
// - \D       Negated \d: [^\d]
// - \s       Whitespace and line terminators
// - \S       Negated \s: [^\s]
//
// Boundary assertions (not available in character sets, where `\b` is
// the backspace char):
//
// - \b       Word boundary
// - \B       Not a word boundary
//
// Groups and references:
//
// - (?:...)       Non-capturing group
// - (?<name>...)  Named capture group
// - \number       Backreference by group number, e.g. `\1`, `\2`
// - \k<name>      Backreference by group name
//
// Lookaround assertions:
//
// - (?=...)  Positive lookahead
// - (?!...)  Negative lookahead
// - (?<=...) Positive lookbehind
// - (?<!...) Negative lookbehind

use crate::{
    charwithposition::{CharWithPosition, CharsWithPositionIter},
    location::Location,
    peekableiter::PeekableIter,
    token::{Repetition, Token, TokenWithRange},
    RegexError,
};

pub const LEXER_PEEK_CHAR_MAX_COUNT: usize = 4;

pub fn lex_from_str(s: &str) -> Result<Vec<TokenWithRange>, RegexError> {
    let mut char_position_iter = CharsWithPositionIter::new(s);
    let mut peekable_char_position_iter =
        PeekableIter::new(&mut char_position_iter, LEXER_PEEK_CHAR_MAX_COUNT);
    let mut lexer = Lexer::new(&mut peekable_char_position_iter);
    lexer.lex()
}

struct Lexer<'a, 'b> {
    upstream: &'a mut PeekableIter<'b, CharWithPosition>,
    last_position: Location, // last position consumed
    saved_positions: Vec<Location>,
}

impl<'a, 'b> Lexer<'a, 'b> {
    fn new(upstream: &'a mut PeekableIter<'b, CharWithPosition>) -> Self {
        Self {
            upstream,
            last_position: Location::new_position(0, 0, 0),
            saved_positions: vec![],
        }
    }

    fn next_char(&mut self) -> Option<char> {
        match self.upstream.next() {
            Some(CharWithPosition {
                character,
                position,
            }) => {
                self.last_position = position;
                Some(character)
            }
            None => None,
        }
    }

    fn peek_char(&mut self, offset: usize) -> Option<char> {
        self.upstream
            .peek(offset)
            .map(|CharWithPosition { character, .. }| *character)
    }

    fn peek_char_and_equals(&mut self, offset: usize, expected_char: char) -> bool {
        self.peek_char(offset) == Some(expected_char)
    }

    fn peek_position(&mut self, offset: usize) -> Option<Location> {
        self.upstream
            .peek(offset)
            .map(|CharWithPosition { position, .. }| *position)
    }

    fn push_peek_position(&mut self) {
        let position = match self.peek_position(0) {
            Some(position) => position,
            None => self.last_position.move_position_forward(),
        };
        self.saved_positions.push(position);
    }

    fn pop_saved_position(&mut self) -> Location {
        self.saved_positions.pop().unwrap_or(self.last_position)
    }

    // The start position of the escape sequence being lexed.
    fn escape_start_position(&self) -> Location {
        self.saved_positions
            .last()
            .copied()
            .unwrap_or(self.last_position)
    }

    fn expect_char(&mut self, expected_char: char, char_description: &str) -> Result<(), RegexError> {
        match self.next_char() {
            Some(ch) => {
                if ch == expected_char {
                    Ok(())
                } else {
                    Err(RegexError::MessageWithLocation(
                        format!("Expect char: {}.", char_description),
                        self.last_position,
                    ))
                }
            }
            None => Err(RegexError::UnexpectedEndOfPattern(format!(
                "Expect char: {}.",
                char_description
            ))),
        }
    }
}

impl Lexer<'_, '_> {
    fn lex(&mut self) -> Result<Vec<TokenWithRange>, RegexError> {
        let mut token_with_ranges = vec![];

        while let Some(current_char) = self.peek_char(0) {
            match current_char {
                '[' => {
                    // charset start
                    let mut twrs = self.lex_charset()?;
                    token_with_ranges.append(&mut twrs);
                }
                '{' => match self.lex_repetition() {
                    Some(twr) => token_with_ranges.push(twr),
                    None => {
                        // not a repetition, the brace is a literal char
                        token_with_ranges.push(self.lex_single_char_token(Token::Char('{')));
                    }
                },
                '(' if self.peek_char_and_equals(1, '?') => {
                    let twr = self.lex_group_prefix()?;
                    token_with_ranges.push(twr);
                }
                '(' => {
                    token_with_ranges.push(self.lex_single_char_token(Token::GroupStart));
                }
                ')' => {
                    token_with_ranges.push(self.lex_single_char_token(Token::GroupEnd));
                }
                '?' | '+' | '*' => {
                    self.push_peek_position();

                    self.next_char(); // consume the quantifier char

                    let lazy = if self.peek_char_and_equals(0, '?') {
                        self.next_char(); // consume '?'
                        true
                    } else {
                        false
                    };

                    let token = match (current_char, lazy) {
                        ('?', false) => Token::Optional,
                        ('?', true) => Token::OptionalLazy,
                        ('+', false) => Token::OneOrMore,
                        ('+', true) => Token::OneOrMoreLazy,
                        ('*', false) => Token::ZeroOrMore,
                        ('*', true) => Token::ZeroOrMoreLazy,
                        _ => unreachable!(),
                    };

                    let range = Location::from_position_pair_with_end_included(
                        &self.pop_saved_position(),
                        &self.last_position,
                    );
                    token_with_ranges.push(TokenWithRange::new(token, range));
                }
                '^' => {
                    token_with_ranges.push(self.lex_single_char_token(Token::StartAssertion));
                }
                '$' => {
                    token_with_ranges.push(self.lex_single_char_token(Token::EndAssertion));
                }
                '.' => {
                    token_with_ranges.push(self.lex_single_char_token(Token::Dot));
                }
                '|' => {
                    token_with_ranges.push(self.lex_single_char_token(Token::LogicOr));
                }
                '\\' => {
                    let twr = self.lex_main_escaping()?;
                    token_with_ranges.push(twr);
                }
                _ => {
                    token_with_ranges.push(self.lex_single_char_token(Token::Char(current_char)));
                }
            }
        }

        Ok(token_with_ranges)
    }

    fn lex_single_char_token(&mut self, token: Token) -> TokenWithRange {
        self.next_char(); // consume the current char
        TokenWithRange::from_position_and_length(token, &self.last_position, 1)
    }

    fn lex_group_prefix(&mut self) -> Result<TokenWithRange, RegexError> {
        // (?...  //
        // ^ ^____// to here
        // |______// current char, validated

        self.push_peek_position();

        self.next_char(); // consume '('
        self.next_char(); // consume '?'

        let token = match self.peek_char(0) {
            Some(':') => {
                self.next_char(); // consume ':'
                Token::NonCapturing
            }
            Some('=') => {
                self.next_char(); // consume '='
                Token::LookAhead
            }
            Some('!') => {
                self.next_char(); // consume '!'
                Token::LookAheadNegative
            }
            Some('<') => match self.peek_char(1) {
                Some('=') => {
                    self.next_char(); // consume '<'
                    self.next_char(); // consume '='
                    Token::LookBehind
                }
                Some('!') => {
                    self.next_char(); // consume '<'
                    self.next_char(); // consume '!'
                    Token::LookBehindNegative
                }
                _ => {
                    let name = self.lex_identifier()?;
                    Token::NamedCapture(name)
                }
            },
            Some(_) => {
                return Err(RegexError::MessageWithLocation(
                    "Invalid group, expect \"(?:\", \"(?=\", \"(?!\", \"(?<=\", \"(?<!\" or \"(?<name>\"."
                        .to_owned(),
                    Location::from_position_and_length(&self.pop_saved_position(), 2),
                ));
            }
            None => {
                return Err(RegexError::UnexpectedEndOfPattern(
                    "Incomplete group.".to_owned(),
                ));
            }
        };

        let range = Location::from_position_pair_with_end_included(
            &self.pop_saved_position(),
            &self.last_position,
        );

        Ok(TokenWithRange::new(token, range))
    }

    fn lex_charset(&mut self) -> Result<Vec<TokenWithRange>, RegexError> {
        // [.....]?  //
        // ^      ^__// to here
        // |_________// current char, validated
        //
        // also `[^.....]`

        let mut token_with_ranges = vec![];

        self.push_peek_position();

        self.next_char(); // consume '['

        let charset_start = if self.peek_char_and_equals(0, '^') {
            self.next_char(); // consume '^'
            TokenWithRange::from_position_and_length(
                Token::CharSetStartNegative,
                &self.pop_saved_position(),
                2,
            )
        } else {
            TokenWithRange::from_position_and_length(
                Token::CharSetStart,
                &self.pop_saved_position(),
                1,
            )
        };

        token_with_ranges.push(charset_start);

        loop {
            match self.peek_char(0) {
                Some(']') => break,
                Some(_) => {
                    let twr = self.lex_charset_element()?;
                    token_with_ranges.push(twr);
                }
                None => {
                    return Err(RegexError::UnexpectedEndOfPattern(
                        "Incomplete charset, missing \"]\".".to_owned(),
                    ));
                }
            }
        }

        token_with_ranges.push(self.lex_single_char_token(Token::CharSetEnd));

        Ok(token_with_ranges)
    }

    fn lex_charset_element(&mut self) -> Result<TokenWithRange, RegexError> {
        // a, \d, a-z, \x41-\x5a

        self.push_peek_position();

        let first = self.lex_charset_atom()?;

        // a '-' followed by anything but the closing bracket forms a range,
        // e.g. `[a-z]`, but not `[a-]`.
        let is_range = self.peek_char_and_equals(0, '-')
            && matches!(self.peek_char(1), Some(c) if c != ']');

        if !is_range {
            let range = Location::from_position_pair_with_end_included(
                &self.pop_saved_position(),
                &self.last_position,
            );
            return Ok(TokenWithRange::new(first, range));
        }

        self.next_char(); // consume '-'
        let second = self.lex_charset_atom()?;

        let range = Location::from_position_pair_with_end_included(
            &self.pop_saved_position(),
            &self.last_position,
        );

        match (first, second) {
            (Token::Char(start), Token::Char(end_included)) => {
                if start > end_included {
                    Err(RegexError::MessageWithLocation(
                        format!(
                            "Range out of order in charset, '{}' is greater than '{}'.",
                            start, end_included
                        ),
                        range,
                    ))
                } else {
                    Ok(TokenWithRange::new(
                        Token::CharRange(start, end_included),
                        range,
                    ))
                }
            }
            _ => Err(RegexError::MessageWithLocation(
                "A preset charset cannot be the endpoint of a char range.".to_owned(),
                range,
            )),
        }
    }

    fn lex_charset_atom(&mut self) -> Result<Token, RegexError> {
        match self.next_char() {
            Some('\\') => match self.next_char() {
                Some(escaped_char) => match escaped_char {
                    // preset charsets, negative ones are allowed as well
                    'd' | 'D' | 'w' | 'W' | 's' | 'S' => Ok(Token::PresetCharSet(escaped_char)),
                    // backspace
                    'b' => Ok(Token::Char('\u{8}')),
                    '-' => Ok(Token::Char('-')),
                    'B' => Err(RegexError::MessageWithLocation(
                        "Boundary assertions are not supported in charset.".to_owned(),
                        Location::from_position_and_length(&self.escape_start_position(), 2),
                    )),
                    '1'..='9' | 'k' => Err(RegexError::MessageWithLocation(
                        "Back references are not supported in charset.".to_owned(),
                        Location::from_position_and_length(&self.escape_start_position(), 2),
                    )),
                    _ => Ok(Token::Char(self.unescape_char(escaped_char)?)),
                },
                None => Err(RegexError::UnexpectedEndOfPattern(
                    "Incomplete escape sequence.".to_owned(),
                )),
            },
            Some(c) => Ok(Token::Char(c)),
            None => Err(RegexError::UnexpectedEndOfPattern(
                "Incomplete charset, missing \"]\".".to_owned(),
            )),
        }
    }

    fn lex_main_escaping(&mut self) -> Result<TokenWithRange, RegexError> {
        // \xxxx?  //
        // ^    ^__// to here
        // |_______// current char, validated

        self.push_peek_position();

        self.next_char(); // consume '\'

        let token = match self.next_char() {
            Some(escaped_char) => match escaped_char {
                // preset charsets
                'd' | 'D' | 'w' | 'W' | 's' | 'S' => Token::PresetCharSet(escaped_char),
                // boundary assertions
                'b' | 'B' => Token::BoundaryAssertion(escaped_char),
                // back reference by index
                '1'..='9' => {
                    let num = self.continue_lex_number(escaped_char);
                    Token::BackReferenceNumber(num)
                }
                // back reference by name
                'k' => {
                    if self.peek_char_and_equals(0, '<') {
                        let name = self.lex_identifier()?;
                        Token::BackReferenceIdentifier(name)
                    } else {
                        return Err(RegexError::MessageWithLocation(
                            "Missing the angle bracket \"<\" for group name.".to_owned(),
                            self.last_position.move_position_forward(),
                        ));
                    }
                }
                _ => Token::Char(self.unescape_char(escaped_char)?),
            },
            None => {
                // `\` | EOF
                return Err(RegexError::UnexpectedEndOfPattern(
                    "Incomplete escape sequence.".to_owned(),
                ));
            }
        };

        let token_range = Location::from_position_pair_with_end_included(
            &self.pop_saved_position(),
            &self.last_position,
        );

        Ok(TokenWithRange::new(token, token_range))
    }

    // Unescape the char following a backslash, the backslash and the
    // char itself have been consumed.
    fn unescape_char(&mut self, escaped_char: char) -> Result<char, RegexError> {
        let c = match escaped_char {
            't' => '\t',     // horizontal tabulation
            'n' => '\n',     // line feed
            'r' => '\r',     // carriage return
            'f' => '\u{c}',  // form feed
            'v' => '\u{b}',  // vertical tabulation
            '0' => {
                if matches!(self.peek_char(0), Some('0'..='9')) {
                    return Err(RegexError::MessageWithLocation(
                        "Octal escape sequences are not supported.".to_owned(),
                        Location::from_position_and_length(&self.escape_start_position(), 3),
                    ));
                }
                '\0'
            }
            'x' => self.unescape_hex(2)?,
            'u' => {
                if self.peek_char_and_equals(0, '{') {
                    self.unescape_unicode_braced()?
                } else {
                    self.unescape_utf16()?
                }
            }
            'c' => match self.peek_char(0) {
                Some(letter) if letter.is_ascii_alphabetic() => {
                    self.next_char(); // consume the letter
                    char::from(letter as u8 % 32)
                }
                _ => {
                    return Err(RegexError::MessageWithLocation(
                        "Expect an ASCII letter for the control char escape \"\\c\".".to_owned(),
                        self.last_position.move_position_forward(),
                    ));
                }
            },
            c if c.is_ascii_alphanumeric() => {
                return Err(RegexError::MessageWithLocation(
                    format!("Unsupported escape char '{}'.", c),
                    Location::from_position_and_length(&self.escape_start_position(), 2),
                ));
            }
            // identity escape, e.g. `\.`, `\*`, `\/`
            c => c,
        };

        Ok(c)
    }

    fn lex_hex_digits(&mut self, count: usize) -> Result<u32, RegexError> {
        let mut codepoint_string = String::new();

        for _ in 0..count {
            match self.peek_char(0) {
                Some(c) if c.is_ascii_hexdigit() => {
                    codepoint_string.push(c);
                    self.next_char(); // consume digit
                }
                _ => {
                    return Err(RegexError::MessageWithLocation(
                        format!("Expect {} hexadecimal digits.", count),
                        self.last_position.move_position_forward(),
                    ));
                }
            }
        }

        u32::from_str_radix(&codepoint_string, 16).map_err(|_| {
            RegexError::MessageWithLocation(
                format!("Invalid hexadecimal number \"{}\".", codepoint_string),
                self.escape_start_position(),
            )
        })
    }

    fn unescape_hex(&mut self, count: usize) -> Result<char, RegexError> {
        let codepoint = self.lex_hex_digits(count)?;
        self.char_from_codepoint(codepoint)
    }

    fn unescape_utf16(&mut self) -> Result<char, RegexError> {
        // \uhhhh   //
        //   ^   ^__// to here
        //   |______// current char

        let high = self.lex_hex_digits(4)?;

        // combine a surrogate pair written as two escapes, e.g. `\ud83c\udf45`
        if (0xD800..=0xDBFF).contains(&high)
            && self.peek_char_and_equals(0, '\\')
            && self.peek_char_and_equals(1, 'u')
        {
            let mut low_string = String::new();
            for offset in 2..6 {
                match self.peek_char(offset) {
                    Some(c) if c.is_ascii_hexdigit() => low_string.push(c),
                    _ => break,
                }
            }

            if let Ok(low @ 0xDC00..=0xDFFF) = u32::from_str_radix(&low_string, 16) {
                for _ in 0..6 {
                    self.next_char(); // consume `\uhhhh`
                }

                let codepoint = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return self.char_from_codepoint(codepoint);
            }
        }

        self.char_from_codepoint(high)
    }

    fn unescape_unicode_braced(&mut self) -> Result<char, RegexError> {
        // \u{6587}?  //
        //   ^     ^__// to here
        //   |________// current char, validated

        self.next_char(); // consume char '{'

        let mut codepoint_string = String::new();

        loop {
            match self.next_char() {
                Some('}') => break,
                Some(c) if c.is_ascii_hexdigit() => {
                    codepoint_string.push(c);
                }
                Some(c) => {
                    return Err(RegexError::MessageWithLocation(
                        format!("Invalid character '{}' for unicode escape sequence.", c),
                        self.last_position,
                    ));
                }
                None => {
                    return Err(RegexError::UnexpectedEndOfPattern(
                        "Incomplete unicode escape sequence.".to_owned(),
                    ));
                }
            }

            if codepoint_string.len() > 6 {
                return Err(RegexError::MessageWithLocation(
                    "Unicode code point exceeds six digits.".to_owned(),
                    Location::from_position_pair_with_end_included(
                        &self.escape_start_position(),
                        &self.last_position,
                    ),
                ));
            }
        }

        if codepoint_string.is_empty() {
            return Err(RegexError::MessageWithLocation(
                "Empty unicode code point.".to_owned(),
                Location::from_position_pair_with_end_included(
                    &self.escape_start_position(),
                    &self.last_position,
                ),
            ));
        }

        let codepoint = u32::from_str_radix(&codepoint_string, 16).map_err(|_| {
            RegexError::MessageWithLocation(
                format!("Invalid unicode code point \"{}\".", codepoint_string),
                self.escape_start_position(),
            )
        })?;

        self.char_from_codepoint(codepoint)
    }

    fn char_from_codepoint(&self, codepoint: u32) -> Result<char, RegexError> {
        // valid code point: 0 to 0x10FFFF, excluding the surrogates
        char::from_u32(codepoint).ok_or_else(|| {
            RegexError::MessageWithLocation(
                format!("Invalid unicode code point 0x{:x}.", codepoint),
                Location::from_position_pair_with_end_included(
                    &self.escape_start_position(),
                    &self.last_position,
                ),
            )
        })
    }

    fn continue_lex_number(&mut self, first_digit: char) -> usize {
        // 123456N  //
        //  ^    ^__// to here
        //  |_______// current char, the first digit has been consumed

        let mut num_string = String::from(first_digit);

        while let Some(current_char) = self.peek_char(0) {
            if current_char.is_ascii_digit() {
                num_string.push(current_char);
                self.next_char(); // consume digit
            } else {
                break;
            }
        }

        // numbers too large for `usize` saturate, they are rejected
        // later as out-of-range group indices.
        num_string.parse::<usize>().unwrap_or(usize::MAX)
    }

    fn lex_identifier(&mut self) -> Result<String, RegexError> {
        // <name>?  //
        // ^     ^__// to here
        // |________// current char, validated

        self.next_char(); // consume '<'

        let mut name_string = String::new();

        loop {
            match self.peek_char(0) {
                Some('>') => break,
                Some(current_char) => {
                    let is_valid = if name_string.is_empty() {
                        current_char.is_alphabetic() || matches!(current_char, '_' | '$')
                    } else {
                        current_char.is_alphanumeric() || matches!(current_char, '_' | '$')
                    };

                    if !is_valid {
                        return Err(RegexError::MessageWithLocation(
                            format!("Invalid char '{}' for group name.", current_char),
                            self.last_position.move_position_forward(),
                        ));
                    }

                    name_string.push(current_char);
                    self.next_char(); // consume char
                }
                None => {
                    return Err(RegexError::UnexpectedEndOfPattern(
                        "Incomplete group name.".to_owned(),
                    ));
                }
            }
        }

        if name_string.is_empty() {
            return Err(RegexError::MessageWithLocation(
                "Expect a group name.".to_owned(),
                self.last_position.move_position_forward(),
            ));
        }

        self.expect_char('>', "angle bracket \">\"")?;

        Ok(name_string)
    }

    // Check whether the upcoming chars form a repetition such as `{3}`,
    // `{3,}` or `{3,5}`, returns the repetition and its length in chars.
    fn scan_repetition(&mut self) -> Option<(Repetition, usize)> {
        let mut offset = 1; // skip '{'

        let from = self.peek_number(&mut offset)?;

        match self.peek_char(offset)? {
            '}' => Some((Repetition::Specified(from), offset + 1)),
            ',' => {
                offset += 1;
                if self.peek_char_and_equals(offset, '}') {
                    Some((Repetition::AtLeast(from), offset + 1))
                } else {
                    let to = self.peek_number(&mut offset)?;
                    if self.peek_char_and_equals(offset, '}') {
                        Some((Repetition::Range(from, to), offset + 1))
                    } else {
                        None
                    }
                }
            }
            _ => None,
        }
    }

    fn peek_number(&mut self, offset: &mut usize) -> Option<usize> {
        let mut num_string = String::new();
        while let Some(c) = self.peek_char(*offset) {
            if !c.is_ascii_digit() {
                break;
            }
            num_string.push(c);
            *offset += 1;
        }

        if num_string.is_empty() {
            None
        } else {
            Some(num_string.parse::<usize>().unwrap_or(usize::MAX))
        }
    }

    fn lex_repetition(&mut self) -> Option<TokenWithRange> {
        // {...}?  //
        // ^    ^__// to here
        // |_______// from here, validated

        let (repetition, length) = self.scan_repetition()?;

        self.push_peek_position();

        for _ in 0..length {
            self.next_char(); // consume `{m,n}`
        }

        let lazy = if self.peek_char_and_equals(0, '?') {
            self.next_char(); // consume '?'
            true
        } else {
            false
        };

        let token = Token::Repetition(repetition, lazy);
        let range = Location::from_position_pair_with_end_included(
            &self.pop_saved_position(),
            &self.last_position,
        );

        Some(TokenWithRange { token, range })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        location::Location,
        token::{Repetition, Token, TokenWithRange},
        RegexError,
    };

    use super::lex_from_str;

    fn lex_str_to_vec_with_range(s: &str) -> Vec<TokenWithRange> {
        lex_from_str(s).unwrap()
    }

    fn lex_str_to_vec(s: &str) -> Vec<Token> {
        lex_str_to_vec_with_range(s)
            .into_iter()
            .map(|twr| twr.token)
            .collect()
    }

    #[test]
    fn test_lex_chars_and_metas() {
        assert_eq!(
            lex_str_to_vec("a.b|^c$"),
            vec![
                Token::Char('a'),
                Token::Dot,
                Token::Char('b'),
                Token::LogicOr,
                Token::StartAssertion,
                Token::Char('c'),
                Token::EndAssertion,
            ]
        );

        assert_eq!(
            lex_str_to_vec_with_range("a|b"),
            vec![
                TokenWithRange::new(Token::Char('a'), Location::new_range(0, 0, 0, 1)),
                TokenWithRange::new(Token::LogicOr, Location::new_range(1, 0, 1, 1)),
                TokenWithRange::new(Token::Char('b'), Location::new_range(2, 0, 2, 1)),
            ]
        );
    }

    #[test]
    fn test_lex_quantifiers() {
        assert_eq!(
            lex_str_to_vec("a*b+?c??d{2}e{2,}?f{2,5}"),
            vec![
                Token::Char('a'),
                Token::ZeroOrMore,
                Token::Char('b'),
                Token::OneOrMoreLazy,
                Token::Char('c'),
                Token::OptionalLazy,
                Token::Char('d'),
                Token::Repetition(Repetition::Specified(2), false),
                Token::Char('e'),
                Token::Repetition(Repetition::AtLeast(2), true),
                Token::Char('f'),
                Token::Repetition(Repetition::Range(2, 5), false),
            ]
        );

        assert_eq!(
            lex_str_to_vec_with_range("a{2,5}?"),
            vec![
                TokenWithRange::new(Token::Char('a'), Location::new_range(0, 0, 0, 1)),
                TokenWithRange::new(
                    Token::Repetition(Repetition::Range(2, 5), true),
                    Location::new_range(1, 0, 1, 6)
                ),
            ]
        );

        // braces that do not form a repetition are literal chars
        assert_eq!(
            lex_str_to_vec("{a}x{,2}{3"),
            vec![
                Token::Char('{'),
                Token::Char('a'),
                Token::Char('}'),
                Token::Char('x'),
                Token::Char('{'),
                Token::Char(','),
                Token::Char('2'),
                Token::Char('}'),
                Token::Char('{'),
                Token::Char('3'),
            ]
        );
    }

    #[test]
    fn test_lex_groups() {
        assert_eq!(
            lex_str_to_vec("(a)(?:b)(?<year>c)(?=d)(?!e)(?<=f)(?<!g)"),
            vec![
                Token::GroupStart,
                Token::Char('a'),
                Token::GroupEnd,
                Token::NonCapturing,
                Token::Char('b'),
                Token::GroupEnd,
                Token::NamedCapture("year".to_owned()),
                Token::Char('c'),
                Token::GroupEnd,
                Token::LookAhead,
                Token::Char('d'),
                Token::GroupEnd,
                Token::LookAheadNegative,
                Token::Char('e'),
                Token::GroupEnd,
                Token::LookBehind,
                Token::Char('f'),
                Token::GroupEnd,
                Token::LookBehindNegative,
                Token::Char('g'),
                Token::GroupEnd,
            ]
        );

        assert!(matches!(
            lex_from_str("(?x)"),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            lex_from_str("(?<1a>x)"),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            lex_from_str("(?<name"),
            Err(RegexError::UnexpectedEndOfPattern(_))
        ));
    }

    #[test]
    fn test_lex_escapes() {
        assert_eq!(
            lex_str_to_vec(r"\t\n\r\f\v\0\x41\u0042\u{1F345}\cJ\.\/\\"),
            vec![
                Token::Char('\t'),
                Token::Char('\n'),
                Token::Char('\r'),
                Token::Char('\u{c}'),
                Token::Char('\u{b}'),
                Token::Char('\0'),
                Token::Char('A'),
                Token::Char('B'),
                Token::Char('🍅'),
                Token::Char('\n'),
                Token::Char('.'),
                Token::Char('/'),
                Token::Char('\\'),
            ]
        );

        // surrogate pair
        assert_eq!(lex_str_to_vec(r"\ud83c\udf45"), vec![Token::Char('🍅')]);

        assert_eq!(
            lex_str_to_vec(r"\d\W\b\B\12\k<name>"),
            vec![
                Token::PresetCharSet('d'),
                Token::PresetCharSet('W'),
                Token::BoundaryAssertion('b'),
                Token::BoundaryAssertion('B'),
                Token::BackReferenceNumber(12),
                Token::BackReferenceIdentifier("name".to_owned()),
            ]
        );

        // errors
        assert!(matches!(
            lex_from_str(r"\"),
            Err(RegexError::UnexpectedEndOfPattern(_))
        ));

        assert_eq!(
            lex_from_str(r"a\q"),
            Err(RegexError::MessageWithLocation(
                "Unsupported escape char 'q'.".to_owned(),
                Location::new_range(1, 0, 1, 2)
            ))
        );

        assert!(lex_from_str(r"\x4").is_err());
        assert!(lex_from_str(r"\u{}").is_err());
        assert!(lex_from_str(r"\u{110000}").is_err());
        assert!(lex_from_str(r"\u{1234567}").is_err());
        assert!(lex_from_str(r"\ud800").is_err());
        assert!(lex_from_str(r"\c1").is_err());
        assert!(lex_from_str(r"\01").is_err());
        assert!(lex_from_str(r"\k").is_err());
    }

    #[test]
    fn test_lex_charset() {
        assert_eq!(
            lex_str_to_vec(r"[a-z\d_-]"),
            vec![
                Token::CharSetStart,
                Token::CharRange('a', 'z'),
                Token::PresetCharSet('d'),
                Token::Char('_'),
                Token::Char('-'),
                Token::CharSetEnd,
            ]
        );

        assert_eq!(
            lex_str_to_vec(r"[^\D\b\-\]x]"),
            vec![
                Token::CharSetStartNegative,
                Token::PresetCharSet('D'),
                Token::Char('\u{8}'),
                Token::Char('-'),
                Token::Char(']'),
                Token::Char('x'),
                Token::CharSetEnd,
            ]
        );

        // an escaped hyphen never forms a range
        assert_eq!(
            lex_str_to_vec(r"[a\-z]"),
            vec![
                Token::CharSetStart,
                Token::Char('a'),
                Token::Char('-'),
                Token::Char('z'),
                Token::CharSetEnd,
            ]
        );

        assert_eq!(
            lex_str_to_vec_with_range(r"[\x41-Z]"),
            vec![
                TokenWithRange::new(Token::CharSetStart, Location::new_range(0, 0, 0, 1)),
                TokenWithRange::new(Token::CharRange('A', 'Z'), Location::new_range(1, 0, 1, 6)),
                TokenWithRange::new(Token::CharSetEnd, Location::new_range(7, 0, 7, 1)),
            ]
        );

        // metas are plain chars inside a charset
        assert_eq!(
            lex_str_to_vec(r"[.*(]"),
            vec![
                Token::CharSetStart,
                Token::Char('.'),
                Token::Char('*'),
                Token::Char('('),
                Token::CharSetEnd,
            ]
        );

        // errors
        assert!(matches!(
            lex_from_str("[abc"),
            Err(RegexError::UnexpectedEndOfPattern(_))
        ));

        assert_eq!(
            lex_from_str("[z-a]"),
            Err(RegexError::MessageWithLocation(
                "Range out of order in charset, 'z' is greater than 'a'.".to_owned(),
                Location::new_range(1, 0, 1, 3)
            ))
        );

        assert!(lex_from_str(r"[\d-z]").is_err());
        assert!(lex_from_str(r"[\B]").is_err());
        assert!(lex_from_str(r"[\1]").is_err());
    }
}
