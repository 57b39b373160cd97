// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::ops::{Add, BitOr, Mul};

use crate::ast::{Expression, Literal};

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MatchLength {
    Variable,
    Fixed(usize), // length by char (unicode char codepoint)
}

impl Add for MatchLength {
    type Output = MatchLength;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (MatchLength::Fixed(v0), MatchLength::Fixed(v1)) => MatchLength::Fixed(v0 + v1),
            _ => MatchLength::Variable,
        }
    }
}

impl Mul<usize> for MatchLength {
    type Output = MatchLength;

    fn mul(self, rhs: usize) -> Self::Output {
        match self {
            MatchLength::Variable => MatchLength::Variable,
            MatchLength::Fixed(v) => match v.checked_mul(rhs) {
                Some(length) => MatchLength::Fixed(length),
                None => MatchLength::Variable,
            },
        }
    }
}

impl BitOr for MatchLength {
    type Output = MatchLength;

    fn bitor(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (MatchLength::Fixed(v0), MatchLength::Fixed(v1)) if v0 == v1 => MatchLength::Fixed(v0),
            _ => MatchLength::Variable,
        }
    }
}

/// The number of chars an expression always consumes, used by lookbehind
/// to step back before trying its body.
pub fn get_match_length(exp: &Expression) -> MatchLength {
    match exp {
        Expression::Literal(literal) => match literal {
            Literal::String(s) => MatchLength::Fixed(s.chars().count()),
            Literal::Char(_)
            | Literal::AnyChar
            | Literal::CharSet(_)
            | Literal::PresetCharSet(_) => MatchLength::Fixed(1),
        },
        Expression::BackReference(_) => MatchLength::Variable,
        Expression::AnchorAssertion(_)
        | Expression::BoundaryAssertion(_)
        | Expression::LookAround(_) => MatchLength::Fixed(0),
        Expression::Group(exps) => exps
            .iter()
            .map(get_match_length)
            .fold(MatchLength::Fixed(0), |acc, item| acc + item),
        Expression::Capture(capture) => get_match_length(&capture.expression),
        Expression::Quantifier(quantifier) => match quantifier.max {
            Some(max) if max == quantifier.min => get_match_length(&quantifier.expression) * max,
            _ => MatchLength::Variable,
        },
        Expression::Or(left, right) => get_match_length(left) | get_match_length(right),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::parser::parse_from_str;

    use super::{get_match_length, MatchLength};

    fn match_length_of(pattern: &str) -> MatchLength {
        let program = parse_from_str(pattern).unwrap();
        program
            .expressions
            .iter()
            .map(get_match_length)
            .fold(MatchLength::Fixed(0), |acc, item| acc + item)
    }

    #[test]
    fn test_match_length() {
        assert_eq!(match_length_of("abc"), MatchLength::Fixed(3));
        assert_eq!(match_length_of(r"a\d[xy]."), MatchLength::Fixed(4));
        assert_eq!(match_length_of(r"^a\b(?=bc)$"), MatchLength::Fixed(1));
        assert_eq!(match_length_of("(ab){3}"), MatchLength::Fixed(6));
        assert_eq!(match_length_of("ab|cd"), MatchLength::Fixed(2));
        assert_eq!(match_length_of("中文"), MatchLength::Fixed(2));
        assert_eq!(match_length_of(""), MatchLength::Fixed(0));

        assert_eq!(match_length_of("a|bc"), MatchLength::Variable);
        assert_eq!(match_length_of("a+"), MatchLength::Variable);
        assert_eq!(match_length_of("a{2,3}"), MatchLength::Variable);
        assert_eq!(match_length_of(r"(a)\1"), MatchLength::Variable);
    }
}
