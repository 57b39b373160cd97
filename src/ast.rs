// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

#[derive(Debug, PartialEq)]
pub struct Program {
    pub expressions: Vec<Expression>,

    /// The names of all capture groups, indexed by the group number.
    /// Index 0 is the whole match, which never has a name.
    pub capture_group_names: Vec<Option<String>>,
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Literal(Literal),
    BackReference(BackReference),
    AnchorAssertion(AnchorAssertionName),
    BoundaryAssertion(BoundaryAssertionName),
    LookAround(Box<LookAround>),

    /// A sequence of expressions, e.g. the content of a non-capturing group.
    /// An empty group matches the empty string.
    Group(Vec<Expression>),

    Capture(Box<Capture>),
    Quantifier(Box<Quantifier>),

    /**
     * Disjunction
     * https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Regular_expressions/Disjunction
     * */
    Or(Box<Expression>, Box<Expression>),
}

#[derive(Debug, PartialEq)]
pub struct LookAround {
    pub direction: LookAroundDirection,
    pub negative: bool,
    pub expression: Expression,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LookAroundDirection {
    Ahead,
    Behind,
}

#[derive(Debug, PartialEq)]
pub struct Capture {
    pub index: usize, // starts from 1
    pub name: Option<String>,
    pub expression: Expression,
}

#[derive(Debug, PartialEq)]
pub struct Quantifier {
    pub expression: Expression,
    pub min: usize,
    pub max: Option<usize>, // `None` for unbounded
    pub lazy: bool,
}

#[derive(Debug, PartialEq)]
pub enum Literal {
    Char(char),
    String(String),
    AnyChar,
    CharSet(CharSet),
    PresetCharSet(PresetCharSetName),
}

#[derive(Debug, PartialEq)]
pub struct CharSet {
    pub negative: bool,
    pub elements: Vec<CharSetElement>,
}

#[derive(Debug, PartialEq)]
pub enum CharSetElement {
    Char(char),
    CharRange(CharRange),
    PresetCharSet(PresetCharSetName),
}

#[derive(Debug, PartialEq)]
pub struct CharRange {
    pub start: char,
    pub end_included: char,
}

#[derive(Debug, PartialEq, Clone)]
pub enum BackReference {
    Index(usize),
    Name(String),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AnchorAssertionName {
    Start,
    End,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BoundaryAssertionName {
    IsBound,
    IsNotBound,
}

#[allow(clippy::enum_variant_names)]
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PresetCharSetName {
    CharWord,
    CharNotWord,
    CharDigit,
    CharNotDigit,
    CharSpace,
    CharNotSpace,
}

impl PresetCharSetName {
    pub fn from_char(name_char: char) -> Option<Self> {
        let name = match name_char {
            'w' => PresetCharSetName::CharWord,
            'W' => PresetCharSetName::CharNotWord,
            'd' => PresetCharSetName::CharDigit,
            'D' => PresetCharSetName::CharNotDigit,
            's' => PresetCharSetName::CharSpace,
            'S' => PresetCharSetName::CharNotSpace,
            _ => return None,
        };
        Some(name)
    }

    pub fn to_char(&self) -> char {
        match self {
            PresetCharSetName::CharWord => 'w',
            PresetCharSetName::CharNotWord => 'W',
            PresetCharSetName::CharDigit => 'd',
            PresetCharSetName::CharNotDigit => 'D',
            PresetCharSetName::CharSpace => 's',
            PresetCharSetName::CharNotSpace => 'S',
        }
    }
}

impl Expression {
    /// Assertions match a position instead of chars.
    pub fn is_assertion(&self) -> bool {
        matches!(
            self,
            Expression::AnchorAssertion(_)
                | Expression::BoundaryAssertion(_)
                | Expression::LookAround(_)
        )
    }

    /// Collect the indices of the capture groups inside this expression.
    pub fn collect_capture_indices(&self, indices: &mut Vec<usize>) {
        match self {
            Expression::Capture(capture) => {
                indices.push(capture.index);
                capture.expression.collect_capture_indices(indices);
            }
            Expression::Group(expressions) => {
                for expression in expressions {
                    expression.collect_capture_indices(indices);
                }
            }
            Expression::LookAround(look_around) => {
                look_around.expression.collect_capture_indices(indices);
            }
            Expression::Quantifier(quantifier) => {
                quantifier.expression.collect_capture_indices(indices);
            }
            Expression::Or(left, right) => {
                left.collect_capture_indices(indices);
                right.collect_capture_indices(indices);
            }
            Expression::Literal(_)
            | Expression::BackReference(_)
            | Expression::AnchorAssertion(_)
            | Expression::BoundaryAssertion(_) => {}
        }
    }
}
