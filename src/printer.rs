// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Prints the AST back as a normalized regular expression, e.g.
// `a{0,}` is printed as `a*` and `(?:ab)` as `ab`.

use std::fmt::{Display, Write};

use crate::ast::{
    AnchorAssertionName, BackReference, BoundaryAssertionName, CharRange, CharSet,
    CharSetElement, Expression, Literal, LookAroundDirection, PresetCharSetName, Program,
    Quantifier,
};

fn write_escaped_char(f: &mut impl Write, c: char, in_charset: bool) -> std::fmt::Result {
    match c {
        '\t' => f.write_str("\\t"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\u{b}' => f.write_str("\\v"),
        '\u{c}' => f.write_str("\\f"),
        '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04x}", c as u32),
        c if c.is_ascii_control() => write!(f, "\\x{:02x}", c as u32),
        '\\' | ']' | '[' | '^' | '-' if in_charset => write!(f, "\\{}", c),
        '\\' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        | '/'
            if !in_charset =>
        {
            write!(f, "\\{}", c)
        }
        _ => f.write_char(c),
    }
}

impl Display for PresetCharSetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\\{}", self.to_char())
    }
}

impl Display for CharRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_escaped_char(f, self.start, true)?;
        f.write_char('-')?;
        write_escaped_char(f, self.end_included, true)
    }
}

impl Display for CharSetElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CharSetElement::Char(c) => write_escaped_char(f, *c, true),
            CharSetElement::CharRange(c) => write!(f, "{}", c),
            CharSetElement::PresetCharSet(p) => write!(f, "{}", p),
        }
    }
}

impl Display for CharSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.negative { "[^" } else { "[" })?;
        for element in &self.elements {
            write!(f, "{}", element)?;
        }
        f.write_char(']')
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Char(c) => write_escaped_char(f, *c, false),
            Literal::String(s) => {
                for c in s.chars() {
                    write_escaped_char(f, c, false)?;
                }
                Ok(())
            }
            Literal::AnyChar => f.write_char('.'),
            Literal::CharSet(c) => write!(f, "{}", c),
            Literal::PresetCharSet(p) => write!(f, "{}", p),
        }
    }
}

impl Display for BackReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackReference::Index(index) => write!(f, "\\{}", index),
            BackReference::Name(name) => write!(f, "\\k<{}>", name),
        }
    }
}

impl Display for AnchorAssertionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnchorAssertionName::Start => f.write_char('^'),
            AnchorAssertionName::End => f.write_char('$'),
        }
    }
}

impl Display for BoundaryAssertionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryAssertionName::IsBound => f.write_str("\\b"),
            BoundaryAssertionName::IsNotBound => f.write_str("\\B"),
        }
    }
}

impl Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let needs_group = match &self.expression {
            Expression::Group(_) | Expression::Or(_, _) | Expression::Quantifier(_) => true,
            Expression::Literal(Literal::String(s)) => s.chars().count() > 1,
            _ => false,
        };

        if needs_group {
            write!(f, "(?:{})", self.expression)?;
        } else {
            write!(f, "{}", Term(&self.expression))?;
        }

        match (self.min, self.max) {
            (0, None) => f.write_char('*')?,
            (1, None) => f.write_char('+')?,
            (0, Some(1)) => f.write_char('?')?,
            (m, None) => write!(f, "{{{},}}", m)?,
            (m, Some(n)) if m == n => write!(f, "{{{}}}", m)?,
            (m, Some(n)) => write!(f, "{{{},{}}}", m, n)?,
        }

        if self.lazy {
            f.write_char('?')?;
        }

        Ok(())
    }
}

// An expression inside a sequence, where a disjunction must be
// wrapped in a non-capturing group.
struct Term<'a>(&'a Expression);

impl Display for Term<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expression::Literal(e) => write!(f, "{}", e),
            Expression::BackReference(e) => write!(f, "{}", e),
            Expression::AnchorAssertion(e) => write!(f, "{}", e),
            Expression::BoundaryAssertion(e) => write!(f, "{}", e),
            Expression::LookAround(look_around) => {
                let prefix = match (look_around.direction, look_around.negative) {
                    (LookAroundDirection::Ahead, false) => "(?=",
                    (LookAroundDirection::Ahead, true) => "(?!",
                    (LookAroundDirection::Behind, false) => "(?<=",
                    (LookAroundDirection::Behind, true) => "(?<!",
                };
                write!(f, "{}{})", prefix, look_around.expression)
            }
            Expression::Group(expressions) => write_sequence(f, expressions),
            Expression::Capture(capture) => match &capture.name {
                Some(name) => write!(f, "(?<{}>{})", name, capture.expression),
                None => write!(f, "({})", capture.expression),
            },
            Expression::Quantifier(quantifier) => write!(f, "{}", quantifier),
            Expression::Or(_, _) => write!(f, "(?:{})", self.0),
        }
    }
}

fn write_sequence(f: &mut std::fmt::Formatter<'_>, expressions: &[Expression]) -> std::fmt::Result {
    let terms: Vec<String> = expressions
        .iter()
        .map(|expression| Term(expression).to_string())
        .collect();

    for (index, term) in terms.iter().enumerate() {
        // `\1` followed by `2` would read as `\12`
        let is_ambiguous = matches!(expressions[index], Expression::BackReference(BackReference::Index(_)))
            && terms
                .get(index + 1)
                .is_some_and(|next| next.starts_with(|c: char| c.is_ascii_digit()));

        if is_ambiguous {
            write!(f, "(?:{})", term)?;
        } else {
            f.write_str(term)?;
        }
    }

    Ok(())
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Or(left, right) => write!(f, "{}|{}", left, right),
            _ => write!(f, "{}", Term(self)),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.expressions.as_slice() {
            [] => f.write_str("(?:)"),
            [expression] => write!(f, "{}", expression),
            expressions => write_sequence(f, expressions),
        }
    }
}
