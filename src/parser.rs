// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

pub const PARSER_PEEK_TOKEN_MAX_COUNT: usize = 2;

use crate::{
    ast::{
        AnchorAssertionName, BackReference, BoundaryAssertionName, Capture, CharRange, CharSet,
        CharSetElement, Expression, Literal, LookAround, LookAroundDirection, PresetCharSetName,
        Program, Quantifier,
    },
    lexer::lex_from_str,
    location::Location,
    peekableiter::PeekableIter,
    token::{Repetition, Token, TokenWithRange},
    RegexError,
};

pub fn parse_from_str(s: &str) -> Result<Program, RegexError> {
    let tokens = lex_from_str(s)?;
    let mut token_iter = tokens.into_iter();
    let mut peekable_token_iter = PeekableIter::new(&mut token_iter, PARSER_PEEK_TOKEN_MAX_COUNT);
    let mut parser = Parser::new(&mut peekable_token_iter);
    parser.parse_program()
}

struct Parser<'a, 'b> {
    upstream: &'a mut PeekableIter<'b, TokenWithRange>,
    last_range: Location,

    // index 0 is the whole match
    capture_group_names: Vec<Option<String>>,

    // back references may refer to groups defined later in the pattern,
    // so they are validated after the whole pattern has been parsed.
    back_references: Vec<(BackReference, Location)>,
}

impl<'a, 'b> Parser<'a, 'b> {
    fn new(upstream: &'a mut PeekableIter<'b, TokenWithRange>) -> Self {
        Self {
            upstream,
            last_range: Location::new_range(0, 0, 0, 0),
            capture_group_names: vec![None],
            back_references: vec![],
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        match self.upstream.next() {
            Some(TokenWithRange { token, range }) => {
                self.last_range = range;
                Some(token)
            }
            None => None,
        }
    }

    fn peek_token(&mut self, offset: usize) -> Option<Token> {
        self.upstream
            .peek(offset)
            .map(|TokenWithRange { token, .. }| token.clone())
    }

    fn peek_token_is_quantifier(&mut self) -> bool {
        matches!(self.upstream.peek(0), Some(TokenWithRange { token, .. }) if token.is_quantifier())
    }

    fn consume_token(
        &mut self,
        expected_token: &Token,
        token_description: &str,
    ) -> Result<(), RegexError> {
        match self.next_token() {
            Some(token) => {
                if &token == expected_token {
                    Ok(())
                } else {
                    Err(RegexError::MessageWithLocation(
                        format!("Expect token: {}.", token_description),
                        self.last_range.get_position_by_range_start(),
                    ))
                }
            }
            None => Err(RegexError::UnexpectedEndOfPattern(format!(
                "Expect token: {}.",
                token_description
            ))),
        }
    }
}

impl Parser<'_, '_> {
    fn parse_program(&mut self) -> Result<Program, RegexError> {
        let expression = self.parse_expression()?;

        // the top level expression stops at an unmatched ')'
        if self.next_token().is_some() {
            return Err(RegexError::MessageWithLocation(
                "Unmatched parenthesis \")\".".to_owned(),
                self.last_range,
            ));
        }

        self.check_back_references()?;

        // extract elements from the top group
        let expressions = match expression {
            Expression::Group(expressions) => expressions,
            _ => vec![expression],
        };

        Ok(Program {
            expressions,
            capture_group_names: std::mem::take(&mut self.capture_group_names),
        })
    }

    fn parse_expression(&mut self) -> Result<Expression, RegexError> {
        // token ...
        // -----
        // ^
        // | current, None or Some(...)

        self.parse_logic_or()
    }

    fn parse_logic_or(&mut self) -> Result<Expression, RegexError> {
        // token ... [ "|" expression ]
        // -----
        // ^
        // | current, None or Some(...)

        // "|" has the lowest precedence, e.g.
        // "ab|cd" == "(?:ab)|(?:cd)"
        // "ab|cd" != "a(?:b|c)d"
        let left = self.parse_consecutive_expression()?;

        if let Some(Token::LogicOr) = self.peek_token(0) {
            self.next_token(); // consume "|"

            // right-associative, a|b|c -> a|(b|c)
            let right = self.parse_expression()?;
            Ok(Expression::Or(Box::new(left), Box::new(right)))
        } else {
            Ok(left)
        }
    }

    fn parse_consecutive_expression(&mut self) -> Result<Expression, RegexError> {
        // token ...
        // -----
        // ^
        // | current, None or Some(...)

        let mut expressions = vec![];
        while let Some(token) = self.peek_token(0) {
            match token {
                // terminator
                Token::GroupEnd | Token::LogicOr => {
                    break;
                }
                _ => {
                    let expression = self.parse_notations()?;
                    expressions.push(expression);
                }
            }
        }

        let mut expressions = merge_continuous_chars(expressions);

        // escape the group if it contains only one element,
        // an empty group matches the empty string.
        if expressions.len() == 1 {
            Ok(expressions.remove(0))
        } else {
            Ok(Expression::Group(expressions))
        }
    }

    fn parse_notations(&mut self) -> Result<Expression, RegexError> {
        // token ... notation ?
        // -----              -
        // ^                  ^__ to here
        // | current, Some(...)

        let expression = self.parse_primary_expression()?;

        let token = match self.peek_token(0) {
            Some(token) if token.is_quantifier() => token,
            _ => return Ok(expression),
        };

        self.next_token(); // consume quantifier

        if expression.is_assertion() {
            return Err(RegexError::MessageWithLocation(
                "Nothing to repeat.".to_owned(),
                self.last_range,
            ));
        }

        let (min, max, lazy) = match token {
            Token::ZeroOrMore => (0, None, false),
            Token::ZeroOrMoreLazy => (0, None, true),
            Token::OneOrMore => (1, None, false),
            Token::OneOrMoreLazy => (1, None, true),
            Token::Optional => (0, Some(1), false),
            Token::OptionalLazy => (0, Some(1), true),
            Token::Repetition(repetition, lazy) => match repetition {
                Repetition::Specified(n) => (n, Some(n), lazy),
                Repetition::AtLeast(n) => (n, None, lazy),
                Repetition::Range(m, n) => {
                    if m > n {
                        return Err(RegexError::MessageWithLocation(
                            "Numbers out of order in {} quantifier.".to_owned(),
                            self.last_range,
                        ));
                    }
                    (m, Some(n), lazy)
                }
            },
            _ => unreachable!(),
        };

        // a quantifier can not be quantified again, e.g. `a**` and `a{2}+`
        if self.peek_token_is_quantifier() {
            self.next_token();
            return Err(RegexError::MessageWithLocation(
                "Nothing to repeat.".to_owned(),
                self.last_range,
            ));
        }

        Ok(Expression::Quantifier(Box::new(Quantifier {
            expression,
            min,
            max,
            lazy,
        })))
    }

    fn parse_primary_expression(&mut self) -> Result<Expression, RegexError> {
        // token ...
        // ---------
        // ^
        // | current, Some(...)

        // primary expressions:
        // - literal
        // - anchor assertion
        // - boundary assertion
        // - look around assertion
        // - group
        // - back reference
        let token = match self.peek_token(0) {
            Some(token) => token,
            None => {
                return Err(RegexError::UnexpectedEndOfPattern(
                    "Expect an expression.".to_owned(),
                ));
            }
        };

        let expression = match token {
            Token::StartAssertion => {
                self.next_token(); // consume '^'
                Expression::AnchorAssertion(AnchorAssertionName::Start)
            }
            Token::EndAssertion => {
                self.next_token(); // consume '$'
                Expression::AnchorAssertion(AnchorAssertionName::End)
            }
            Token::BoundaryAssertion(c) => {
                self.next_token(); // consume boundary assertion
                if c == 'b' {
                    Expression::BoundaryAssertion(BoundaryAssertionName::IsBound)
                } else {
                    Expression::BoundaryAssertion(BoundaryAssertionName::IsNotBound)
                }
            }
            Token::LookAhead
            | Token::LookAheadNegative
            | Token::LookBehind
            | Token::LookBehindNegative => self.parse_look_around()?,
            Token::GroupStart | Token::NonCapturing | Token::NamedCapture(_) => {
                self.parse_group()?
            }
            Token::BackReferenceNumber(index) => {
                self.next_token(); // consume '\num'
                let back_reference = BackReference::Index(index);
                self.back_references
                    .push((back_reference.clone(), self.last_range));
                Expression::BackReference(back_reference)
            }
            Token::BackReferenceIdentifier(name) => {
                self.next_token(); // consume '\k<name>'
                let back_reference = BackReference::Name(name);
                self.back_references
                    .push((back_reference.clone(), self.last_range));
                Expression::BackReference(back_reference)
            }
            _ => {
                let literal = self.parse_literal()?;
                Expression::Literal(literal)
            }
        };

        Ok(expression)
    }

    fn parse_look_around(&mut self) -> Result<Expression, RegexError> {
        // "(?=" {expression} ")" ?
        // ----                   -
        // ^                      ^-- to here
        // | current, validated
        //
        // also "(?!", "(?<=" and "(?<!"

        let (direction, negative) = match self.next_token() {
            Some(Token::LookAhead) => (LookAroundDirection::Ahead, false),
            Some(Token::LookAheadNegative) => (LookAroundDirection::Ahead, true),
            Some(Token::LookBehind) => (LookAroundDirection::Behind, false),
            Some(Token::LookBehindNegative) => (LookAroundDirection::Behind, true),
            _ => unreachable!(),
        };

        let expression = self.parse_expression()?;
        self.consume_token(&Token::GroupEnd, "right parenthesis \")\"")?;

        Ok(Expression::LookAround(Box::new(LookAround {
            direction,
            negative,
            expression,
        })))
    }

    fn parse_group(&mut self) -> Result<Expression, RegexError> {
        // "(" {expression} ")" ?
        // ---                  -
        // ^                    ^-- to here
        // | current, validated
        //
        // also:
        // - "(?:" {expression} ")"
        // - "(?<...>" {expression} ")"

        // consume "(", "(?:" or "(?<...>"
        let head_token = self.next_token();

        // groups are numbered by the position of their opening parenthesis
        let capture_index_and_name = match head_token {
            Some(Token::GroupStart) => {
                let index = self.capture_group_names.len();
                self.capture_group_names.push(None);
                Some((index, None))
            }
            Some(Token::NamedCapture(name)) => {
                if self
                    .capture_group_names
                    .iter()
                    .any(|item| item.as_deref() == Some(name.as_str()))
                {
                    return Err(RegexError::MessageWithLocation(
                        format!("Duplicate capture group name \"{}\".", name),
                        self.last_range,
                    ));
                }

                let index = self.capture_group_names.len();
                self.capture_group_names.push(Some(name.clone()));
                Some((index, Some(name)))
            }
            Some(Token::NonCapturing) => None,
            _ => unreachable!(),
        };

        let expression = self.parse_expression()?;

        // consume ")"
        self.consume_token(&Token::GroupEnd, "right parenthesis \")\"")?;

        let group_expression = match capture_index_and_name {
            Some((index, name)) => Expression::Capture(Box::new(Capture {
                index,
                name,
                expression,
            })),
            None => expression,
        };

        Ok(group_expression)
    }

    fn parse_literal(&mut self) -> Result<Literal, RegexError> {
        // token ...
        // -----
        // ^
        // | current, Some(...)

        // literals:
        // - char
        // - any char
        // - charset
        // - preset charset

        let literal = match self.next_token() {
            Some(Token::Char(c)) => Literal::Char(c),
            Some(Token::Dot) => Literal::AnyChar,
            Some(Token::PresetCharSet(c)) => Literal::PresetCharSet(self.preset_charset_name(c)?),
            Some(Token::CharSetStart) => Literal::CharSet(self.continue_parse_charset(false)?),
            Some(Token::CharSetStartNegative) => {
                Literal::CharSet(self.continue_parse_charset(true)?)
            }
            Some(token) if token.is_quantifier() => {
                return Err(RegexError::MessageWithLocation(
                    "Nothing to repeat.".to_owned(),
                    self.last_range,
                ));
            }
            Some(_) => {
                return Err(RegexError::MessageWithLocation(
                    "Expect a literal.".to_owned(),
                    self.last_range,
                ));
            }
            None => {
                return Err(RegexError::UnexpectedEndOfPattern(
                    "Expect a literal.".to_owned(),
                ));
            }
        };

        Ok(literal)
    }

    fn continue_parse_charset(&mut self, negative: bool) -> Result<CharSet, RegexError> {
        // "[" {char | char_range | preset_charset} "]" ?
        //  ^                                           ^__ to here
        //  |__ current, the head has been consumed

        let mut elements = vec![];

        loop {
            let element = match self.next_token() {
                Some(Token::CharSetEnd) => break,
                Some(Token::Char(c)) => CharSetElement::Char(c),
                Some(Token::CharRange(start, end_included)) => {
                    CharSetElement::CharRange(CharRange {
                        start,
                        end_included,
                    })
                }
                Some(Token::PresetCharSet(c)) => {
                    CharSetElement::PresetCharSet(self.preset_charset_name(c)?)
                }
                Some(_) => {
                    return Err(RegexError::MessageWithLocation(
                        "Unsupported charset element.".to_owned(),
                        self.last_range,
                    ));
                }
                None => {
                    return Err(RegexError::UnexpectedEndOfPattern(
                        "Expect token: right bracket \"]\".".to_owned(),
                    ));
                }
            };

            elements.push(element);
        }

        Ok(CharSet { negative, elements })
    }

    fn preset_charset_name(&self, name_char: char) -> Result<PresetCharSetName, RegexError> {
        PresetCharSetName::from_char(name_char).ok_or_else(|| {
            RegexError::MessageWithLocation(
                format!("Unknown preset charset \"\\{}\".", name_char),
                self.last_range,
            )
        })
    }

    fn check_back_references(&self) -> Result<(), RegexError> {
        let group_count = self.capture_group_names.len() - 1;

        for (back_reference, range) in &self.back_references {
            match back_reference {
                BackReference::Index(index) => {
                    if *index == 0 || *index > group_count {
                        return Err(RegexError::MessageWithLocation(
                            format!(
                                "Invalid back reference \"\\{}\", the pattern has {} capture group(s).",
                                index, group_count
                            ),
                            *range,
                        ));
                    }
                }
                BackReference::Name(name) => {
                    if !self
                        .capture_group_names
                        .iter()
                        .any(|item| item.as_deref() == Some(name.as_str()))
                    {
                        return Err(RegexError::MessageWithLocation(
                            format!("Invalid named back reference \"\\k<{}>\".", name),
                            *range,
                        ));
                    }
                }
            }
        }

        Ok(())
    }
}

// Merge continuous chars into strings, e.g. 'a', 'b', 'c' into "abc".
fn merge_continuous_chars(expressions: Vec<Expression>) -> Vec<Expression> {
    let mut merged: Vec<Expression> = vec![];

    for expression in expressions {
        let c = match expression {
            Expression::Literal(Literal::Char(c)) => c,
            _ => {
                merged.push(expression);
                continue;
            }
        };

        match merged.pop() {
            Some(Expression::Literal(Literal::Char(previous))) => {
                merged.push(Expression::Literal(Literal::String(String::from_iter([
                    previous, c,
                ]))));
            }
            Some(Expression::Literal(Literal::String(mut s))) => {
                s.push(c);
                merged.push(Expression::Literal(Literal::String(s)));
            }
            Some(other) => {
                merged.push(other);
                merged.push(Expression::Literal(Literal::Char(c)));
            }
            None => {
                merged.push(Expression::Literal(Literal::Char(c)));
            }
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::{
            Capture, CharRange, CharSet, CharSetElement, Expression, Literal, PresetCharSetName,
            Program, Quantifier,
        },
        RegexError,
    };

    use super::parse_from_str;

    #[test]
    fn test_parse_literal_simple() {
        {
            let program = parse_from_str(r#"a\w"#).unwrap();

            assert_eq!(
                program,
                Program {
                    expressions: vec![
                        Expression::Literal(Literal::Char('a')),
                        Expression::Literal(Literal::PresetCharSet(PresetCharSetName::CharWord)),
                    ],
                    capture_group_names: vec![None],
                }
            );

            assert_eq!(program.to_string(), r#"a\w"#);
        }

        // merge continuous chars
        {
            let program = parse_from_str(r#"abc\dmn\dp\dxyz"#).unwrap();

            assert_eq!(
                program.expressions,
                vec![
                    Expression::Literal(Literal::String("abc".to_owned())),
                    Expression::Literal(Literal::PresetCharSet(PresetCharSetName::CharDigit)),
                    Expression::Literal(Literal::String("mn".to_owned())),
                    Expression::Literal(Literal::PresetCharSet(PresetCharSetName::CharDigit)),
                    Expression::Literal(Literal::Char('p')),
                    Expression::Literal(Literal::PresetCharSet(PresetCharSetName::CharDigit)),
                    Expression::Literal(Literal::String("xyz".to_owned())),
                ]
            );

            assert_eq!(program.to_string(), r#"abc\dmn\dp\dxyz"#);
        }

        // escaped metas
        assert_eq!(
            parse_from_str(r#"1\+1=2\.\/"#).unwrap().to_string(),
            r#"1\+1=2\.\/"#
        );

        // empty pattern
        assert_eq!(
            parse_from_str("").unwrap(),
            Program {
                expressions: vec![],
                capture_group_names: vec![None],
            }
        );
        assert_eq!(parse_from_str("").unwrap().to_string(), "(?:)");
    }

    #[test]
    fn test_parse_literal_charset() {
        let program = parse_from_str(r#"[a0-9\w]"#).unwrap();

        assert_eq!(
            program.expressions,
            vec![Expression::Literal(Literal::CharSet(CharSet {
                negative: false,
                elements: vec![
                    CharSetElement::Char('a'),
                    CharSetElement::CharRange(CharRange {
                        start: '0',
                        end_included: '9'
                    }),
                    CharSetElement::PresetCharSet(PresetCharSetName::CharWord),
                ]
            }))]
        );

        assert_eq!(program.to_string(), r#"[a0-9\w]"#);

        // negative
        assert_eq!(
            parse_from_str(r#"[^a-z\s]"#).unwrap().to_string(),
            r#"[^a-z\s]"#
        );

        // special chars inside charset
        assert_eq!(
            parse_from_str(r#"[\]\-^.]"#).unwrap().to_string(),
            r#"[\]\-\^.]"#
        );
    }

    #[test]
    fn test_parse_expression_notations() {
        assert_eq!(
            parse_from_str(r#"a?b+c*x??y+?z*?"#).unwrap().to_string(),
            r#"a?b+c*x??y+?z*?"#
        );

        assert_eq!(
            parse_from_str(r#"a{3}b{5,7}c{11,}y{5,7}?z{11,}?"#)
                .unwrap()
                .to_string(),
            r#"a{3}b{5,7}c{11,}y{5,7}?z{11,}?"#
        );

        // normalized
        assert_eq!(
            parse_from_str(r#"a{0,}b{1,}c{0,1}d{2,2}"#)
                .unwrap()
                .to_string(),
            r#"a*b+c?d{2}"#
        );

        // only the last char of a string is quantified
        assert_eq!(
            parse_from_str("abc+").unwrap().expressions,
            vec![
                Expression::Literal(Literal::String("ab".to_owned())),
                Expression::Quantifier(Box::new(Quantifier {
                    expression: Expression::Literal(Literal::Char('c')),
                    min: 1,
                    max: None,
                    lazy: false
                }))
            ]
        );

        // err: nothing to repeat
        assert!(matches!(
            parse_from_str(r#"*a"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            parse_from_str(r#"a**"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            parse_from_str(r#"a|?"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            parse_from_str(r#"^*"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            parse_from_str(r#"\b+"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        // err: out of order
        assert!(matches!(
            parse_from_str(r#"a{3,2}"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));
    }

    #[test]
    fn test_parse_expression_logic_or() {
        {
            let program = parse_from_str(r#"a|b"#).unwrap();

            assert_eq!(
                program.expressions,
                vec![Expression::Or(
                    Box::new(Expression::Literal(Literal::Char('a'))),
                    Box::new(Expression::Literal(Literal::Char('b'))),
                )]
            );

            assert_eq!(program.to_string(), r#"a|b"#);
        }

        {
            let program = parse_from_str(r#"a|b|c"#).unwrap();

            assert_eq!(
                program.expressions,
                vec![Expression::Or(
                    Box::new(Expression::Literal(Literal::Char('a'))),
                    Box::new(Expression::Or(
                        Box::new(Expression::Literal(Literal::Char('b'))),
                        Box::new(Expression::Literal(Literal::Char('c'))),
                    )),
                )]
            );

            assert_eq!(program.to_string(), r#"a|b|c"#);
        }

        assert_eq!(
            parse_from_str(r#"\d+|[\w-]+"#).unwrap().to_string(),
            r#"\d+|[\w\-]+"#
        );

        // empty alternatives
        assert_eq!(
            parse_from_str(r#"a|"#).unwrap().expressions,
            vec![Expression::Or(
                Box::new(Expression::Literal(Literal::Char('a'))),
                Box::new(Expression::Group(vec![])),
            )]
        );

        // alternatives inside a sequence are grouped
        assert_eq!(
            parse_from_str(r#"x(?:a|b)y"#).unwrap().to_string(),
            r#"x(?:a|b)y"#
        );
    }

    #[test]
    fn test_parse_expression_group() {
        assert_eq!(
            parse_from_str(r#"(foo\d)(b(bar\d))$"#).unwrap().to_string(),
            r#"(foo\d)(b(bar\d))$"#
        );

        // non-capturing groups are unwrapped when possible
        assert_eq!(
            parse_from_str(r#"(?:foo\d)(?:b(?:bar\d))$"#)
                .unwrap()
                .to_string(),
            r#"foo\dbbar\d$"#
        );

        assert_eq!(
            parse_from_str(r#"(?:foo\d){3}(?:b(?:bar){5})$"#)
                .unwrap()
                .to_string(),
            r#"(?:foo\d){3}b(?:bar){5}$"#
        );

        // capture group indices follow the opening parentheses
        let program = parse_from_str(r#"((a)(?<x>b))"#).unwrap();
        assert_eq!(
            program.capture_group_names,
            vec![None, None, None, Some("x".to_owned())]
        );

        assert_eq!(
            program.expressions,
            vec![Expression::Capture(Box::new(Capture {
                index: 1,
                name: None,
                expression: Expression::Group(vec![
                    Expression::Capture(Box::new(Capture {
                        index: 2,
                        name: None,
                        expression: Expression::Literal(Literal::Char('a'))
                    })),
                    Expression::Capture(Box::new(Capture {
                        index: 3,
                        name: Some("x".to_owned()),
                        expression: Expression::Literal(Literal::Char('b'))
                    })),
                ])
            }))]
        );

        // empty group
        assert_eq!(parse_from_str(r#"()"#).unwrap().to_string(), "()");

        // err: unmatched parentheses
        assert!(matches!(
            parse_from_str(r#"(a"#),
            Err(RegexError::UnexpectedEndOfPattern(_))
        ));

        assert!(matches!(
            parse_from_str(r#"a)"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        // err: duplicate names
        assert!(matches!(
            parse_from_str(r#"(?<x>a)(?<x>b)"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));
    }

    #[test]
    fn test_parse_expression_anchor_and_boundary_assertions() {
        assert_eq!(
            parse_from_str(r#"^ab\bcd\Bef$"#).unwrap().to_string(),
            r#"^ab\bcd\Bef$"#
        );
    }

    #[test]
    fn test_parse_expression_back_reference() {
        assert_eq!(
            parse_from_str(r#"(?<tag>\w+).+\k<tag>\1"#)
                .unwrap()
                .to_string(),
            r#"(?<tag>\w+).+\k<tag>\1"#
        );

        // forward reference
        assert_eq!(
            parse_from_str(r#"\1(a)"#).unwrap().to_string(),
            r#"\1(a)"#
        );

        // a back reference followed by a digit
        assert_eq!(
            parse_from_str(r#"(a)(?:\1)2"#).unwrap().to_string(),
            r#"(a)(?:\1)2"#
        );

        // err: no such group
        assert!(matches!(
            parse_from_str(r#"(a)\2"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));

        assert!(matches!(
            parse_from_str(r#"(?<a>x)\k<b>"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));
    }

    #[test]
    fn test_parse_expression_lookaround_assertion() {
        assert_eq!(
            parse_from_str(r#"(?<=a)b"#).unwrap().to_string(),
            r#"(?<=a)b"#
        );

        assert_eq!(
            parse_from_str(r#"(?<!a)b"#).unwrap().to_string(),
            r#"(?<!a)b"#
        );

        assert_eq!(
            parse_from_str(r#"a(?=b|c)"#).unwrap().to_string(),
            r#"a(?=b|c)"#
        );

        assert_eq!(
            parse_from_str(r#"a(?!b)"#).unwrap().to_string(),
            r#"a(?!b)"#
        );

        // err: lookaround can not be quantified
        assert!(matches!(
            parse_from_str(r#"a(?=b)*"#),
            Err(RegexError::MessageWithLocation(_, _))
        ));
    }

    #[test]
    fn test_parse_examples() {
        assert_eq!(
            parse_from_str(r#"0x[0-9a-f]+"#).unwrap().to_string(),
            r#"0x[0-9a-f]+"#
        );

        assert_eq!(
            parse_from_str(r#"^[\w.-]+(\+[\w-]+)?@([a-zA-Z0-9-]+\.)+[a-z]{2,}$"#)
                .unwrap()
                .to_string(),
            r#"^[\w.\-]+(\+[\w\-]+)?@([a-zA-Z0-9\-]+\.)+[a-z]{2,}$"#
        );

        assert_eq!(
            parse_from_str(r#"<(?<tag_name>\w+)(\s\w+="\w+")*>.+?</\k<tag_name>>"#)
                .unwrap()
                .to_string(),
            r#"<(?<tag_name>\w+)(\s\w+="\w+")*>.+?<\/\k<tag_name>>"#
        );
    }
}
