// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::debug;

use crate::{
    ast::{
        AnchorAssertionName, BackReference, BoundaryAssertionName, Capture, CharRange, CharSet,
        CharSetElement, Expression, Literal, LookAround, LookAroundDirection, PresetCharSetName,
        Program, Quantifier,
    },
    object_file::{ObjectFile, Route},
    rulechecker::{get_match_length, MatchLength},
    transition::{
        add_char, add_complement, add_preset_digit, add_preset_space, add_preset_word, add_range,
        AnchorAssertionTransition, AnyCharTransition, BackReferenceTransition,
        BoundaryAssertionTransition, CaptureEndTransition, CaptureStartTransition, CharSetItem,
        CharSetTransition, CharTransition, CounterCheckTransition, CounterIncTransition,
        CounterResetTransition, CounterSaveTransition, JumpTransition,
        LookAheadAssertionTransition, LookBehindAssertionTransition, RepetitionTransition,
        RepetitionType, StringTransition, Transition,
    },
    RegexError,
};

/// Compile from AST `Program`.
pub fn compile(program: &Program) -> Result<ObjectFile, RegexError> {
    let mut object_file = ObjectFile::new();
    let mut compiler = Compiler::new(program, &mut object_file);
    compiler.compile()?;

    debug!("compiled routes:\n{}", object_file.get_debug_text());

    Ok(object_file)
}

pub struct Compiler<'a> {
    // The AST
    program: &'a Program,

    // The compilation target
    object_file: &'a mut ObjectFile,

    // Index of the current route
    current_route_index: usize,

    // Emitting the body of a lookbehind, which is matched from right to left
    backward: bool,
}

impl<'a> Compiler<'a> {
    fn new(program: &'a Program, object_file: &'a mut ObjectFile) -> Self {
        let current_route_index = object_file.create_route();
        Compiler {
            program,
            object_file,
            current_route_index,
            backward: false,
        }
    }

    fn get_current_route_ref_mut(&mut self) -> &mut Route {
        &mut self.object_file.routes[self.current_route_index]
    }

    fn compile(&mut self) -> Result<(), RegexError> {
        self.object_file.capture_group_names = self.program.capture_group_names.clone();
        self.emit_program(self.program)
    }

    fn emit_program(&mut self, program: &Program) -> Result<(), RegexError> {
        // The top level expressions are joined like a group, and the whole
        // route is wrapped by the capture group 0.
        //
        //                    program
        //   capture start   component      capture end
        //        trans    /-----------\    trans
        //  ==o==---------==o in  out o==--------==o==
        // in |            \-----------/           | out
        //    |                                    |
        //    \-------------- route ---------------/

        let program_component = self.emit_group(&program.expressions)?;

        // a pattern starting with `^` can be tried at the first position only,
        // unless the `m` flag is set.
        let is_fixed_start_position = matches!(
            program.expressions.first(),
            Some(Expression::AnchorAssertion(AnchorAssertionName::Start))
        );

        let route = self.get_current_route_ref_mut();
        let in_node_index = route.create_node();
        let out_node_index = route.create_node();

        route.create_transition_item(
            in_node_index,
            program_component.in_node_index,
            Transition::CaptureStart(CaptureStartTransition::new(0)),
        );

        route.create_transition_item(
            program_component.out_node_index,
            out_node_index,
            Transition::CaptureEnd(CaptureEndTransition::new(0)),
        );

        route.start_node_index = in_node_index;
        route.end_node_index = out_node_index;
        route.is_fixed_start_position = is_fixed_start_position;

        Ok(())
    }

    fn emit_expression(&mut self, expression: &Expression) -> Result<Component, RegexError> {
        let result = match expression {
            Expression::Literal(literal) => self.emit_literal(literal)?,
            Expression::BackReference(back_reference) => self.emit_backreference(back_reference)?,
            Expression::AnchorAssertion(name) => self.emit_anchor_assertion(name)?,
            Expression::BoundaryAssertion(name) => self.emit_boundary_assertion(name)?,
            Expression::LookAround(look_around) => self.emit_look_around(look_around)?,
            Expression::Group(expressions) => self.emit_group(expressions)?,
            Expression::Capture(capture) => self.emit_capture_group(capture)?,
            Expression::Quantifier(quantifier) => self.emit_quantifier(quantifier)?,
            Expression::Or(left, right) => self.emit_logic_or(left, right)?,
        };

        Ok(result)
    }

    fn emit_group(&mut self, expressions: &[Expression]) -> Result<Component, RegexError> {
        // Connect adjacent components with jump transitions.
        //
        //     prev component  jump      next component
        //     /-----------\   trans    /-----------\
        // ====o in  out o==----------==o in  out o======
        //  |  \-----------/            \-----------/  |
        //  |                                          |
        //  \--------------- component ----------------/
        //
        // A non-capturing group has no node of its own, so `(?:(?:a))`
        // compiles the same as `a`.
        //
        // In a lookbehind the components are connected from the last
        // expression to the first one.

        let mut components = vec![];
        if self.backward {
            for expression in expressions.iter().rev() {
                components.push(self.emit_expression(expression)?);
            }
        } else {
            for expression in expressions {
                components.push(self.emit_expression(expression)?);
            }
        }

        let (first, last) = match (components.first(), components.last()) {
            (Some(first), Some(last)) => (first.in_node_index, last.out_node_index),
            _ => return self.emit_empty(),
        };

        let route = self.get_current_route_ref_mut();
        for pair in components.windows(2) {
            route.create_transition_item(
                pair[0].out_node_index,
                pair[1].in_node_index,
                Transition::Jump(JumpTransition),
            );
        }

        Ok(Component::new(first, last))
    }

    fn emit_logic_or(
        &mut self,
        left: &Expression,
        right: &Expression,
    ) -> Result<Component, RegexError> {
        //                    left
        //         jump   /-----------\   jump
        //      /--------==o in  out o==--------\
        //  in  |         \-----------/         |  out
        // ==o--|                               |--o==
        //   |  |             right             |  |
        //   |  |         /-----------\         |  |
        //   |  \--------==o in  out o==--------/  |
        //   |      jump   \-----------/   jump    |
        //   |                                     |
        //   \-------------- component ------------/
        //
        // The left branch is tried first.

        let left_component = self.emit_expression(left)?;
        let right_component = self.emit_expression(right)?;

        let route = self.get_current_route_ref_mut();

        let in_node_index = route.create_node();
        let out_node_index = route.create_node();

        route.create_transition_item(
            in_node_index,
            left_component.in_node_index,
            Transition::Jump(JumpTransition),
        );

        route.create_transition_item(
            in_node_index,
            right_component.in_node_index,
            Transition::Jump(JumpTransition),
        );

        route.create_transition_item(
            left_component.out_node_index,
            out_node_index,
            Transition::Jump(JumpTransition),
        );

        route.create_transition_item(
            right_component.out_node_index,
            out_node_index,
            Transition::Jump(JumpTransition),
        );

        Ok(Component::new(in_node_index, out_node_index))
    }

    /// Short-cut component, it matches the empty string.
    fn emit_empty(&mut self) -> Result<Component, RegexError> {
        self.emit_single_transition(Transition::Jump(JumpTransition))
    }

    // A component made of two nodes and one transition.
    fn emit_single_transition(&mut self, transition: Transition) -> Result<Component, RegexError> {
        let route = self.get_current_route_ref_mut();
        let in_node_index = route.create_node();
        let out_node_index = route.create_node();

        route.create_transition_item(in_node_index, out_node_index, transition);
        Ok(Component::new(in_node_index, out_node_index))
    }

    fn emit_literal(&mut self, literal: &Literal) -> Result<Component, RegexError> {
        let transition = match literal {
            Literal::Char(character) => Transition::Char(CharTransition::new(*character)),
            Literal::String(s) => Transition::String(StringTransition::new(s)),
            Literal::AnyChar => Transition::AnyChar(AnyCharTransition),
            Literal::CharSet(charset) => {
                let mut items: Vec<CharSetItem> = vec![];
                append_charset(charset, &mut items);
                Transition::CharSet(CharSetTransition::new(items, charset.negative))
            }
            Literal::PresetCharSet(name) => {
                let charset_transition = match name {
                    PresetCharSetName::CharWord => CharSetTransition::new_preset_word(),
                    PresetCharSetName::CharNotWord => CharSetTransition::new_preset_not_word(),
                    PresetCharSetName::CharSpace => CharSetTransition::new_preset_space(),
                    PresetCharSetName::CharNotSpace => CharSetTransition::new_preset_not_space(),
                    PresetCharSetName::CharDigit => CharSetTransition::new_preset_digit(),
                    PresetCharSetName::CharNotDigit => CharSetTransition::new_preset_not_digit(),
                };
                Transition::CharSet(charset_transition)
            }
        };

        self.emit_single_transition(transition)
    }

    fn emit_anchor_assertion(
        &mut self,
        name: &AnchorAssertionName,
    ) -> Result<Component, RegexError> {
        let transition = Transition::AnchorAssertion(AnchorAssertionTransition::new(*name));
        self.emit_single_transition(transition)
    }

    fn emit_boundary_assertion(
        &mut self,
        name: &BoundaryAssertionName,
    ) -> Result<Component, RegexError> {
        let transition = Transition::BoundaryAssertion(BoundaryAssertionTransition::new(*name));
        self.emit_single_transition(transition)
    }

    fn emit_backreference(
        &mut self,
        back_reference: &BackReference,
    ) -> Result<Component, RegexError> {
        let capture_group_index = match back_reference {
            BackReference::Index(index) => {
                if *index == 0 || *index >= self.object_file.capture_group_names.len() {
                    return Err(RegexError::SyntaxIncorrect(format!(
                        "Invalid back reference \"\\{}\", the pattern has {} capture group(s).",
                        index,
                        self.object_file.capture_group_names.len() - 1
                    )));
                }
                *index
            }
            BackReference::Name(name) => {
                match self.object_file.get_capture_group_index_by_name(name) {
                    Some(index) => index,
                    None => {
                        return Err(RegexError::SyntaxIncorrect(format!(
                            "Invalid named back reference \"\\k<{}>\".",
                            name
                        )));
                    }
                }
            }
        };

        let transition =
            Transition::BackReference(BackReferenceTransition::new(capture_group_index));
        self.emit_single_transition(transition)
    }

    fn emit_capture_group(&mut self, capture: &Capture) -> Result<Component, RegexError> {
        let component = self.emit_expression(&capture.expression)?;

        //   capture start   component    capture end
        //        trans    /-----------\    trans
        //  ==o==---------==o in  out o==--------==o==
        // in |            \-----------/           | out
        //    |                                    |
        //    \-------------- component -----------/

        let route = self.get_current_route_ref_mut();
        let in_node_index = route.create_node();
        let out_node_index = route.create_node();

        route.create_transition_item(
            in_node_index,
            component.in_node_index,
            Transition::CaptureStart(CaptureStartTransition::new(capture.index)),
        );

        route.create_transition_item(
            component.out_node_index,
            out_node_index,
            Transition::CaptureEnd(CaptureEndTransition::new(capture.index)),
        );

        Ok(Component::new(in_node_index, out_node_index))
    }

    fn emit_quantifier(&mut self, quantifier: &Quantifier) -> Result<Component, RegexError> {
        let Quantifier {
            expression,
            min,
            max,
            lazy,
        } = quantifier;

        let mut capture_group_indices = vec![];
        expression.collect_capture_indices(&mut capture_group_indices);

        match (*min, *max) {
            (_, Some(0)) => {
                // {0}, {0,0}
                self.emit_empty()
            }
            (1, Some(1)) => {
                // {1}, {1,1}
                self.emit_expression(expression)
            }
            (0, Some(1)) if capture_group_indices.is_empty() => {
                // `?`, a repetition counter is only needed to reset the
                // captures of the expression.
                let component = self.emit_expression(expression)?;
                self.continue_emit_optional(component, *lazy)
            }
            (min, max) => {
                let repetition_type = match max {
                    Some(max) if max == min => RepetitionType::Specified(min),
                    Some(max) => RepetitionType::Range(min, max),
                    None => RepetitionType::Range(min, usize::MAX),
                };

                let capture_group_range = match (
                    capture_group_indices.iter().min(),
                    capture_group_indices.iter().max(),
                ) {
                    (Some(first), Some(last)) => *first..(*last + 1),
                    _ => 0..0,
                };

                self.continue_emit_repetition(
                    expression,
                    repetition_type,
                    capture_group_range,
                    *lazy,
                )
            }
        }
    }

    fn continue_emit_optional(
        &mut self,
        component: Component,
        is_lazy: bool,
    ) -> Result<Component, RegexError> {
        // for greedy optional:
        //
        //                 component
        //   in     jmp  /-----------\  jmp
        //  ==o|o==-----==o in  out o==---==o==
        //     |o==\     \-----------/      ^ out
        //         |                        |
        //         \------------------------/
        //                jump trans
        //
        // for lazy optional the jump which skips the component
        // is tried first.

        let route = self.get_current_route_ref_mut();
        let in_node_index = route.create_node();
        let out_node_index = route.create_node();

        if is_lazy {
            route.create_transition_item(
                in_node_index,
                out_node_index,
                Transition::Jump(JumpTransition),
            );
        }

        route.create_transition_item(
            in_node_index,
            component.in_node_index,
            Transition::Jump(JumpTransition),
        );

        route.create_transition_item(
            component.out_node_index,
            out_node_index,
            Transition::Jump(JumpTransition),
        );

        if !is_lazy {
            route.create_transition_item(
                in_node_index,
                out_node_index,
                Transition::Jump(JumpTransition),
            );
        }

        Ok(Component::new(in_node_index, out_node_index))
    }

    fn continue_emit_repetition(
        &mut self,
        expression: &Expression,
        repetition_type: RepetitionType,
        capture_group_range: std::ops::Range<usize>,
        is_lazy: bool,
    ) -> Result<Component, RegexError> {
        // for greedy repetition:
        //
        //                  | counter save           | counter inc
        //                  v                        v
        //            left      /-----------\              right
        //          ==o==------==o in  out o==-----------==o|o==\ repetition
        //            ^         \-----------/               |    | trans
        //            \-------------------------------------|----/
        //                                                  |
        //   in   counter reset                             |  counter check   out
        //  ==o==-------------------------------------------/ ---------------==o==
        //
        // The counter is checked before each iteration, so the minimum count
        // is enforced by the "counter check" transition only. For lazy
        // repetition the "counter check" is tried before the "repetition".

        let component = self.emit_expression(expression)?;

        let route = self.get_current_route_ref_mut();
        let in_node_index = route.create_node();
        let left_node_index = route.create_node();
        let right_node_index = route.create_node();
        let out_node_index = route.create_node();

        route.create_transition_item(
            in_node_index,
            right_node_index,
            Transition::CounterReset(CounterResetTransition),
        );

        route.create_transition_item(
            left_node_index,
            component.in_node_index,
            Transition::CounterSave(CounterSaveTransition::new(capture_group_range)),
        );

        route.create_transition_item(
            component.out_node_index,
            right_node_index,
            Transition::CounterInc(CounterIncTransition::new(repetition_type.clone())),
        );

        let repetition = Transition::Repetition(RepetitionTransition::new(repetition_type.clone()));
        let counter_check = Transition::CounterCheck(CounterCheckTransition::new(repetition_type));

        if is_lazy {
            route.create_transition_item(right_node_index, out_node_index, counter_check);
            route.create_transition_item(right_node_index, left_node_index, repetition);
        } else {
            route.create_transition_item(right_node_index, left_node_index, repetition);
            route.create_transition_item(right_node_index, out_node_index, counter_check);
        }

        Ok(Component::new(in_node_index, out_node_index))
    }

    fn emit_look_around(&mut self, look_around: &LookAround) -> Result<Component, RegexError> {
        // The body of a lookaround is compiled into a new route, and the
        // assertion transition runs that route without consuming chars.
        // The route of a lookbehind is a backward route.
        //
        //        | lookaround
        //  in    v trans       out
        // ==o==--------------==o==

        let is_backward = look_around.direction == LookAroundDirection::Behind;

        // 1. save the current route index and direction
        // 2. create new route
        let saved_route_index = self.current_route_index;
        let saved_backward = self.backward;
        let sub_route_index = self.object_file.create_route();

        // 3. switch to the new route
        self.current_route_index = sub_route_index;
        self.backward = is_backward;

        let sub_component = self.emit_expression(&look_around.expression)?;
        let sub_route = self.get_current_route_ref_mut();
        sub_route.start_node_index = sub_component.in_node_index;
        sub_route.end_node_index = sub_component.out_node_index;
        sub_route.is_fixed_start_position = true;
        sub_route.is_backward = is_backward;

        // 4. restore to the previous route
        self.current_route_index = saved_route_index;
        self.backward = saved_backward;

        let transition = match look_around.direction {
            LookAroundDirection::Ahead => Transition::LookAheadAssertion(
                LookAheadAssertionTransition::new(sub_route_index, look_around.negative),
            ),
            LookAroundDirection::Behind => {
                // the length of a fixed body lets the assertion fail
                // without running the route near the text start.
                let match_length_in_char = match get_match_length(&look_around.expression) {
                    MatchLength::Fixed(length) => Some(length),
                    MatchLength::Variable => None,
                };

                Transition::LookBehindAssertion(LookBehindAssertionTransition::new(
                    sub_route_index,
                    look_around.negative,
                    match_length_in_char,
                ))
            }
        };

        self.emit_single_transition(transition)
    }
}

// A component is a pair of input node and output node.
struct Component {
    in_node_index: usize,
    out_node_index: usize,
}

impl Component {
    fn new(in_node_index: usize, out_node_index: usize) -> Self {
        Component {
            in_node_index,
            out_node_index,
        }
    }
}

fn append_preset_charset(name: &PresetCharSetName, items: &mut Vec<CharSetItem>) {
    let mut positive_items = vec![];

    let negative = match name {
        PresetCharSetName::CharWord | PresetCharSetName::CharNotWord => {
            add_preset_word(&mut positive_items);
            *name == PresetCharSetName::CharNotWord
        }
        PresetCharSetName::CharSpace | PresetCharSetName::CharNotSpace => {
            add_preset_space(&mut positive_items);
            *name == PresetCharSetName::CharNotSpace
        }
        PresetCharSetName::CharDigit | PresetCharSetName::CharNotDigit => {
            add_preset_digit(&mut positive_items);
            *name == PresetCharSetName::CharNotDigit
        }
    };

    if negative {
        add_complement(items, &positive_items);
    } else {
        items.append(&mut positive_items);
    }
}

fn append_charset(charset: &CharSet, items: &mut Vec<CharSetItem>) {
    for element in &charset.elements {
        match element {
            CharSetElement::Char(c) => add_char(items, *c),
            CharSetElement::CharRange(CharRange {
                start,
                end_included,
            }) => add_range(items, *start, *end_included),
            CharSetElement::PresetCharSet(name) => append_preset_charset(name, items),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_str_eq;

    use crate::{object_file::ObjectFile, parser::parse_from_str};

    use super::compile;

    fn compile_from_str(s: &str) -> ObjectFile {
        let program = parse_from_str(s).unwrap();
        compile(&program).unwrap()
    }

    #[test]
    fn test_compile_char() {
        {
            let s = compile_from_str("a").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );
        }

        // continuous chars are merged into a string
        {
            let s = compile_from_str("abc").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, String \"abc\"
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );
        }

        // empty pattern
        {
            let s = compile_from_str("").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Jump
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );
        }
    }

    #[test]
    fn test_compile_charset() {
        {
            let s = compile_from_str(r"[a-c\d]").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Charset ['a'..'c', '0'..'9']
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );
        }

        {
            let s = compile_from_str("[^x]").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Charset !['x']
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );
        }
    }

    #[test]
    fn test_compile_assertions() {
        let s = compile_from_str(r"^a$").get_debug_text();
        assert_str_eq!(
            s,
            "\
- 0
  -> 1, Assertion \"start\"
- 1
  -> 2, Jump
- 2
  -> 3, Char 'a'
- 3
  -> 4, Jump
- 4
  -> 5, Assertion \"end\"
- 5
  -> 7, Capture end {0}
> 6
  -> 0, Capture start {0}
< 7
# {0}"
        );

        let object_file = compile_from_str(r"^a$");
        assert!(object_file.routes[0].is_fixed_start_position);

        let object_file = compile_from_str(r"^a|b");
        assert!(!object_file.routes[0].is_fixed_start_position);
    }

    #[test]
    fn test_compile_logic_or() {
        let s = compile_from_str("a|b").get_debug_text();
        assert_str_eq!(
            s,
            "\
- 0
  -> 1, Char 'a'
- 1
  -> 5, Jump
- 2
  -> 3, Char 'b'
- 3
  -> 5, Jump
- 4
  -> 0, Jump
  -> 2, Jump
- 5
  -> 7, Capture end {0}
> 6
  -> 4, Capture start {0}
< 7
# {0}"
        );
    }

    #[test]
    fn test_compile_capture_group() {
        {
            let s = compile_from_str("a(b)c").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 4, Jump
- 2
  -> 3, Char 'b'
- 3
  -> 5, Capture end {1}
- 4
  -> 2, Capture start {1}
- 5
  -> 6, Jump
- 6
  -> 7, Char 'c'
- 7
  -> 9, Capture end {0}
> 8
  -> 0, Capture start {0}
< 9
# {0}
# {1}"
            );
        }

        // named
        {
            let s = compile_from_str("(?<x>a)").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Capture end {1}
- 2
  -> 0, Capture start {1}
- 3
  -> 5, Capture end {0}
> 4
  -> 2, Capture start {0}
< 5
# {0}
# {1}, x"
            );
        }
    }

    #[test]
    fn test_compile_back_reference() {
        let s = compile_from_str(r"(a)\1").get_debug_text();
        assert_str_eq!(
            s,
            "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Capture end {1}
- 2
  -> 0, Capture start {1}
- 3
  -> 4, Jump
- 4
  -> 5, Back reference {1}
- 5
  -> 7, Capture end {0}
> 6
  -> 2, Capture start {0}
< 7
# {0}
# {1}"
        );
    }

    #[test]
    fn test_compile_optional() {
        // greedy
        {
            let s = compile_from_str("a?").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Jump
- 2
  -> 0, Jump
  -> 3, Jump
- 3
  -> 5, Capture end {0}
> 4
  -> 2, Capture start {0}
< 5
# {0}"
            );
        }

        // lazy
        {
            let s = compile_from_str("a??").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Jump
- 2
  -> 3, Jump
  -> 0, Jump
- 3
  -> 5, Capture end {0}
> 4
  -> 2, Capture start {0}
< 5
# {0}"
            );
        }
    }

    #[test]
    fn test_compile_repetition() {
        // greedy
        {
            let s = compile_from_str("a*").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 4, Counter inc
- 2
  -> 4, Counter reset
- 3
  -> 0, Counter save
- 4
  -> 3, Repetition from 0 to MAX
  -> 5, Counter check from 0 to MAX
- 5
  -> 7, Capture end {0}
> 6
  -> 2, Capture start {0}
< 7
# {0}"
            );
        }

        // specified
        {
            let s = compile_from_str("a{3}").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 4, Counter inc
- 2
  -> 4, Counter reset
- 3
  -> 0, Counter save
- 4
  -> 3, Repetition times 3
  -> 5, Counter check times 3
- 5
  -> 7, Capture end {0}
> 6
  -> 2, Capture start {0}
< 7
# {0}"
            );
        }

        // lazy, with a capture group inside
        {
            let s = compile_from_str("(a)+?").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Capture end {1}
- 2
  -> 0, Capture start {1}
- 3
  -> 6, Counter inc
- 4
  -> 6, Counter reset
- 5
  -> 2, Counter save, clear {1} to {1}
- 6
  -> 7, Counter check from 1 to MAX
  -> 5, Repetition from 1 to MAX
- 7
  -> 9, Capture end {0}
> 8
  -> 4, Capture start {0}
< 9
# {0}
# {1}"
            );
        }

        // {1} and {0}
        {
            let s = compile_from_str("a{1}").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Char 'a'
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );

            let s = compile_from_str("a{0}").get_debug_text();
            assert_str_eq!(
                s,
                "\
- 0
  -> 1, Jump
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
            );
        }
    }

    #[test]
    fn test_compile_look_around() {
        {
            let s = compile_from_str("a(?=b)").get_debug_text();
            assert_str_eq!(
                s,
                "\
= $0
- 0
  -> 1, Char 'a'
- 1
  -> 2, Jump
- 2
  -> 3, Look ahead $1
- 3
  -> 5, Capture end {0}
> 4
  -> 0, Capture start {0}
< 5
= $1
> 0
  -> 1, Char 'b'
< 1
# {0}"
            );
        }

        {
            let s = compile_from_str("(?<=ab)c").get_debug_text();
            assert_str_eq!(
                s,
                "\
= $0
- 0
  -> 1, Look behind $1, match length 2
- 1
  -> 2, Jump
- 2
  -> 3, Char 'c'
- 3
  -> 5, Capture end {0}
> 4
  -> 0, Capture start {0}
< 5
= $1, backward
> 0
  -> 1, String \"ab\"
< 1
# {0}"
            );
        }

        // the body of a lookbehind is connected from right to left
        {
            let s = compile_from_str("(?<=a(b))").get_debug_text();
            assert_str_eq!(
                s,
                "\
= $0
- 0
  -> 1, Look behind $1, match length 2
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
= $1, backward
- 0
  -> 1, Char 'b'
- 1
  -> 3, Capture end {1}
> 2
  -> 0, Capture start {1}
- 3
  -> 4, Jump
- 4
  -> 5, Char 'a'
< 5
# {0}
# {1}"
            );
        }

        {
            let s = compile_from_str(r"(?<!a+)b").get_debug_text();
            assert!(s.contains("Look behind negative $1, variable length"));
        }
    }
}
