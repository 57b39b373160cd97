// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::regex::Captures;

/// Expand a replacement template for one match.
///
/// | pattern   | inserts                                      |
/// |-----------|----------------------------------------------|
/// | `$$`      | a `$`                                        |
/// | `$&`      | the whole match                              |
/// | `` $` ``  | the text before the match                    |
/// | `$'`      | the text after the match                     |
/// | `$n`      | the group `n` (1 to 99)                      |
/// | `$<name>` | the named group, if the pattern has names    |
///
/// Any other `$` is kept as it is, groups which did not participate
/// in the match insert nothing.
pub fn get_substitution(
    template: &str,
    captures: &Captures,
    capture_group_names: &[Option<String>],
) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(dollar_position) = rest.find('$') {
        result.push_str(&rest[..dollar_position]);

        let after_dollar = &rest[dollar_position + 1..];
        let consumed = expand_dollar(after_dollar, captures, capture_group_names, &mut result);

        if consumed == 0 {
            result.push('$');
        }

        rest = &after_dollar[consumed..];
    }

    result.push_str(rest);
    result
}

// Returns the number of bytes consumed after the `$`, 0 for a literal `$`.
fn expand_dollar(
    after_dollar: &str,
    captures: &Captures,
    capture_group_names: &[Option<String>],
    result: &mut String,
) -> usize {
    let input = captures.input();
    let (start, end) = match captures.get(0) {
        Some(whole) => (whole.start(), whole.end()),
        None => return 0,
    };

    let mut chars = after_dollar.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return 0,
    };

    match first {
        '$' => {
            result.push('$');
            1
        }
        '&' => {
            result.push_str(&input[start..end]);
            1
        }
        '`' => {
            result.push_str(&input[..start]);
            1
        }
        '\'' => {
            result.push_str(&input[end..]);
            1
        }
        '0'..='9' => {
            let group_count = captures.len() - 1;
            let first_digit = first as usize - '0' as usize;

            // the longest valid group number wins, e.g. `$12` is the group 12
            // when it exists, otherwise the group 1 followed by '2'.
            let two_digits = chars
                .next()
                .and_then(|c| c.to_digit(10))
                .map(|second_digit| first_digit * 10 + second_digit as usize)
                .filter(|n| *n >= 1 && *n <= group_count);

            let (group_index, consumed) = match two_digits {
                Some(n) => (n, 2),
                None if first_digit >= 1 && first_digit <= group_count => (first_digit, 1),
                None => return 0,
            };

            if let Some(m) = captures.get(group_index) {
                result.push_str(m.as_str());
            }

            consumed
        }
        '<' => {
            if capture_group_names.iter().all(|name| name.is_none()) {
                return 0;
            }

            let Some(close_position) = after_dollar.find('>') else {
                return 0;
            };

            let name = &after_dollar[1..close_position];
            let value = capture_group_names
                .iter()
                .position(|item| item.as_deref() == Some(name))
                .and_then(|index| captures.get(index));

            if let Some(m) = value {
                result.push_str(m.as_str());
            }

            close_position + 1
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::regex::Regex;

    use super::get_substitution;

    fn substitute(pattern: &str, text: &str, template: &str) -> String {
        let re = Regex::new(pattern).unwrap();
        let captures = re.captures(text).unwrap();
        get_substitution(template, &captures, re.capture_group_names())
    }

    #[test]
    fn test_substitution_special_patterns() {
        assert_eq!(substitute("b", "abc", "[$&]"), "[b]");
        assert_eq!(substitute("b", "abc", "[$`]"), "[a]");
        assert_eq!(substitute("b", "abc", "[$']"), "[c]");
        assert_eq!(substitute("b", "abc", "$$"), "$");
        assert_eq!(substitute("b", "abc", "$$&"), "$&");

        // a single `$` is kept
        assert_eq!(substitute("b", "abc", "a$"), "a$");
        assert_eq!(substitute("b", "abc", "$x"), "$x");
    }

    #[test]
    fn test_substitution_numbered_groups() {
        assert_eq!(substitute(r"(\w+)\s(\w+)", "Hola mundo", "$2 $1"), "mundo Hola");

        // the group number does not exist
        assert_eq!(substitute("(a)", "a", "$2"), "$2");
        assert_eq!(substitute("(a)", "a", "$0"), "$0");

        // `$10` is the group 1 followed by '0' when there are less than 10 groups
        assert_eq!(substitute("(a)", "a", "$10"), "a0");
        assert_eq!(substitute("(a)", "a", "$01"), "a");

        // two digits
        assert_eq!(
            substitute(
                "(a)(b)(c)(d)(e)(f)(g)(h)(i)(j)(k)",
                "abcdefghijk",
                "$11-$1"
            ),
            "k-a"
        );

        // an unmatched group inserts nothing
        assert_eq!(substitute("(a)|(b)", "b", "[$1]"), "[]");
    }

    #[test]
    fn test_substitution_named_groups() {
        assert_eq!(
            substitute(r"(?<day>\d{2})/(?<month>\d{2})", "22/04", "$<month>-$<day>"),
            "04-22"
        );

        // unknown name
        assert_eq!(substitute(r"(?<day>\d{2})", "22", "[$<month>]"), "[]");

        // not closed
        assert_eq!(substitute(r"(?<day>\d{2})", "22", "$<day"), "$<day");

        // the pattern has no named group
        assert_eq!(substitute(r"(\d{2})", "22", "$<day>"), "$<day>");
    }
}
