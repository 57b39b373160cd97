// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

//! A backtracking regular expression engine with JavaScript (ECMAScript)
//! syntax and the JavaScript regex methods: `exec`, `test`, `match`,
//! `matchAll`, `search`, `replace`, `replaceAll` and `split`.
//!
//! ```
//! use jsre::{MatchResult, Regex};
//!
//! let re = Regex::from_literal(r"/\d/g").unwrap();
//! match re.match_str("Semestre 4 y 8") {
//!     Some(MatchResult::All(values)) => assert_eq!(values, vec!["4", "8"]),
//!     _ => unreachable!(),
//! }
//! ```

mod ast;
mod charwithposition;
mod compiler;
mod context;
mod flags;
mod lexer;
mod location;
mod object_file;
mod parser;
mod peekableiter;
mod printer;
mod process;
mod regex;
mod replacer;
mod rulechecker;
mod token;
mod transition;
mod utf8reader;

use thiserror::Error;

pub use flags::Flags;
pub use location::Location;
pub use regex::{CaptureMatches, Captures, Match, MatchResult, Matches, Regex};

#[derive(Error, Debug, PartialEq, Clone)]
pub enum RegexError {
    /// A syntax error in the pattern, with the position where it was found.
    #[error("{0} {1}")]
    MessageWithLocation(String, Location),

    /// The pattern ends in the middle of a token.
    #[error("Unexpected end of pattern: {0}")]
    UnexpectedEndOfPattern(String),

    /// The pattern is well-formed but not valid, e.g. duplicate group names.
    #[error("{0}")]
    SyntaxIncorrect(String),

    #[error("Invalid flags: {0}")]
    InvalidFlags(String),

    #[error("Invalid regular expression literal: {0}")]
    InvalidLiteral(String),

    /// `match_all` and `replace_all` require the `g` flag.
    #[error("{0} must be called with a global regular expression.")]
    NonGlobal(&'static str),
}

/// Returns the normalized pattern and the compiled routes of `pattern`,
/// one after the other.
pub fn explain(pattern: &str) -> Result<String, RegexError> {
    let program = parser::parse_from_str(pattern)?;
    let object_file = compiler::compile(&program)?;
    Ok(format!("{}\n\n{}", program, object_file.get_debug_text()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{explain, location::Location, RegexError};

    #[test]
    fn test_error_display() {
        assert_eq!(
            RegexError::MessageWithLocation(
                "Nothing to repeat.".to_owned(),
                Location::new_range(0, 0, 0, 1)
            )
            .to_string(),
            "Nothing to repeat. at line 1, column 1"
        );

        assert_eq!(
            RegexError::NonGlobal("replace_all").to_string(),
            "replace_all must be called with a global regular expression."
        );
    }

    #[test]
    fn test_explain() {
        assert_eq!(
            explain("ab").unwrap(),
            "\
ab

- 0
  -> 1, String \"ab\"
- 1
  -> 3, Capture end {0}
> 2
  -> 0, Capture start {0}
< 3
# {0}"
        );
    }
}
