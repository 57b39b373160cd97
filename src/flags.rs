// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use std::{fmt::Display, str::FromStr};

use crate::RegexError;

/// The flags of a regular expression, e.g. the `gi` of `/hola/gi`.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Flags {
    pub has_indices: bool, // d
    pub global: bool,      // g
    pub ignore_case: bool, // i
    pub multiline: bool,   // m
    pub dot_all: bool,     // s
    pub unicode: bool,     // u
    pub sticky: bool,      // y
}

impl FromStr for Flags {
    type Err = RegexError;

    /// Letters may appear in any order, but each one at most once.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut flags = Flags::default();

        for c in s.chars() {
            let flag = match c {
                'd' => &mut flags.has_indices,
                'g' => &mut flags.global,
                'i' => &mut flags.ignore_case,
                'm' => &mut flags.multiline,
                's' => &mut flags.dot_all,
                'u' => &mut flags.unicode,
                'y' => &mut flags.sticky,
                _ => {
                    return Err(RegexError::InvalidFlags(format!(
                        "Unknown flag '{}' in \"{}\".",
                        c, s
                    )));
                }
            };

            if *flag {
                return Err(RegexError::InvalidFlags(format!(
                    "Duplicate flag '{}' in \"{}\".",
                    c, s
                )));
            }

            *flag = true;
        }

        Ok(flags)
    }
}

impl Display for Flags {
    // Always in the canonical order "dgimsuy".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let letters = [
            (self.has_indices, 'd'),
            (self.global, 'g'),
            (self.ignore_case, 'i'),
            (self.multiline, 'm'),
            (self.dot_all, 's'),
            (self.unicode, 'u'),
            (self.sticky, 'y'),
        ];

        for (enabled, letter) in letters {
            if enabled {
                write!(f, "{}", letter)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::RegexError;

    use super::Flags;

    #[test]
    fn test_parse_flags() {
        assert_eq!("".parse::<Flags>().unwrap(), Flags::default());

        let flags: Flags = "yig".parse().unwrap();
        assert!(flags.global);
        assert!(flags.ignore_case);
        assert!(flags.sticky);
        assert!(!flags.multiline);

        // canonical order
        assert_eq!(flags.to_string(), "giy");
        assert_eq!("usmdgiy".parse::<Flags>().unwrap().to_string(), "dgimsuy");
    }

    #[test]
    fn test_parse_flags_error() {
        assert!(matches!(
            "gx".parse::<Flags>(),
            Err(RegexError::InvalidFlags(_))
        ));

        assert_eq!(
            "gig".parse::<Flags>(),
            Err(RegexError::InvalidFlags(
                "Duplicate flag 'g' in \"gig\".".to_owned()
            ))
        );
    }
}
