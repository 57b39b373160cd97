// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use jsre::{MatchResult, Regex};

pub fn main() {
    let re = Regex::from_literal(r"/#[\da-f]{6}/gi").unwrap();
    let text = "The color is #ffbb33 and the background is #BBDD99.";

    // String.prototype.search
    match re.search(text) {
        Some(position) => println!("First color at: {}", position),
        None => println!("No color found"),
    }

    // String.prototype.match with the `g` flag
    if let Some(MatchResult::All(colors)) = re.match_str(text) {
        println!("Colors: {:?}", colors);
    }

    // RegExp.prototype.exec walks through the text by `lastIndex`
    while let Some(captures) = re.exec(text) {
        println!("Found {} at {}, next search from {}", &captures[0], captures.index(), re.last_index());
    }
}
