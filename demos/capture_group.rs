// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use jsre::Regex;

pub fn main() {
    let re = Regex::from_literal(
        r"/#(?<red>[\da-fA-F]{2})(?<green>[\da-fA-F]{2})(?<blue>[\da-fA-F]{2})/g",
    )
    .unwrap();
    let text = "The color is #ffbb33 and the background is #bbdd99.";

    // capture groups once
    if let Some(m) = re.exec(text) {
        println!("Found match: {}", &m[0]);
        println!("Red: {}", &m["red"]);
        println!("Green: {}", &m["green"]);
        println!("Blue: {}", &m["blue"]);
    } else {
        println!("No match found");
    }

    // capture groups all, String.prototype.matchAll
    for m in re.match_all(text).unwrap() {
        let (whole, [red, green, blue]) = m.extract();
        println!("Found match: {} (red: {}, green: {}, blue: {})", whole, red, green, blue);
    }
}
