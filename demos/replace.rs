// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use jsre::Regex;

pub fn main() {
    // the first match only
    let re = Regex::from_literal("/mundo/").unwrap();
    println!("{}", re.replace("Hola mundo", "amigo")); // Hola amigo

    // every match
    let re = Regex::from_literal("/mundo/g").unwrap();
    println!("{}", re.replace_all("mundo y mundo", "amigo").unwrap()); // amigo y amigo

    // templates with named groups
    let re = Regex::from_literal(r"/(?<y>\d{4})-(?<m>\d{2})-(?<d>\d{2})/").unwrap();
    println!("{}", re.replace("2025-04-22", "$<d>/$<m>/$<y>")); // 22/04/2025

    // replacer function
    let re = Regex::from_literal(r"/\d+/g").unwrap();
    let doubled = re.replace_with("3 manzanas y 5 peras", |captures| {
        let n: u32 = captures[0].parse().unwrap();
        (n * 2).to_string()
    });
    println!("{}", doubled); // 6 manzanas y 10 peras

    // String.prototype.split
    let re = Regex::from_literal(r"/,\s/").unwrap();
    println!("{:?}", re.split("uno, dos, tres", None));
}
