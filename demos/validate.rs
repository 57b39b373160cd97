// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use jsre::Regex;

pub fn main() {
    let re = Regex::from_literal(r"/^\d{4}-\d{2}-\d{2}$/").unwrap();
    println!("{}", re.test("2025-04-22")); // should be true
    println!("{}", re.test("04-22")); // should be false

    let re = Regex::with_flags(r"^[\w.]+@\w+\.(?:com|es)$", "i").unwrap();
    println!("{}", re.test("Ana.Lopez@Correo.ES")); // should be true
}
