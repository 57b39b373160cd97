// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

// Positions are byte offsets into UTF-8 text. A position that is out of
// range or not on a char boundary reads as `None`.

/// The char that starts at `position`.
#[inline]
pub fn read_char(text: &str, position: usize) -> Option<char> {
    text.get(position..)?.chars().next()
}

/// The char that ends right before `position`.
#[inline]
pub fn read_previous_char(text: &str, position: usize) -> Option<char> {
    text.get(..position)?.chars().next_back()
}

/// Step `count` chars backward from `position`, returns `None` when the
/// text start is reached first.
pub fn get_position_by_chars_backward(text: &str, position: usize, count: usize) -> Option<usize> {
    let mut current_position = position;

    for _ in 0..count {
        let previous_char = read_previous_char(text, current_position)?;
        current_position -= previous_char.len_utf8();
    }

    Some(current_position)
}

/// The position after the char at `position`, or `position + 1` at the
/// end of the text.
pub fn next_char_position(text: &str, position: usize) -> usize {
    match read_char(text, position) {
        Some(c) => position + c.len_utf8(),
        None => position + 1,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{get_position_by_chars_backward, next_char_position, read_char, read_previous_char};

    #[test]
    fn test_read_char() {
        let text = "a中🍅";

        assert_eq!(read_char(text, 0), Some('a'));
        assert_eq!(read_char(text, 1), Some('中'));
        assert_eq!(read_char(text, 4), Some('🍅'));
        assert_eq!(read_char(text, 8), None);

        // not a char boundary
        assert_eq!(read_char(text, 2), None);

        assert_eq!(read_previous_char(text, 0), None);
        assert_eq!(read_previous_char(text, 1), Some('a'));
        assert_eq!(read_previous_char(text, 4), Some('中'));
        assert_eq!(read_previous_char(text, 8), Some('🍅'));
    }

    #[test]
    fn test_move_position() {
        let text = "a中🍅";

        assert_eq!(get_position_by_chars_backward(text, 8, 2), Some(1));
        assert_eq!(get_position_by_chars_backward(text, 8, 3), Some(0));
        assert_eq!(get_position_by_chars_backward(text, 8, 4), None);
        assert_eq!(get_position_by_chars_backward(text, 4, 0), Some(4));

        assert_eq!(next_char_position(text, 0), 1);
        assert_eq!(next_char_position(text, 1), 4);
        assert_eq!(next_char_position(text, 8), 9);
    }
}
