// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use log::trace;

use crate::{
    context::Context,
    object_file::{ObjectFile, Route, MAIN_ROUTE_INDEX},
    transition::CheckResult,
    utf8reader::next_char_position,
};

// A pending alternative: try the transition `transition_index` of the
// node at `position`, after rewinding the state to `trail_mark`.
struct Frame {
    node_index: usize,
    transition_index: usize,
    position: usize,
    trail_mark: usize,
}

/// Search for the leftmost match of the main route, starting at `start`.
///
/// Returns `true` on success, the capture groups are left in the context.
pub fn start_process(context: &mut Context, object_file: &ObjectFile, start: usize) -> bool {
    let route = &object_file.routes[MAIN_ROUTE_INDEX];
    let text_length = context.text.len();

    // a sticky search, or a pattern starting with `^` (without the `m`
    // flag), can only match at the start position.
    let only_once =
        context.flags.sticky || (route.is_fixed_start_position && !context.flags.multiline);

    let mut position = start;

    while position <= text_length {
        context.reset();

        trace!("try matching at position: {}", position);

        // positions inside a multi-byte char are skipped
        if context.text.is_char_boundary(position)
            && start_route(context, object_file, MAIN_ROUTE_INDEX, position).is_some()
        {
            return true;
        }

        if only_once {
            break;
        }

        // move forward one character and try again
        position = next_char_position(context.text, position);
    }

    false
}

/// Run a route from `position` with backtracking, returns the end position
/// of the first successful path.
///
/// A backward route (the body of a lookbehind) consumes the chars before
/// the position, so its end position is on the left of its start.
///
/// On failure all changes made by the route are undone.
pub fn start_route(
    context: &mut Context,
    object_file: &ObjectFile,
    route_index: usize,
    position: usize,
) -> Option<usize> {
    let route = &object_file.routes[route_index];
    let initial_mark = context.mark();

    trace!(
        "route ${} start, node: {}, position: {}",
        route_index,
        route.start_node_index,
        position
    );

    let mut frames: Vec<Frame> = vec![];
    append_frames_by_node(
        &mut frames,
        route,
        route.start_node_index,
        position,
        initial_mark,
    );

    while let Some(frame) = frames.pop() {
        context.rewind(frame.trail_mark);

        let transition_item =
            &route.nodes[frame.node_index].transition_items[frame.transition_index];
        let target_node_index = transition_item.target_node_index;

        let consumed = match transition_item.transition.check(
            context,
            object_file,
            frame.position,
            route.is_backward,
        ) {
            CheckResult::Success(consumed) => consumed,
            CheckResult::Failure => continue,
        };

        let next_position = if route.is_backward {
            frame.position - consumed
        } else {
            frame.position + consumed
        };

        if target_node_index == route.end_node_index {
            trace!(
                "route ${} finish, position: {}",
                route_index,
                next_position
            );
            return Some(next_position);
        }

        append_frames_by_node(
            &mut frames,
            route,
            target_node_index,
            next_position,
            context.mark(),
        );
    }

    trace!("route ${} failed", route_index);

    context.rewind(initial_mark);
    None
}

// Frames are pushed in reverse order so the first transition of a node
// is tried first.
fn append_frames_by_node(
    frames: &mut Vec<Frame>,
    route: &Route,
    node_index: usize,
    position: usize,
    trail_mark: usize,
) {
    let count = route.nodes[node_index].transition_items.len();

    for transition_index in (0..count).rev() {
        frames.push(Frame {
            node_index,
            transition_index,
            position,
            trail_mark,
        });
    }
}
