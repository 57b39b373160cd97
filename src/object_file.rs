// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use crate::transition::Transition;

pub const MAIN_ROUTE_INDEX: usize = 0;

/// The compiled form of a pattern.
///
/// Route 0 is the main route, every lookaround assertion owns an extra
/// sub-route which is run from the assertion transition.
#[derive(Debug)]
pub struct ObjectFile {
    pub routes: Vec<Route>,

    // index 0 is the whole match and is always unnamed
    pub capture_group_names: Vec<Option<String>>,
}

#[derive(Debug)]
pub struct Route {
    pub nodes: Vec<Node>,
    pub start_node_index: usize,
    pub end_node_index: usize,

    // the route can only match at the position where it starts, i.e.
    // it begins with `^`, or it is the sub-route of a lookaround.
    pub is_fixed_start_position: bool,

    // the sub-route of a lookbehind, it matches from right to left.
    pub is_backward: bool,
}

#[derive(Debug)]
pub struct Node {
    pub transition_items: Vec<TransitionItem>,
}

#[derive(Debug)]
pub struct TransitionItem {
    pub transition: Transition,
    pub target_node_index: usize,
}

impl ObjectFile {
    pub fn new() -> Self {
        ObjectFile {
            routes: vec![],
            capture_group_names: vec![],
        }
    }

    pub fn create_route(&mut self) -> usize {
        let route = Route {
            nodes: vec![],
            start_node_index: 0,
            end_node_index: 0,
            is_fixed_start_position: false,
            is_backward: false,
        };

        let idx = self.routes.len();
        self.routes.push(route);
        idx
    }

    pub fn get_capture_group_index_by_name(&self, name: &str) -> Option<usize> {
        self.capture_group_names
            .iter()
            .position(|item| item.as_deref() == Some(name))
    }

    pub fn get_capture_group_name_by_index(&self, index: usize) -> Option<&str> {
        self.capture_group_names.get(index)?.as_deref()
    }

    /// Dump all routes in a line-oriented text form, e.g.
    ///
    /// ```text
    /// - 0
    ///   -> 1, Char 'a'
    /// - 1
    ///   -> 3, Capture end {0}
    /// > 2
    ///   -> 0, Capture start {0}
    /// < 3
    /// # {0}
    /// ```
    ///
    /// `>` marks the start node, `<` the end node, and `#` lists the
    /// capture groups. Routes are headed by `= $index` when there is
    /// more than one, and the routes of lookbehind are marked `backward`.
    pub fn get_debug_text(&self) -> String {
        let mut lines = vec![];

        if self.routes.len() == 1 {
            lines.push(self.routes[0].get_debug_text());
        } else {
            for (route_index, route) in self.routes.iter().enumerate() {
                if route.is_backward {
                    lines.push(format!("= ${}, backward", route_index));
                } else {
                    lines.push(format!("= ${}", route_index));
                }
                lines.push(route.get_debug_text());
            }
        }

        for (capture_group_index, name) in self.capture_group_names.iter().enumerate() {
            match name {
                Some(name) => lines.push(format!("# {{{}}}, {}", capture_group_index, name)),
                None => lines.push(format!("# {{{}}}", capture_group_index)),
            }
        }

        lines.join("\n")
    }
}

impl Route {
    pub fn create_node(&mut self) -> usize {
        let node = Node {
            transition_items: vec![],
        };

        let idx = self.nodes.len();
        self.nodes.push(node);
        idx
    }

    pub fn create_transition_item(
        &mut self,
        source_node_index: usize,
        target_node_index: usize,
        transition: Transition,
    ) {
        let transition_item = TransitionItem {
            transition,
            target_node_index,
        };

        self.nodes[source_node_index]
            .transition_items
            .push(transition_item);
    }

    pub fn get_debug_text(&self) -> String {
        let mut lines = vec![];

        for (node_index, node) in self.nodes.iter().enumerate() {
            let prefix = if node_index == self.start_node_index {
                '>'
            } else if node_index == self.end_node_index {
                '<'
            } else {
                '-'
            };

            lines.push(format!("{} {}", prefix, node_index));

            for transition_item in &node.transition_items {
                lines.push(format!(
                    "  -> {}, {}",
                    transition_item.target_node_index, transition_item.transition
                ));
            }
        }

        lines.join("\n")
    }
}
