// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::{Container, TreeNode};

/// A small two-container forest, handy for demos and as the default initial state.
///
/// Container `"1"` holds `"Task 1"` (id `"3"`) and `"Task 2"` (id `"4"`); container
/// `"2"` holds `"Task 3"` (id `"5"`).
#[must_use]
pub fn sample_forest() -> Vec<Container<String, String>> {
    let task = |id: &str, name: &str| TreeNode::new(String::from(id), String::from(name));
    vec![
        Container::new(String::from("1")).children([task("3", "Task 1"), task("4", "Task 2")]),
        Container::new(String::from("2")).child(task("5", "Task 3")),
    ]
}
