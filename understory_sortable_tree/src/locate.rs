// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving which container owns an id.

use alloc::collections::VecDeque;

use crate::{Container, FlattenedContainer, TreeNode};

/// A top-level container that can answer "do you own this id?".
///
/// Implemented for nested [`Container`]s (breadth-first search) and for
/// [`FlattenedContainer`]s (linear scan), so the same lookup serves both the
/// persistent forest and the render-time view.
pub trait ContainerTree<K> {
    /// The container's own id.
    fn container_id(&self) -> &K;

    /// Returns `true` if a node with `id` lives somewhere below this container.
    ///
    /// The container's own id does not count.
    fn contains_node(&self, id: &K) -> bool;
}

impl<K: PartialEq, T> ContainerTree<K> for Container<K, T> {
    fn container_id(&self) -> &K {
        &self.id
    }

    fn contains_node(&self, id: &K) -> bool {
        find_node(&self.children, id).is_some()
    }
}

impl<K: PartialEq, T> ContainerTree<K> for FlattenedContainer<K, T> {
    fn container_id(&self) -> &K {
        &self.id
    }

    fn contains_node(&self, id: &K) -> bool {
        self.children.iter().any(|node| node.id == *id)
    }
}

/// Breadth-first search for the node with `id` in a forest.
#[must_use]
pub fn find_node<'a, K: PartialEq, T>(
    items: &'a [TreeNode<K, T>],
    id: &K,
) -> Option<&'a TreeNode<K, T>> {
    let mut queue: VecDeque<&TreeNode<K, T>> = items.iter().collect();
    while let Some(node) = queue.pop_front() {
        if node.id == *id {
            return Some(node);
        }
        queue.extend(node.children.iter());
    }
    None
}

/// Returns the index of the container that owns `id`.
///
/// A container's own id resolves to that container, since a container row is a
/// valid drop target. Otherwise the containers are searched in order and the
/// first one holding a node with `id` wins; with globally unique ids at most one
/// can match.
///
/// `None` means the id is unknown. Callers treat that as "abort the current
/// drag effect", not as an error.
#[must_use]
pub fn locate_container<K, C>(id: &K, containers: &[C]) -> Option<usize>
where
    K: PartialEq,
    C: ContainerTree<K>,
{
    containers
        .iter()
        .position(|container| container.container_id() == id)
        .or_else(|| {
            containers
                .iter()
                .position(|container| container.contains_node(id))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten_containers;
    use alloc::vec;
    use alloc::vec::Vec;

    fn forest() -> Vec<Container<&'static str, ()>> {
        vec![
            Container::new("A").children([
                TreeNode::new("x", ()).child(TreeNode::new("x1", ()).child(TreeNode::new("x2", ()))),
                TreeNode::new("y", ()),
            ]),
            Container::new("B").child(TreeNode::new("z", ())),
        ]
    }

    #[test]
    fn container_id_resolves_to_itself() {
        let forest = forest();
        assert_eq!(locate_container(&"A", &forest), Some(0));
        assert_eq!(locate_container(&"B", &forest), Some(1));
    }

    #[test]
    fn nested_ids_resolve_to_owner() {
        let forest = forest();
        assert_eq!(locate_container(&"x2", &forest), Some(0));
        assert_eq!(locate_container(&"y", &forest), Some(0));
        assert_eq!(locate_container(&"z", &forest), Some(1));
    }

    #[test]
    fn unknown_id_is_not_found() {
        let forest = forest();
        assert_eq!(locate_container(&"nope", &forest), None);
        let empty: [Container<&str, ()>; 0] = [];
        assert_eq!(locate_container(&"x", &empty), None);
    }

    #[test]
    fn flattened_and_nested_lookups_agree() {
        let forest = forest();
        let flat = flatten_containers(&forest);
        for id in ["A", "B", "x", "x1", "x2", "y", "z", "nope"] {
            assert_eq!(
                locate_container(&id, &forest),
                locate_container(&id, &flat),
                "lookup mismatch for {id}"
            );
        }
    }

    #[test]
    fn bfs_finds_shallow_before_deep() {
        let items = vec![
            TreeNode::new("a", 1).child(TreeNode::new("dup", 2)),
            TreeNode::new("dup", 3),
        ];
        assert_eq!(find_node(&items, &"dup").map(|node| node.data), Some(3));
    }
}
