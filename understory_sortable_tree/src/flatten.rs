// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening and rebuilding of nested trees.
//!
//! A tree is flattened by pre-order traversal into [`FlattenedNode`]s that carry
//! `parent_id`/`depth`/`index` annotations. [`build_tree`] walks such a sequence in
//! order and re-links every node under its `parent_id`, so the round trip
//! `build_tree(flatten_tree(tree)) == tree` holds for any tree.
//!
//! The drag controller edits the annotations (depth and parent of the dragged node)
//! and the order of the flat sequence, then rebuilds. Rebuilding requires every node
//! to appear after its parent. A node whose parent has not been seen is handled
//! according to [`OrphanHandling`].

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::{Container, FlattenedContainer, FlattenedNode, TreeNode};

/// Flattens a forest in pre-order, cloning each payload.
///
/// Root-level nodes get `parent_id == None` and depth 0.
#[must_use]
pub fn flatten_tree<K: Clone, T: Clone>(items: &[TreeNode<K, T>]) -> Vec<FlattenedNode<K, T>> {
    let mut out = Vec::new();
    flatten_into(items, None, 0, &mut out);
    out
}

fn flatten_into<K: Clone, T: Clone>(
    items: &[TreeNode<K, T>],
    parent_id: Option<&K>,
    depth: usize,
    out: &mut Vec<FlattenedNode<K, T>>,
) {
    for (index, item) in items.iter().enumerate() {
        out.push(FlattenedNode {
            id: item.id.clone(),
            parent_id: parent_id.cloned(),
            depth,
            index,
            data: item.data.clone(),
        });
        flatten_into(&item.children, Some(&item.id), depth + 1, out);
    }
}

/// Flattens a forest in pre-order, consuming it.
///
/// Produces the same sequence as [`flatten_tree`] without cloning payloads.
#[must_use]
pub fn into_flattened<K: Clone, T>(items: Vec<TreeNode<K, T>>) -> Vec<FlattenedNode<K, T>> {
    let mut out = Vec::new();
    into_flattened_inner(items, None, 0, &mut out);
    out
}

fn into_flattened_inner<K: Clone, T>(
    items: Vec<TreeNode<K, T>>,
    parent_id: Option<&K>,
    depth: usize,
    out: &mut Vec<FlattenedNode<K, T>>,
) {
    for (index, item) in items.into_iter().enumerate() {
        let TreeNode { id, data, children } = item;
        out.push(FlattenedNode {
            id: id.clone(),
            parent_id: parent_id.cloned(),
            depth,
            index,
            data,
        });
        into_flattened_inner(children, Some(&id), depth + 1, out);
    }
}

/// Flattens the children of every container.
#[must_use]
pub fn flatten_containers<K: Clone, T: Clone>(
    containers: &[Container<K, T>],
) -> Vec<FlattenedContainer<K, T>> {
    containers
        .iter()
        .map(|container| FlattenedContainer {
            id: container.id.clone(),
            children: flatten_tree(&container.children),
        })
        .collect()
}

/// Returns the flattened node with the given id, if any.
#[must_use]
pub fn find_item<'a, K: PartialEq, T>(
    items: &'a [FlattenedNode<K, T>],
    id: &K,
) -> Option<&'a FlattenedNode<K, T>> {
    items.iter().find(|item| item.id == *id)
}

/// Removes every node whose parent chain leads to one of `ids`.
///
/// The nodes named by `ids` themselves are kept. The exclusion set grows as
/// descendants are discovered, so grandchildren are removed even though only the
/// top of the subtree was named. This relies on parents preceding their children,
/// which holds for any pre-order sequence.
#[must_use]
pub fn remove_children_of<K, T, I>(
    mut items: Vec<FlattenedNode<K, T>>,
    ids: I,
) -> Vec<FlattenedNode<K, T>>
where
    K: Clone + Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut excluded: HashSet<K> = ids.into_iter().collect();
    if excluded.is_empty() {
        return items;
    }
    items.retain(|item| match &item.parent_id {
        Some(parent_id) if excluded.contains(parent_id) => {
            excluded.insert(item.id.clone());
            false
        }
        _ => true,
    });
    items
}

/// What [`build_tree_with`] does with a node whose `parent_id` names no earlier node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OrphanHandling {
    /// Attach the node (with its own descendants) at the root level.
    ///
    /// A warning is logged for each re-homed node.
    #[default]
    AttachToRoot,
    /// Discard the node and everything parented under it.
    Drop,
    /// Stop and return an [`OrphanError`].
    Error,
}

/// Error returned by [`build_tree_with`] under [`OrphanHandling::Error`].
#[derive(Clone, PartialEq, Eq)]
pub struct OrphanError<K> {
    /// The node that could not be linked.
    pub id: K,
    /// The parent it referenced.
    pub parent_id: K,
}

impl<K: fmt::Debug> fmt::Debug for OrphanError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OrphanError {{ id: {:?}, parent_id: {:?} }}",
            self.id, self.parent_id
        )
    }
}

impl<K: fmt::Debug> fmt::Display for OrphanError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node {:?} references parent {:?}, which does not precede it",
            self.id, self.parent_id
        )
    }
}

impl<K: fmt::Debug> core::error::Error for OrphanError<K> {}

/// Rebuilds a nested forest from a flattened sequence.
///
/// Nodes are appended to their parent's children in sequence order. A node whose
/// `parent_id` is `None` goes to the root level; so does a node whose parent has not
/// appeared earlier in the sequence (see [`OrphanHandling::AttachToRoot`]).
#[must_use]
pub fn build_tree<K, T>(items: Vec<FlattenedNode<K, T>>) -> Vec<TreeNode<K, T>>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    // `AttachToRoot` never rejects a node.
    build_tree_with(items, OrphanHandling::AttachToRoot).unwrap_or_default()
}

struct Slot<K, T> {
    node: Option<(K, T)>,
    children: SmallVec<[usize; 4]>,
}

/// Rebuilds a nested forest, choosing how nodes with an unknown parent are handled.
///
/// Parent links are resolved through an id → slot map over an arena of nodes, so
/// the sequence is walked once and no node is moved more than once.
///
/// # Errors
///
/// Returns [`OrphanError`] for the first unlinkable node when `handling` is
/// [`OrphanHandling::Error`].
pub fn build_tree_with<K, T>(
    items: Vec<FlattenedNode<K, T>>,
    handling: OrphanHandling,
) -> Result<Vec<TreeNode<K, T>>, OrphanError<K>>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    let mut slots: Vec<Slot<K, T>> = Vec::with_capacity(items.len());
    let mut slot_of: HashMap<K, usize> = HashMap::with_capacity(items.len());
    let mut roots: Vec<usize> = Vec::new();

    for item in items {
        let FlattenedNode {
            id,
            parent_id,
            data,
            ..
        } = item;

        let parent_slot = match parent_id {
            None => None,
            Some(parent_id) => match slot_of.get(&parent_id) {
                Some(&slot) => Some(slot),
                None => match handling {
                    OrphanHandling::AttachToRoot => {
                        tracing::warn!(
                            ?id,
                            ?parent_id,
                            "parent not found while rebuilding tree; attaching at root"
                        );
                        None
                    }
                    OrphanHandling::Drop => {
                        tracing::debug!(?id, ?parent_id, "dropping orphaned node");
                        continue;
                    }
                    OrphanHandling::Error => return Err(OrphanError { id, parent_id }),
                },
            },
        };

        let slot = slots.len();
        slots.push(Slot {
            node: Some((id.clone(), data)),
            children: SmallVec::new(),
        });
        match parent_slot {
            Some(parent) => slots[parent].children.push(slot),
            None => roots.push(slot),
        }
        slot_of.insert(id, slot);
    }

    Ok(roots
        .into_iter()
        .filter_map(|slot| assemble(&mut slots, slot))
        .collect())
}

fn assemble<K, T>(slots: &mut [Slot<K, T>], slot: usize) -> Option<TreeNode<K, T>> {
    let (id, data) = slots[slot].node.take()?;
    let child_slots = core::mem::take(&mut slots[slot].children);
    let children = child_slots
        .into_iter()
        .filter_map(|child| assemble(slots, child))
        .collect();
    Some(TreeNode { id, data, children })
}
