// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree, container, and flattened row types.

use alloc::vec::Vec;

/// A node of a sortable tree.
///
/// `K` is the application's id type and `T` the item payload. Ids must be unique
/// across the whole forest (all containers), since drag targets are resolved by id
/// alone.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode<K, T> {
    /// Identity of the node.
    pub id: K,
    /// Application payload.
    pub data: T,
    /// Ordered children. This is the authoritative parent/child structure.
    pub children: Vec<TreeNode<K, T>>,
}

impl<K, T> TreeNode<K, T> {
    /// Creates a leaf node.
    pub fn new(id: K, data: T) -> Self {
        Self {
            id,
            data,
            children: Vec::new(),
        }
    }

    /// Appends a child, returning the node for chaining.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends children, returning the node for chaining.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns `true` if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A top-level root holding an ordered tree of items.
///
/// Containers are siblings of each other and have no parent. Items can move
/// between containers while a drag hovers over a different container.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container<K, T> {
    /// Identity of the container. Shares the id space with the items.
    pub id: K,
    /// Root-level items of this container.
    pub children: Vec<TreeNode<K, T>>,
}

impl<K, T> Container<K, T> {
    /// Creates an empty container.
    pub fn new(id: K) -> Self {
        Self {
            id,
            children: Vec::new(),
        }
    }

    /// Appends a root-level item, returning the container for chaining.
    #[must_use]
    pub fn child(mut self, child: TreeNode<K, T>) -> Self {
        self.children.push(child);
        self
    }

    /// Appends root-level items, returning the container for chaining.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = TreeNode<K, T>>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A [`TreeNode`] projected into a flat, pre-order sequence.
///
/// `parent_id`, `depth`, and `index` are derived annotations. They are rewritten
/// by the drag controller before a commit and read back by
/// [`build_tree`](crate::build_tree), which only consults `parent_id`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlattenedNode<K, T> {
    /// Identity of the node.
    pub id: K,
    /// Id of the owning node, or `None` at the container root.
    pub parent_id: Option<K>,
    /// Nesting level; root-level items have depth 0.
    pub depth: usize,
    /// Position among the node's siblings.
    ///
    /// The position in the flattened sequence itself is the node's index in the
    /// surrounding `Vec`.
    pub index: usize,
    /// Application payload.
    pub data: T,
}

/// A [`Container`] whose children have been flattened.
///
/// In the controller's render-time view the active item's descendants are
/// removed, so a node can never be projected into its own subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlattenedContainer<K, T> {
    /// Identity of the container.
    pub id: K,
    /// Flattened, depth-annotated items.
    pub children: Vec<FlattenedNode<K, T>>,
}

impl<K: PartialEq, T> FlattenedContainer<K, T> {
    /// Returns the flat position of `id` in this container, if present.
    #[must_use]
    pub fn position(&self, id: &K) -> Option<usize> {
        self.children.iter().position(|node| node.id == *id)
    }
}
