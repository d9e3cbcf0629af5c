// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications emitted when a drop commits.
//!
//! Events carry owned snapshots of the forest before and after the move. The
//! controller has already committed `items` when the event is returned; a host
//! that wants to veto or normalize the move hands a forest back through
//! [`SortableTree::replace_forest`](crate::SortableTree::replace_forest).

use alloc::vec::Vec;

use crate::Container;

/// An item moved to a new parent, position, or container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PositionChange<K, T> {
    /// The moved item.
    pub target_id: K,
    /// Its new parent, or `None` at the container root.
    pub parent_id: Option<K>,
    /// The sibling that now follows it, if any.
    pub next_id: Option<K>,
    /// The container it now lives in.
    pub container_id: K,
    /// The forest after the move.
    pub items: Vec<Container<K, T>>,
    /// The forest before the move.
    pub previous_items: Vec<Container<K, T>>,
}

/// A container moved to a new position among the containers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerPositionChange<K, T> {
    /// The moved container.
    pub target_id: K,
    /// The container that now follows it, if any.
    pub next_id: Option<K>,
    /// The forest after the move.
    pub items: Vec<Container<K, T>>,
    /// The forest before the move.
    pub previous_items: Vec<Container<K, T>>,
}

/// Result of a committed drop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropEvent<K, T> {
    /// An item was moved.
    Item(PositionChange<K, T>),
    /// A container was moved.
    Container(ContainerPositionChange<K, T>),
}

impl<K, T> DropEvent<K, T> {
    /// The id of the moved item or container.
    #[must_use]
    pub fn target_id(&self) -> &K {
        match self {
            Self::Item(change) => &change.target_id,
            Self::Container(change) => &change.target_id,
        }
    }

    /// The forest after the move.
    #[must_use]
    pub fn items(&self) -> &[Container<K, T>] {
        match self {
            Self::Item(change) => &change.items,
            Self::Container(change) => &change.items,
        }
    }

    /// The forest before the move.
    #[must_use]
    pub fn previous_items(&self) -> &[Container<K, T>] {
        match self {
            Self::Item(change) => &change.previous_items,
            Self::Container(change) => &change.previous_items,
        }
    }
}
