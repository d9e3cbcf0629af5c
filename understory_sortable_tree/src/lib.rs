// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sortable_tree --heading-base-level=0

//! Understory Sortable Tree: headless drag-and-drop logic for sortable trees.
//!
//! This crate models a forest of **containers**, each holding a reorderable,
//! re-parentable tree of items, and the drag interaction that moves items between
//! depths and between containers. It computes a live **projection** of where a
//! dragged item would land (depth, parent, container) and commits it when the drag
//! ends.
//!
//! It does not render anything, track pointers, or hit-test. The host supplies:
//!
//! - the active and hovered ids during a drag (see [`detect_collisions`] for the
//!   hover policy),
//! - the horizontal pointer offset since drag start,
//! - start / end / cancel lifecycle calls.
//!
//! ## Pieces
//!
//! - [`TreeNode`], [`Container`]: the persistent forest. Ids are a caller-chosen
//!   type `K`, unique across the forest; payloads are a caller-chosen type `T`.
//! - [`flatten_tree`] / [`build_tree`]: a lossless codec between nested trees and
//!   depth-annotated pre-order sequences of [`FlattenedNode`]s.
//! - [`locate_container`]: which container owns an id.
//! - [`get_projection`]: the pure, per-frame drop projection.
//! - [`SortableTree`]: the drag lifecycle controller that owns the forest and
//!   emits a [`DropEvent`] on every committed move.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_sortable_tree::{Container, DropEvent, SortableTree, TreeNode};
//!
//! let mut tree = SortableTree::new(vec![
//!     Container::new("todo").children([TreeNode::new("a", ()), TreeNode::new("b", ())]),
//!     Container::new("done"),
//! ]);
//!
//! // Grab "b" and drag it one indentation step (20px by default) to the right.
//! tree.drag_start("b");
//! tree.drag_move(22.0);
//!
//! // While dragging, the projection says "b" would nest under "a".
//! let projection = tree.projection().unwrap();
//! assert_eq!(projection.parent_id, Some("a"));
//!
//! // Drop it where it is.
//! let Some(DropEvent::Item(change)) = tree.drag_end(Some("b")) else {
//!     unreachable!();
//! };
//! assert_eq!(change.parent_id, Some("a"));
//! assert_eq!(tree.forest()[0].children[0].children[0].id, "b");
//! assert!(!tree.is_dragging());
//! ```
//!
//! ## Failure behavior
//!
//! Nothing here panics on bad input. An unknown id, a drop outside any target, or a
//! drop that cannot be projected leaves the forest untouched and returns the
//! session to idle; the interaction simply snaps back.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo` and `tracing`.
//! - `libm`: `no_std` float math for `kurbo`.
//! - `serde`: `Serialize`/`Deserialize` for the tree and flattened types.
//!
//! Diagnostics are emitted through `tracing`: aborted drags at `debug`, per-frame
//! projections at `trace`, and re-homed orphans during rebuild at `warn`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod collision;
mod config;
mod controller;
mod event;
mod flatten;
mod locate;
mod projection;
mod sample;
mod types;
mod util;

pub use collision::{Collision, Droppable, closest_corners, detect_collisions};
pub use config::SortableTreeConfig;
pub use controller::{ContainerLayout, DragKind, DragSession, RowLayout, SortableTree};
pub use event::{ContainerPositionChange, DropEvent, PositionChange};
pub use flatten::{
    OrphanError, OrphanHandling, build_tree, build_tree_with, find_item, flatten_containers,
    flatten_tree, into_flattened, remove_children_of,
};
pub use locate::{ContainerTree, find_node, locate_container};
pub use projection::{Projection, drag_depth, get_projection};
pub use sample::sample_forest;
pub use types::{Container, FlattenedContainer, FlattenedNode, TreeNode};
