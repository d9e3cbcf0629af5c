// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag lifecycle controller.
//!
//! [`SortableTree`] owns the forest and the transient [`DragSession`]. The host
//! forwards four events from its pointer plumbing:
//!
//! | Event | Call | Effect |
//! |-------|------|--------|
//! | drag start | [`SortableTree::drag_start`] | enters the dragging state |
//! | pointer move | [`SortableTree::drag_move`] | updates the horizontal offset |
//! | hover change | [`SortableTree::drag_over`] | updates the hovered id; may migrate the item to another container |
//! | drop | [`SortableTree::drag_end`] | commits the projected move, then returns to idle |
//!
//! [`SortableTree::reset`] forces the idle state when the host loses the drag
//! without a drop (for example on lost pointer capture).
//!
//! Between events the host renders [`SortableTree::row_layouts`], which places the
//! dragged row at its projected depth. The forest itself only changes at drag-over
//! (cross-container migration) and at drag-end.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use crate::event::{ContainerPositionChange, DropEvent, PositionChange};
use crate::flatten::{build_tree, flatten_containers, into_flattened, remove_children_of};
use crate::locate::{find_node, locate_container};
use crate::projection::{Projection, get_projection};
use crate::util::{array_move, subtree_end_ix};
use crate::{
    Container, FlattenedContainer, FlattenedNode, SortableTreeConfig, TreeNode, sample_forest,
};

/// What is being dragged.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DragKind {
    /// An item inside some container.
    Item,
    /// A whole container.
    Container,
}

/// Transient state of the current drag, reset when the drag ends.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<K> {
    /// The grabbed item or container.
    pub active_id: Option<K>,
    /// The currently hovered item or container.
    pub over_id: Option<K>,
    /// Horizontal pointer displacement since drag start, in logical pixels.
    pub offset_left: f64,
    /// Whether an item or a container is being dragged.
    pub kind: Option<DragKind>,
}

impl<K> Default for DragSession<K> {
    fn default() -> Self {
        Self {
            active_id: None,
            over_id: None,
            offset_left: 0.0,
            kind: None,
        }
    }
}

impl<K> DragSession<K> {
    /// Returns `true` between a drag start and the matching end or reset.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.active_id.is_some()
    }
}

/// Layout of one rendered row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowLayout<K> {
    /// Id of the item.
    pub id: K,
    /// Depth to render at; the projected depth for the dragged row.
    pub depth: usize,
    /// Leading indentation in logical pixels.
    pub indent: f64,
    /// Whether the row draws the link decoration (or an equivalent spacer).
    pub linked: bool,
    /// Whether this is the dragged row.
    pub dragging: bool,
}

/// Rows of one container, in display order.
#[derive(Clone, Debug, PartialEq)]
pub struct ContainerLayout<K> {
    /// Id of the container.
    pub id: K,
    /// Its rows.
    pub rows: Vec<RowLayout<K>>,
}

/// A forest of sortable trees plus the drag session acting on it.
#[derive(Clone, Debug)]
pub struct SortableTree<K, T> {
    forest: Vec<Container<K, T>>,
    config: SortableTreeConfig,
    session: DragSession<K>,
}

impl Default for SortableTree<alloc::string::String, alloc::string::String> {
    /// A tree over the built-in [`sample_forest`].
    fn default() -> Self {
        Self::new(sample_forest())
    }
}

impl<K, T> SortableTree<K, T> {
    /// Creates an idle controller over `forest` with the default configuration.
    pub fn new(forest: Vec<Container<K, T>>) -> Self {
        Self {
            forest,
            config: SortableTreeConfig::default(),
            session: DragSession::default(),
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SortableTreeConfig) -> Self {
        self.config = config;
        self
    }

    /// The current forest.
    #[must_use]
    pub fn forest(&self) -> &[Container<K, T>] {
        &self.forest
    }

    /// Consumes the controller, returning the forest.
    #[must_use]
    pub fn into_forest(self) -> Vec<Container<K, T>> {
        self.forest
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SortableTreeConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: SortableTreeConfig) {
        self.config = config;
    }

    /// The current drag session.
    #[must_use]
    pub fn session(&self) -> &DragSession<K> {
        &self.session
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    /// Replaces the whole forest and returns to idle.
    ///
    /// This is how a host applies its own decision after a [`DropEvent`]: hand back
    /// `previous_items` to veto a move, or a normalized forest to adjust it.
    pub fn replace_forest(&mut self, forest: Vec<Container<K, T>>) {
        self.forest = forest;
        self.session = DragSession::default();
    }

    /// Forces the session back to idle without touching the forest.
    ///
    /// Safe to call at any time, including when already idle.
    pub fn reset(&mut self) {
        if self.session.is_dragging() {
            tracing::debug!("drag session reset");
        }
        self.session = DragSession::default();
    }

    /// Records the horizontal pointer displacement since drag start.
    ///
    /// `offset_left` is the cumulative delta, not an increment. Ignored while idle.
    pub fn drag_move(&mut self, offset_left: f64) {
        if self.session.is_dragging() {
            self.session.offset_left = offset_left;
        }
    }
}

impl<K, T> SortableTree<K, T>
where
    K: Clone + Eq + Hash + Debug,
    T: Clone,
{
    /// Starts dragging the item or container `id`.
    ///
    /// The hovered id starts out as the dragged id and the offset as zero. A
    /// container id starts a [`DragKind::Container`] drag.
    pub fn drag_start(&mut self, id: K) {
        let kind = if self.forest.iter().any(|container| container.id == id) {
            DragKind::Container
        } else {
            DragKind::Item
        };
        tracing::debug!(?id, ?kind, "drag start");
        self.session = DragSession {
            active_id: Some(id.clone()),
            over_id: Some(id),
            offset_left: 0.0,
            kind: Some(kind),
        };
    }

    /// Updates the hovered id.
    ///
    /// For an item drag that hovers a different container than the one holding the
    /// item, the item (with its subtree) is moved to the end of the hovered
    /// container right away, so later projections see a single-container view.
    /// Returns `true` when such a migration happened.
    ///
    /// For a container drag the hovered id is normalized to the owning container.
    pub fn drag_over(&mut self, over_id: K) -> bool {
        let Some(active_id) = self.session.active_id.clone() else {
            return false;
        };

        if self.session.kind == Some(DragKind::Container) {
            let over_id = match locate_container(&over_id, &self.forest) {
                Some(ix) => self.forest[ix].id.clone(),
                None => over_id,
            };
            self.session.over_id = Some(over_id);
            return false;
        }

        self.session.over_id = Some(over_id.clone());

        let (Some(active_ix), Some(over_ix)) = (
            locate_container(&active_id, &self.forest),
            locate_container(&over_id, &self.forest),
        ) else {
            tracing::debug!(?active_id, ?over_id, "drag over unresolved id; ignoring");
            return false;
        };
        if active_ix == over_ix {
            return false;
        }

        let Some(node) = remove_node(&mut self.forest[active_ix].children, &active_id) else {
            return false;
        };
        self.forest[over_ix].children.push(node);
        tracing::debug!(
            ?active_id,
            from = ?self.forest[active_ix].id,
            to = ?self.forest[over_ix].id,
            "migrated item to hovered container"
        );
        true
    }

    /// The render-time view: flattened containers without the dragged item's
    /// descendants.
    #[must_use]
    pub fn flattened(&self) -> Vec<FlattenedContainer<K, T>> {
        let mut containers = flatten_containers(&self.forest);
        if self.session.kind == Some(DragKind::Item) {
            if let Some(active_id) = &self.session.active_id {
                for container in &mut containers {
                    let children = core::mem::take(&mut container.children);
                    container.children = remove_children_of(children, [active_id.clone()]);
                }
            }
        }
        containers
    }

    /// The projected drop position for the current session.
    ///
    /// `None` while idle, while dragging a container, or when the ids do not resolve.
    #[must_use]
    pub fn projection(&self) -> Option<Projection<K>> {
        if self.session.kind != Some(DragKind::Item) {
            return None;
        }
        let active_id = self.session.active_id.as_ref()?;
        let over_id = self.session.over_id.as_ref()?;
        get_projection(
            &self.flattened(),
            active_id,
            over_id,
            self.session.offset_left,
            self.config.indentation_width,
        )
    }

    /// Row layouts for every container, with the dragged row at its projected depth.
    #[must_use]
    pub fn row_layouts(&self) -> Vec<ContainerLayout<K>> {
        let projection = self.projection();
        let active_id = self.session.active_id.as_ref();
        self.flattened()
            .into_iter()
            .map(|container| ContainerLayout {
                rows: container
                    .children
                    .into_iter()
                    .map(|node| {
                        let dragging = active_id == Some(&node.id);
                        let depth = match &projection {
                            Some(projection) if dragging => projection.depth,
                            _ => node.depth,
                        };
                        RowLayout {
                            id: node.id,
                            depth,
                            indent: self.config.row_indent(depth),
                            linked: depth > 0,
                            dragging,
                        }
                    })
                    .collect(),
                id: container.id,
            })
            .collect()
    }

    /// Ends the drag over `over_id` (or over nothing).
    ///
    /// Commits the projected move and returns the matching event. The drag is
    /// aborted without touching the forest when there is no hovered target, when
    /// the dragged item and the target resolve to different containers, or when no
    /// projection exists. The session returns to idle in every case.
    pub fn drag_end(&mut self, over_id: Option<K>) -> Option<DropEvent<K, T>> {
        let Some(over_id) = over_id else {
            tracing::debug!("drag ended outside any target; aborting");
            self.session = DragSession::default();
            return None;
        };
        let over_id = match self.session.kind {
            Some(DragKind::Container) => match locate_container(&over_id, &self.forest) {
                Some(ix) => self.forest[ix].id.clone(),
                None => over_id,
            },
            _ => over_id,
        };
        self.session.over_id = Some(over_id);

        let event = match self.session.kind {
            Some(DragKind::Item) => self.commit_item_move(),
            Some(DragKind::Container) => self.commit_container_move(),
            None => None,
        };
        self.session = DragSession::default();
        event
    }

    fn commit_item_move(&mut self) -> Option<DropEvent<K, T>> {
        let active_id = self.session.active_id.clone()?;
        let over_id = self.session.over_id.clone()?;

        let (Some(active_ix), Some(over_ix)) = (
            locate_container(&active_id, &self.forest),
            locate_container(&over_id, &self.forest),
        ) else {
            tracing::debug!(?active_id, ?over_id, "drop target unresolved; aborting");
            return None;
        };
        if active_ix != over_ix {
            tracing::debug!(
                ?active_id,
                ?over_id,
                "drop target in a different container; aborting"
            );
            return None;
        }
        let Some(projection) = self.projection() else {
            tracing::debug!(?active_id, ?over_id, "no projection; aborting");
            return None;
        };

        let previous_items = self.forest.clone();
        let container = &mut self.forest[over_ix];
        let flat = into_flattened(core::mem::take(&mut container.children));
        let moved = move_flattened(flat, &active_id, &over_id, &projection);
        container.children = build_tree(moved);

        let container_id = container.id.clone();
        let next_id = next_sibling_id(
            &container.children,
            projection.parent_id.as_ref(),
            &active_id,
        );
        tracing::debug!(
            ?active_id,
            ?over_id,
            depth = projection.depth,
            parent_id = ?projection.parent_id,
            "committed item move"
        );
        Some(DropEvent::Item(PositionChange {
            target_id: active_id,
            parent_id: projection.parent_id,
            next_id,
            container_id,
            items: self.forest.clone(),
            previous_items,
        }))
    }

    fn commit_container_move(&mut self) -> Option<DropEvent<K, T>> {
        let active_id = self.session.active_id.clone()?;
        let over_id = self.session.over_id.clone()?;

        let from = self.forest.iter().position(|c| c.id == active_id)?;
        let Some(to) = self.forest.iter().position(|c| c.id == over_id) else {
            tracing::debug!(?active_id, ?over_id, "container drop target unresolved; aborting");
            return None;
        };
        if from == to {
            return None;
        }

        let previous_items = self.forest.clone();
        array_move(&mut self.forest, from, to);
        let next_id = self.forest.get(to + 1).map(|c| c.id.clone());
        tracing::debug!(?active_id, from, to, "committed container move");
        Some(DropEvent::Container(ContainerPositionChange {
            target_id: active_id,
            next_id,
            items: self.forest.clone(),
            previous_items,
        }))
    }
}

/// Applies a projection to a container's full flattened sequence.
///
/// The active node is re-annotated with the projected depth and parent, then moved
/// with its descendants to the hovered slot of the view that excludes those
/// descendants. Descendants keep their parent links, so they follow it.
fn move_flattened<K, T>(
    mut flat: Vec<FlattenedNode<K, T>>,
    active_id: &K,
    over_id: &K,
    projection: &Projection<K>,
) -> Vec<FlattenedNode<K, T>>
where
    K: Clone + Eq,
{
    let Some(active_ix) = flat.iter().position(|node| node.id == *active_id) else {
        return flat;
    };
    let end_ix = subtree_end_ix(&flat, active_ix);
    let descendants: Vec<_> = flat.drain(active_ix + 1..end_ix).collect();

    let Some(over_ix) = flat.iter().position(|node| node.id == *over_id) else {
        // The target was inside the dragged subtree; put everything back unchanged.
        flat.splice(active_ix + 1..active_ix + 1, descendants);
        return flat;
    };

    flat[active_ix].depth = projection.depth;
    flat[active_ix].parent_id = projection.parent_id.clone();
    array_move(&mut flat, active_ix, over_ix);
    flat.splice(over_ix + 1..over_ix + 1, descendants);
    flat
}

/// Removes the node with `id` (and its subtree) from a forest.
fn remove_node<K: PartialEq, T>(items: &mut Vec<TreeNode<K, T>>, id: &K) -> Option<TreeNode<K, T>> {
    if let Some(index) = items.iter().position(|node| node.id == *id) {
        return Some(items.remove(index));
    }
    items
        .iter_mut()
        .find_map(|node| remove_node(&mut node.children, id))
}

/// The id of the sibling following `id` under `parent_id` (or at the root level).
fn next_sibling_id<K: Clone + PartialEq, T>(
    roots: &[TreeNode<K, T>],
    parent_id: Option<&K>,
    id: &K,
) -> Option<K> {
    let siblings = match parent_id {
        None => roots,
        Some(parent_id) => &find_node(roots, parent_id)?.children,
    };
    let index = siblings.iter().position(|node| node.id == *id)?;
    siblings.get(index + 1).map(|node| node.id.clone())
}
