// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover-target resolution for a dragged rectangle.
//!
//! Pointer plumbing usually lives in the host, but the choice of *which* droppable
//! the drag is over follows a fixed policy:
//!
//! - While dragging an item, every droppable (items and containers) is a candidate.
//! - While dragging a container, only other containers are candidates, so hovering
//!   an item inside another container resolves to that item's container.
//!
//! Candidates are ranked by [`closest_corners`]. The first entry of the result is the
//! hovered id to feed into [`SortableTree::drag_over`](crate::SortableTree::drag_over).
//!
//! ```
//! use kurbo::Rect;
//! use understory_sortable_tree::{DragKind, Droppable, detect_collisions};
//!
//! let droppables = [
//!     Droppable::new("A", Rect::new(0.0, 0.0, 300.0, 300.0)),
//!     Droppable::new("a1", Rect::new(10.0, 10.0, 210.0, 56.0)),
//!     Droppable::new("B", Rect::new(310.0, 0.0, 610.0, 300.0)),
//! ];
//! let dragged = Rect::new(12.0, 12.0, 212.0, 58.0);
//!
//! let hits = detect_collisions(&["A", "B"], DragKind::Item, dragged, &droppables);
//! assert_eq!(hits[0].id, "a1");
//!
//! let hits = detect_collisions(&["A", "B"], DragKind::Container, dragged, &droppables);
//! assert_eq!(hits[0].id, "A");
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::DragKind;

/// A rectangle that can receive a drop.
#[derive(Clone, Debug, PartialEq)]
pub struct Droppable<K> {
    /// Id of the item or container.
    pub id: K,
    /// Current bounds, in the same space as the dragged rectangle.
    pub rect: Rect,
}

impl<K> Droppable<K> {
    /// Creates a droppable.
    pub fn new(id: K, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// A ranked candidate; lower `value` means closer.
#[derive(Clone, Debug, PartialEq)]
pub struct Collision<K> {
    /// Id of the droppable.
    pub id: K,
    /// Mean corner-to-corner distance.
    pub value: f64,
}

fn corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x0, rect.y1),
        Point::new(rect.x1, rect.y1),
    ]
}

/// Ranks droppables by the mean distance between corresponding corners.
///
/// The result is sorted ascending; ties keep the input order.
#[must_use]
pub fn closest_corners<K: Clone>(
    collision_rect: Rect,
    droppables: &[Droppable<K>],
) -> Vec<Collision<K>> {
    let dragged = corners(collision_rect);
    let mut collisions: Vec<Collision<K>> = droppables
        .iter()
        .map(|droppable| {
            let total: f64 = corners(droppable.rect)
                .iter()
                .zip(dragged.iter())
                .map(|(a, b)| a.distance(*b))
                .sum();
            Collision {
                id: droppable.id.clone(),
                value: total / 4.0,
            }
        })
        .collect();
    collisions.sort_by(|a, b| a.value.total_cmp(&b.value));
    collisions
}

/// Ranks hover candidates for the current drag kind.
///
/// `container_ids` lists the ids of all containers. For [`DragKind::Container`] the
/// droppables are restricted to those ids; for [`DragKind::Item`] all droppables
/// are considered.
#[must_use]
pub fn detect_collisions<K: Clone + PartialEq>(
    container_ids: &[K],
    kind: DragKind,
    collision_rect: Rect,
    droppables: &[Droppable<K>],
) -> Vec<Collision<K>> {
    match kind {
        DragKind::Item => closest_corners(collision_rect, droppables),
        DragKind::Container => {
            let containers: Vec<Droppable<K>> = droppables
                .iter()
                .filter(|droppable| container_ids.contains(&droppable.id))
                .cloned()
                .collect();
            closest_corners(collision_rect, &containers)
        }
    }
}
