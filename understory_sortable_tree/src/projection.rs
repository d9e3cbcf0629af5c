// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop projection: where would the dragged item land if released now?
//!
//! The projection is a pure function of the flattened view, the active and hovered
//! ids, and the horizontal drag offset. It is recomputed from scratch on every drag
//! frame and never touches its inputs.
//!
//! ## How the depth is chosen
//!
//! 1. The active item is moved to the hovered slot in a candidate ordering.
//! 2. The items immediately before and after that slot bound the depth: an item can
//!    nest at most one level below its predecessor and can never be shallower than
//!    its successor.
//! 3. Every full indentation width of horizontal drag requests one more (rightward)
//!    or one less (leftward) level, relative to the item's current depth.
//! 4. The requested depth is clamped to the bounds and the parent is derived from the
//!    predecessor.
//!
//! ```
//! use understory_sortable_tree::{Container, TreeNode, flatten_containers, get_projection};
//!
//! let forest = vec![Container::new("A").children([
//!     TreeNode::new("x", ()),
//!     TreeNode::new("y", ()),
//! ])];
//! let view = flatten_containers(&forest);
//!
//! // Drag "y" one indentation width to the right: it nests under "x".
//! let projection = get_projection(&view, &"y", &"y", 20.0, 20.0).unwrap();
//! assert_eq!(projection.depth, 1);
//! assert_eq!(projection.parent_id, Some("x"));
//! assert_eq!(projection.container_id, "A");
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::locate::locate_container;
use crate::util::{array_move, round_half_up};
use crate::{FlattenedContainer, FlattenedNode};

/// The candidate landing position of the dragged item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projection<K> {
    /// Resolved depth, within `min_depth..=max_depth` whenever that range is non-empty.
    pub depth: usize,
    /// Deepest allowed depth: one below the predecessor, or 0 without one.
    pub max_depth: usize,
    /// Shallowest allowed depth: the successor's depth, or 0 without one.
    pub min_depth: usize,
    /// The new parent, or `None` for a root-level item.
    pub parent_id: Option<K>,
    /// The container the item would land in.
    pub container_id: K,
}

/// Converts a horizontal drag offset into a change of depth.
///
/// Rounds half toward positive infinity. A non-positive or non-finite indentation
/// width never changes the depth.
#[must_use]
pub fn drag_depth(offset: f64, indentation_width: f64) -> i64 {
    if !(indentation_width.is_finite() && indentation_width > 0.0) || !offset.is_finite() {
        return 0;
    }
    round_half_up(offset / indentation_width)
}

/// Projects the active item onto the hovered slot.
///
/// `containers` is the render-time view (see
/// [`SortableTree::flattened`](crate::SortableTree::flattened)): the active item's
/// descendants must already be removed so it cannot be projected into its own
/// subtree.
///
/// Returns `None` (the neutral result) when either id cannot be resolved to a row.
/// Hovering a container row itself resolves the container but no row, so it also
/// yields `None`.
#[must_use]
pub fn get_projection<K, T>(
    containers: &[FlattenedContainer<K, T>],
    active_id: &K,
    over_id: &K,
    drag_offset: f64,
    indentation_width: f64,
) -> Option<Projection<K>>
where
    K: Clone + PartialEq + Debug,
{
    let over_container_ix = locate_container(over_id, containers)?;
    let active_container_ix = locate_container(active_id, containers)?;

    let over_container = &containers[over_container_ix];
    let active_container = &containers[active_container_ix];

    let over_ix = over_container.position(over_id)?;
    let active_ix = active_container.position(active_id)?;
    let active = &active_container.children[active_ix];

    let mut candidate: Vec<&FlattenedNode<K, T>> = over_container.children.iter().collect();
    if over_container_ix == active_container_ix {
        array_move(&mut candidate, active_ix, over_ix);
    } else {
        candidate.insert(over_ix, active);
    }

    let previous = over_ix.checked_sub(1).map(|ix| candidate[ix]);
    let next = candidate.get(over_ix + 1).copied();

    let max_depth = previous.map_or(0, |item| item.depth + 1);
    let min_depth = next.map_or(0, |item| item.depth);
    let projected = i64::try_from(active.depth)
        .unwrap_or(i64::MAX)
        .saturating_add(drag_depth(drag_offset, indentation_width));

    let depth = if projected >= depth_as_i64(max_depth) {
        max_depth
    } else if projected < depth_as_i64(min_depth) {
        min_depth
    } else {
        // In range, so non-negative and below `max_depth`.
        usize::try_from(projected).unwrap_or(min_depth)
    };

    let parent_id = match previous {
        _ if depth == 0 => None,
        None => None,
        Some(previous) if depth == previous.depth => previous.parent_id.clone(),
        Some(previous) if depth > previous.depth => Some(previous.id.clone()),
        Some(_) => candidate[..over_ix]
            .iter()
            .rev()
            .find(|item| item.depth == depth)
            .and_then(|item| item.parent_id.clone()),
    };

    let projection = Projection {
        depth,
        max_depth,
        min_depth,
        parent_id,
        container_id: over_container.id.clone(),
    };
    tracing::trace!(?active_id, ?over_id, drag_offset, ?projection, "projected drop");
    Some(projection)
}

fn depth_as_i64(depth: usize) -> i64 {
    i64::try_from(depth).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Container, TreeNode, flatten_containers};
    use alloc::vec;

    type Forest = Vec<Container<&'static str, ()>>;

    fn leaf(id: &'static str) -> TreeNode<&'static str, ()> {
        TreeNode::new(id, ())
    }

    /// A: [a, [b, [c]], d]
    fn nested() -> Forest {
        vec![Container::new("A").children([
            leaf("a").child(leaf("b").child(leaf("c"))),
            leaf("d"),
        ])]
    }

    #[test]
    fn drag_depth_rounds_per_indentation_width() {
        assert_eq!(drag_depth(0.0, 20.0), 0);
        assert_eq!(drag_depth(9.0, 20.0), 0);
        assert_eq!(drag_depth(10.0, 20.0), 1);
        assert_eq!(drag_depth(45.0, 20.0), 2);
        assert_eq!(drag_depth(-30.0, 20.0), -1);
        assert_eq!(drag_depth(-31.0, 20.0), -2);
        assert_eq!(drag_depth(50.0, 0.0), 0);
        assert_eq!(drag_depth(f64::NAN, 20.0), 0);
    }

    #[test]
    fn unknown_ids_yield_neutral_result() {
        let view = flatten_containers(&nested());
        assert_eq!(get_projection(&view, &"zz", &"a", 0.0, 20.0), None);
        assert_eq!(get_projection(&view, &"a", &"zz", 0.0, 20.0), None);
    }

    #[test]
    fn hovering_container_row_yields_neutral_result() {
        let view = flatten_containers(&nested());
        assert_eq!(get_projection(&view, &"d", &"A", 0.0, 20.0), None);
    }

    #[test]
    fn in_place_keeps_current_position() {
        let view = flatten_containers(&nested());
        let p = get_projection(&view, &"c", &"c", 0.0, 20.0).unwrap();
        assert_eq!(p.depth, 2);
        assert_eq!(p.max_depth, 2);
        assert_eq!(p.min_depth, 0);
        assert_eq!(p.parent_id, Some("b"));
    }

    #[test]
    fn rightward_drag_is_capped_below_predecessor() {
        let view = flatten_containers(&nested());
        let p = get_projection(&view, &"d", &"d", 200.0, 20.0).unwrap();
        // Predecessor is "c" at depth 2.
        assert_eq!(p.max_depth, 3);
        assert_eq!(p.depth, 3);
        assert_eq!(p.parent_id, Some("c"));
    }

    #[test]
    fn shallower_depth_inherits_parent_of_earlier_sibling() {
        let view = flatten_containers(&nested());
        // "d" dragged right by one level, predecessor "c" at depth 2: depth 1 is
        // shallower than the predecessor, so "b" (depth 1) supplies the parent.
        let p = get_projection(&view, &"d", &"d", 20.0, 20.0).unwrap();
        assert_eq!(p.depth, 1);
        assert_eq!(p.parent_id, Some("a"));
    }

    #[test]
    fn first_slot_is_forced_to_root() {
        let view = flatten_containers(&nested());
        let p = get_projection(&view, &"d", &"a", 100.0, 20.0).unwrap();
        assert_eq!(p.max_depth, 0);
        assert_eq!(p.depth, 0);
        assert_eq!(p.parent_id, None);
    }

    #[test]
    fn successor_depth_is_a_floor() {
        // A: [a, [b, c]]; dragging "b" over itself far left cannot leave "c" stranded
        // under a shallower sibling.
        let forest = vec![Container::new("A").child(leaf("a").children([leaf("b"), leaf("c")]))];
        let view = flatten_containers(&forest);
        let p = get_projection(&view, &"b", &"b", -100.0, 20.0).unwrap();
        assert_eq!(p.min_depth, 1);
        assert_eq!(p.depth, 1);
        assert_eq!(p.parent_id, Some("a"));
    }

    #[test]
    fn downward_move_uses_moved_ordering() {
        // A: [a, b, c]; "a" hovering "c" lands after "c".
        let forest = vec![Container::new("A").children([leaf("a"), leaf("b"), leaf("c")])];
        let view = flatten_containers(&forest);
        let p = get_projection(&view, &"a", &"c", 20.0, 20.0).unwrap();
        assert_eq!(p.max_depth, 1);
        assert_eq!(p.min_depth, 0);
        assert_eq!(p.depth, 1);
        assert_eq!(p.parent_id, Some("c"));
    }

    #[test]
    fn cross_container_inserts_at_hovered_slot() {
        let forest = vec![
            Container::new("A").children([leaf("x"), leaf("y")]),
            Container::new("B").child(leaf("z")),
        ];
        let view = flatten_containers(&forest);
        let p = get_projection(&view, &"x", &"z", 0.0, 20.0).unwrap();
        assert_eq!(
            p,
            Projection {
                depth: 0,
                max_depth: 0,
                min_depth: 0,
                parent_id: None,
                container_id: "B",
            }
        );
    }

    #[test]
    fn projection_does_not_mutate_and_is_repeatable() {
        let view = flatten_containers(&nested());
        let before = view.clone();
        let first = get_projection(&view, &"d", &"b", 35.0, 20.0);
        let second = get_projection(&view, &"d", &"b", 35.0, 20.0);
        assert_eq!(first, second);
        assert_eq!(view, before);
    }
}
