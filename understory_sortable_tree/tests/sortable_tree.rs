// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_sortable_tree` crate.
//!
//! These drive whole drag interactions through `SortableTree`, the way a host
//! forwards pointer events, and check both the live projection and the committed
//! forest.

use kurbo::Rect;
use understory_sortable_tree::{
    Container, DragKind, DropEvent, Droppable, SortableTree, SortableTreeConfig, TreeNode,
    detect_collisions, flatten_containers, get_projection, sample_forest,
};

type Tree = SortableTree<&'static str, ()>;

fn leaf(id: &'static str) -> TreeNode<&'static str, ()> {
    TreeNode::new(id, ())
}

fn ids(children: &[TreeNode<&'static str, ()>]) -> Vec<&'static str> {
    children.iter().map(|node| node.id).collect()
}

#[test]
fn cross_container_hover_projects_into_hovered_container() {
    let forest = vec![
        Container::new("A").children([leaf("x"), leaf("y")]),
        Container::new("B").child(leaf("z")),
    ];

    // Pure projection before any migration.
    let view = flatten_containers(&forest);
    let projection = get_projection(&view, &"x", &"z", 0.0, 20.0).unwrap();
    assert_eq!(projection.depth, 0);
    assert_eq!(projection.parent_id, None);
    assert_eq!(projection.container_id, "B");

    // Same answer through the controller, which migrates on hover.
    let mut tree = Tree::new(forest);
    tree.drag_start("x");
    assert!(tree.drag_over("z"));
    assert_eq!(ids(&tree.forest()[0].children), ["y"]);
    assert_eq!(ids(&tree.forest()[1].children), ["z", "x"]);

    let projection = tree.projection().unwrap();
    assert_eq!(projection.depth, 0);
    assert_eq!(projection.parent_id, None);
    assert_eq!(projection.container_id, "B");

    let Some(DropEvent::Item(change)) = tree.drag_end(Some("z")) else {
        panic!("expected an item event");
    };
    assert_eq!(change.container_id, "B");
    assert_eq!(change.next_id, Some("z"));
    assert_eq!(ids(&tree.forest()[1].children), ["x", "z"]);
    // The snapshot before the drop already reflects the hover migration.
    assert_eq!(ids(&change.previous_items[1].children), ["z", "x"]);
}

#[test]
fn dragging_nested_item_left_moves_it_to_root() {
    let mut tree = Tree::new(vec![Container::new("A").child(leaf("x").child(leaf("y")))]);
    tree.drag_start("y");
    tree.drag_move(-50.0);

    let projection = tree.projection().unwrap();
    assert_eq!(projection.depth, 0);
    assert_eq!(projection.min_depth, 0);
    assert_eq!(projection.max_depth, 1);
    assert_eq!(projection.parent_id, None);

    let Some(DropEvent::Item(change)) = tree.drag_end(Some("y")) else {
        panic!("expected an item event");
    };
    assert_eq!(change.parent_id, None);
    assert_eq!(change.next_id, None);
    assert_eq!(
        tree.forest(),
        [Container::new("A").children([leaf("x"), leaf("y")])].as_slice()
    );
}

#[test]
fn dropping_last_leaf_in_place_is_a_no_op() {
    for forest in [
        vec![Container::new("A").children([leaf("x"), leaf("y")])],
        vec![Container::new("A").child(leaf("x").child(leaf("y")))],
    ] {
        let mut tree = Tree::new(forest.clone());
        tree.drag_start("y");
        tree.drag_over("y");
        let event = tree.drag_end(Some("y")).unwrap();
        assert_eq!(tree.forest(), forest.as_slice());
        assert_eq!(event.items(), event.previous_items());
    }
}

#[test]
fn container_drag_only_targets_containers() {
    let forest = vec![
        Container::new("A").child(leaf("a1")),
        Container::new("B").child(leaf("b1")),
    ];
    let droppables = [
        Droppable::new("A", Rect::new(0.0, 0.0, 300.0, 300.0)),
        Droppable::new("a1", Rect::new(10.0, 10.0, 290.0, 56.0)),
        Droppable::new("B", Rect::new(310.0, 0.0, 610.0, 300.0)),
        Droppable::new("b1", Rect::new(320.0, 10.0, 600.0, 56.0)),
    ];
    let container_ids: Vec<&str> = forest.iter().map(|c| c.id).collect();

    let mut tree = Tree::new(forest);
    tree.drag_start("B");
    assert_eq!(tree.session().kind, Some(DragKind::Container));

    // Dragged container sits right over item "a1".
    let dragged = Rect::new(10.0, 10.0, 290.0, 56.0);
    let hits = detect_collisions(&container_ids, DragKind::Container, dragged, &droppables);
    assert_eq!(hits[0].id, "A");

    // Even if the host reports the item, the controller resolves its container.
    tree.drag_over("a1");
    assert_eq!(tree.session().over_id, Some("A"));

    let Some(DropEvent::Container(change)) = tree.drag_end(Some(hits[0].id)) else {
        panic!("expected a container event");
    };
    assert_eq!(change.target_id, "B");
    assert_eq!(change.next_id, Some("A"));
    let order: Vec<&str> = tree.forest().iter().map(|c| c.id).collect();
    assert_eq!(order, ["B", "A"]);
}

#[test]
fn nesting_and_unnesting_round_trip() {
    let original = vec![Container::new("A").children([leaf("a"), leaf("b"), leaf("c")])];
    let mut tree = Tree::new(original.clone());

    // Nest "b" under "a".
    tree.drag_start("b");
    tree.drag_move(20.0);
    let event = tree.drag_end(Some("b")).unwrap();
    assert_eq!(
        event.items(),
        [Container::new("A").children([leaf("a").child(leaf("b")), leaf("c")])].as_slice()
    );

    // And back out again.
    tree.drag_start("b");
    tree.drag_move(-20.0);
    tree.drag_end(Some("b")).unwrap();
    assert_eq!(tree.forest(), original.as_slice());
}

#[test]
fn host_can_veto_a_drop() {
    let mut tree = Tree::new(vec![Container::new("A").children([leaf("a"), leaf("b")])]);
    tree.drag_start("b");
    tree.drag_over("a");
    let event = tree.drag_end(Some("a")).unwrap();
    assert_eq!(ids(&tree.forest()[0].children), ["b", "a"]);

    tree.replace_forest(event.previous_items().to_vec());
    assert_eq!(ids(&tree.forest()[0].children), ["a", "b"]);
}

#[test]
fn sample_forest_moves_task_between_containers() {
    let mut tree: SortableTree<String, String> = SortableTree::default();
    tree.drag_start("5".to_string());
    assert!(tree.drag_over("4".to_string()));
    tree.drag_move(0.0);

    let projection = tree.projection().unwrap();
    assert_eq!(projection.container_id, "1");
    assert_eq!(projection.depth, 0);

    let event = tree.drag_end(Some("4".to_string())).unwrap();
    assert_eq!(event.target_id(), "5");

    let first: Vec<&str> = tree.forest()[0]
        .children
        .iter()
        .map(|node| node.data.as_str())
        .collect();
    assert_eq!(first, ["Task 1", "Task 3", "Task 2"]);
    assert!(tree.forest()[1].children.is_empty());
    assert_ne!(tree.forest(), sample_forest().as_slice());
}

#[test]
fn row_layouts_follow_config() {
    let config = SortableTreeConfig::default()
        .with_indentation_width(16.0)
        .with_link_icon(true);
    let mut tree = Tree::new(vec![Container::new("A").child(leaf("a").child(leaf("b")))])
        .with_config(config);

    let layouts = tree.row_layouts();
    assert_eq!(layouts.len(), 1);
    assert_eq!(layouts[0].id, "A");
    assert_eq!(layouts[0].rows.len(), 2);
    assert!(layouts[0].rows.iter().all(|row| !row.dragging));
    assert_eq!(layouts[0].rows[1].depth, 1);
    assert_eq!(layouts[0].rows[1].indent, config.row_indent(1));

    // Dragging the parent hides its child from the rendered view.
    tree.drag_start("a");
    let layouts = tree.row_layouts();
    assert_eq!(layouts[0].rows.len(), 1);
    assert!(layouts[0].rows[0].dragging);
}
