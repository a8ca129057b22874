//! Property tests for root-relative geometry.

use deck_core::{resolve_position, ContainerNode, NodeKind, SceneNode, TextNode};
use proptest::prelude::*;

/// Build root → frame → group → instance → text with the given local offsets.
fn nested(offsets: &[(f64, f64); 5]) -> SceneNode {
    let [root, a, b, c, leaf] = *offsets;

    let text = SceneNode::new("1:5", "Leaf", NodeKind::Text(TextNode::new("x"))).at(leaf.0, leaf.1);
    let instance = SceneNode::new(
        "1:4",
        "Instance",
        NodeKind::Instance(ContainerNode::with_children(vec![text])),
    )
    .at(c.0, c.1);
    let group = SceneNode::new(
        "1:3",
        "Group",
        NodeKind::Group(ContainerNode::with_children(vec![instance])),
    )
    .at(b.0, b.1);
    let frame = SceneNode::new(
        "1:2",
        "Frame",
        NodeKind::Frame(ContainerNode::with_children(vec![group])),
    )
    .at(a.0, a.1);

    let mut root = SceneNode::new(
        "1:1",
        "Root",
        NodeKind::Frame(ContainerNode::with_children(vec![frame])),
    )
    .at(root.0, root.1);
    root.resolve_absolute_transforms();
    root
}

fn offset() -> impl Strategy<Value = (f64, f64)> {
    (-5000.0..5000.0f64, -5000.0..5000.0f64)
}

proptest! {
    #[test]
    fn leaf_position_is_sum_of_offsets_below_root(
        root in offset(), a in offset(), b in offset(), c in offset(), leaf in offset()
    ) {
        let tree = nested(&[root, a, b, c, leaf]);
        let node = &tree.children()[0].children()[0].children()[0].children()[0];

        let p = resolve_position(node, &tree);
        prop_assert!((p.x - (a.0 + b.0 + c.0 + leaf.0)).abs() < 1e-6);
        prop_assert!((p.y - (a.1 + b.1 + c.1 + leaf.1)).abs() < 1e-6);
    }

    #[test]
    fn root_position_does_not_affect_relative_position(
        first in offset(), second in offset(), a in offset(), leaf in offset()
    ) {
        let zero = (0.0, 0.0);
        let t1 = nested(&[first, a, zero, zero, leaf]);
        let t2 = nested(&[second, a, zero, zero, leaf]);
        let leaf1 = &t1.children()[0].children()[0].children()[0].children()[0];
        let leaf2 = &t2.children()[0].children()[0].children()[0].children()[0];

        let p1 = resolve_position(leaf1, &t1);
        let p2 = resolve_position(leaf2, &t2);
        prop_assert!((p1.x - p2.x).abs() < 1e-6);
        prop_assert!((p1.y - p2.y).abs() < 1e-6);
    }
}
