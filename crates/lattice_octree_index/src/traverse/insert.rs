use super::Frame;
use crate::builder::SnapshotBuilder;
use crate::element::{Element, ElementNode, NIL};
use crate::node::{OctreeNode, MAX_ELEMENTS_PER_NODE};

use lattice_octree_core::octant_code;

/// Appends `element` to the element pool and links it into the leaf its position routes to,
/// splitting full leaves along the way.
///
/// A leaf accepts the element when it has capacity *or* it sits at the maximum depth — the depth
/// cap overrides the capacity cap, which is what keeps more than `MAX_ELEMENTS_PER_NODE`
/// elements at one position from being lost. Otherwise the leaf splits and the frame is pushed
/// back, so cascading splits (all elements re-routing into the same child) happen on the retry
/// path until the depth cap is hit.
pub(crate) fn insert(builder: &mut SnapshotBuilder, element: Element) {
    let element_index = builder.push_element(element);
    let position = element.position;

    let mut stack = vec![Frame::root(builder.bounds_size())];
    while let Some(frame) = stack.pop() {
        let node = builder.node(frame.node);

        if node.is_branch() {
            let code = octant_code(frame.center(), position);
            stack.push(frame.child(node.first_child, code));
            continue;
        }

        if node.count < MAX_ELEMENTS_PER_NODE || frame.depth >= builder.max_depth() {
            // Head insertion into the bucket list. This is the terminal case.
            let head = builder.push_element_node(ElementNode::new(element_index, node.first_child));
            builder.set_node(frame.node, OctreeNode::leaf(head, node.count + 1));
            return;
        }

        split(builder, &frame, node);
        // Retry from this (now branch) node.
        stack.push(frame);
    }

    // The loop always terminates through the leaf case above: `max_depth` bounds the descent and
    // every split strictly grows the node pool.
    unreachable!("descent ended without reaching a leaf");
}

/// Converts a full leaf into a branch and relinks its bucket into the 8 new children by
/// recomputing each element's octant against this node's center.
///
/// The existing pool slots are relinked directly rather than re-traversed from the root. A child
/// receives at most the `MAX_ELEMENTS_PER_NODE` redistributed links, so none of them can
/// overflow here.
fn split(builder: &mut SnapshotBuilder, frame: &Frame, node: OctreeNode) {
    let first_child = builder.alloc_children();
    let center = frame.center();

    let mut link_index = node.first_child;
    while link_index != NIL {
        let link = builder.element_node(link_index);
        let code = octant_code(center, builder.element(link.element).position);

        let child_index = first_child + code as i32;
        let child = builder.node(child_index);
        builder.set_element_node(link_index, ElementNode::new(link.element, child.first_child));
        builder.set_node(child_index, OctreeNode::leaf(link_index, child.count + 1));

        link_index = link.next;
    }

    builder.set_node(frame.node, OctreeNode::branch(first_child));

    #[cfg(feature = "tracing")]
    tracing::trace!(
        node = frame.node,
        depth = frame.depth,
        first_child = first_child,
        "split full leaf into branch"
    );
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{OctreeSnapshot, OutOfBoundsPolicy};

    use lattice_octree_core::{Point3i, NUM_OCTANTS};

    fn builder(bounds: i32, max_depth: u8) -> SnapshotBuilder {
        SnapshotBuilder::from_snapshot(&OctreeSnapshot::new(
            Point3i::fill(bounds),
            max_depth,
            OutOfBoundsPolicy::Funnel,
        ))
    }

    fn bucket_len(b: &SnapshotBuilder, node: i32) -> i32 {
        let node = b.node(node);
        assert!(node.is_leaf());

        let mut len = 0;
        let mut link = node.first_child;
        while link != NIL {
            len += 1;
            link = b.element_node(link).next;
        }
        assert_eq!(len, node.count);

        len
    }

    #[test]
    fn root_leaf_accepts_up_to_capacity_without_splitting() {
        let mut b = builder(64, 4);
        for i in 0..MAX_ELEMENTS_PER_NODE {
            insert(&mut b, Element::new(i as u64, Point3i::fill(i)));
        }

        assert_eq!(b.node(0).count, MAX_ELEMENTS_PER_NODE);
        assert_eq!(bucket_len(&b, 0), MAX_ELEMENTS_PER_NODE);
    }

    #[test]
    fn overflowing_a_leaf_splits_and_redistributes_every_bucket_slot() {
        let mut b = builder(64, 4);
        // One element per octant of the root, then one more to force the split.
        let positions = [
            Point3i([8, 40, 8]),
            Point3i([40, 40, 8]),
            Point3i([8, 40, 40]),
            Point3i([40, 40, 40]),
            Point3i([8, 8, 8]),
            Point3i([40, 8, 8]),
            Point3i([8, 8, 40]),
            Point3i([40, 8, 40]),
        ];
        for (i, p) in positions.iter().enumerate() {
            insert(&mut b, Element::new(i as u64, *p));
        }
        insert(&mut b, Element::new(99, Point3i([9, 41, 9])));

        let root = b.node(0);
        assert!(root.is_branch());
        assert_eq!(b.nodes().len(), 1 + NUM_OCTANTS);

        // Each original element went to its own child; the ninth joined code 0.
        let counts: Vec<_> = (0..NUM_OCTANTS as u8)
            .map(|code| bucket_len(&b, root.child(code)))
            .collect();
        assert_eq!(counts, vec![2, 1, 1, 1, 1, 1, 1, 1]);
        // No new links were allocated for the redistributed elements.
        assert_eq!(b.elements().len(), 9);
    }

    #[test]
    fn identical_positions_cascade_to_the_depth_cap_and_then_grow_unbounded() {
        let mut b = builder(64, 2);
        for i in 0..12 {
            insert(&mut b, Element::new(i, Point3i::fill(10)));
        }

        // Root split and the depth-1 child split; the depth-2 leaf absorbs everything.
        assert_eq!(b.nodes().len(), 1 + 2 * NUM_OCTANTS);

        let mut frame_node = 0;
        let mut depth = 0;
        while b.node(frame_node).is_branch() {
            // (10, 10, 10) stays below every center on this path, so it always routes the same
            // way; just follow the one non-empty child.
            let branch = b.node(frame_node);
            frame_node = (0..NUM_OCTANTS as u8)
                .map(|code| branch.child(code))
                .find(|&c| b.node(c).is_branch() || b.node(c).count > 0)
                .unwrap();
            depth += 1;
        }

        assert_eq!(depth, 2);
        assert_eq!(bucket_len(&b, frame_node), 12);
    }
}
