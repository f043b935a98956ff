use super::Frame;
use crate::builder::SnapshotBuilder;
use crate::element::{ElementNode, NIL};
use crate::node::OctreeNode;

use lattice_octree_core::octant_code;

/// Unlinks the lowest-indexed element whose id is `id` and compacts the element pool. Returns
/// `false` (leaving the builder unchanged except for the failed scan) when no element has that
/// id, or when the bucket the element's position routes to does not reference it.
///
/// The leaf is found by re-deriving the element's insertion path from its stored position, with
/// the same octant codes insertion used, so the path is deterministic. Tree nodes are never
/// reclaimed: an emptied leaf just keeps `count == 0`.
pub(crate) fn remove(builder: &mut SnapshotBuilder, id: u64) -> bool {
    let element_index = match builder.elements().iter().position(|e| e.id == id) {
        Some(i) => i as i32,
        None => return false,
    };
    let position = builder.element(element_index).position;

    // Descend to the leaf this element lives in.
    let mut frame = Frame::root(builder.bounds_size());
    let mut node = builder.node(frame.node);
    while node.is_branch() {
        let code = octant_code(frame.center(), position);
        frame = frame.child(node.first_child, code);
        node = builder.node(frame.node);
    }

    // Unlink the bucket entry: patch the head or the predecessor's `next`.
    let mut link_index = node.first_child;
    let mut prev_index = NIL;
    while link_index != NIL {
        let link = builder.element_node(link_index);

        if link.element == element_index {
            if prev_index == NIL {
                builder.set_node(frame.node, OctreeNode::leaf(link.next, node.count - 1));
            } else {
                let prev = builder.element_node(prev_index);
                builder.set_element_node(prev_index, ElementNode::new(prev.element, link.next));
                builder.set_node(frame.node, OctreeNode::leaf(node.first_child, node.count - 1));
            }
            builder.compact_element(element_index);

            return true;
        }

        prev_index = link_index;
        link_index = link.next;
    }

    // The pool has the id but no bucket references the slot; treat as not-removed.
    false
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
