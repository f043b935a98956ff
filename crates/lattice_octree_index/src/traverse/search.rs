use super::Frame;
use crate::element::{Element, NIL};
use crate::snapshot::OctreeSnapshot;

use lattice_octree_core::{Extent3i, NUM_OCTANTS};

/// Collects every element whose position lies in `query`, by depth-first descent with subtree
/// pruning on node routing regions.
///
/// Pruning on the region rather than the node's geometric box keeps every stored position
/// reachable, including positions outside the root bounds: any box containing a stored position
/// intersects the routing regions along that element's whole insertion path.
///
/// Children are pushed in reverse code order so octants pop in ascending order; result ordering
/// is a determinism nicety, not a contract. The returned sequence fully reflects `snapshot` at
/// call time — later snapshots cannot disturb it.
pub(crate) fn search(snapshot: &OctreeSnapshot, query: &Extent3i) -> Vec<Element> {
    let mut results = Vec::new();

    let mut stack = vec![Frame::root(snapshot.bounds_size())];
    while let Some(frame) = stack.pop() {
        if !frame.region_intersects(query) {
            continue;
        }

        let node = snapshot.node(frame.node);

        if node.is_branch() {
            for code in (0..NUM_OCTANTS as u8).rev() {
                stack.push(frame.child(node.first_child, code));
            }
            continue;
        }

        // Leaf: the final per-element filter against the query box.
        let mut link_index = node.first_child;
        while link_index != NIL {
            let link = snapshot.element_nodes[link_index as usize];
            let element = snapshot.elements[link.element as usize];
            if query.contains(element.position) {
                results.push(element);
            }
            link_index = link.next;
        }
    }

    results
}
