use crate::element::{Element, ElementNode};
use crate::node::OctreeNode;
use crate::snapshot::{OctreeSnapshot, OutOfBoundsPolicy};

use lattice_octree_core::{Point3i, NUM_OCTANTS};

/// A mutable staging copy of a snapshot's pools.
///
/// Mutations never touch a live [`OctreeSnapshot`]; they clone its pools into a builder, edit the
/// copies in place, and [`finalize`](Self::finalize) the result into the next snapshot. The
/// builder is the only type in this crate allowed to mutate pool contents.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder {
    elements: Vec<Element>,
    element_nodes: Vec<ElementNode>,
    nodes: Vec<OctreeNode>,
    bounds_size: Point3i,
    max_depth: u8,
    policy: OutOfBoundsPolicy,
}

impl SnapshotBuilder {
    pub fn from_snapshot(snapshot: &OctreeSnapshot) -> Self {
        Self {
            elements: snapshot.elements.clone(),
            element_nodes: snapshot.element_nodes.clone(),
            nodes: snapshot.nodes.clone(),
            bounds_size: snapshot.bounds_size,
            max_depth: snapshot.max_depth,
            policy: snapshot.policy,
        }
    }

    #[inline]
    pub fn bounds_size(&self) -> Point3i {
        self.bounds_size
    }

    #[inline]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[inline]
    pub fn element(&self, index: i32) -> Element {
        self.elements[index as usize]
    }

    #[inline]
    pub fn element_node(&self, index: i32) -> ElementNode {
        self.element_nodes[index as usize]
    }

    #[inline]
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
    }

    #[inline]
    pub fn node(&self, index: i32) -> OctreeNode {
        self.nodes[index as usize]
    }

    #[inline]
    pub fn set_node(&mut self, index: i32, node: OctreeNode) {
        self.nodes[index as usize] = node;
    }

    #[inline]
    pub fn set_element_node(&mut self, index: i32, link: ElementNode) {
        self.element_nodes[index as usize] = link;
    }

    /// Appends an element and returns its pool index.
    #[inline]
    pub fn push_element(&mut self, element: Element) -> i32 {
        self.elements.push(element);

        self.elements.len() as i32 - 1
    }

    /// Appends a bucket link and returns its pool index.
    #[inline]
    pub fn push_element_node(&mut self, link: ElementNode) -> i32 {
        self.element_nodes.push(link);

        self.element_nodes.len() as i32 - 1
    }

    /// Appends 8 contiguous empty leaves and returns the index of the first, for use as a
    /// branch's `first_child`.
    pub fn alloc_children(&mut self) -> i32 {
        let first_child = self.nodes.len() as i32;
        for _ in 0..NUM_OCTANTS {
            self.nodes.push(OctreeNode::empty_leaf());
        }

        first_child
    }

    /// Rebuilds the element pool without the slot `removed` and renumbers every bucket link that
    /// referenced a later slot. This is the one place pool indices are ever renumbered, and the
    /// dominant cost of removal.
    pub fn compact_element(&mut self, removed: i32) {
        self.elements.remove(removed as usize);

        for link in self.element_nodes.iter_mut() {
            if link.element > removed {
                link.element -= 1;
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            removed = removed,
            remaining = self.elements.len(),
            "compacted element pool"
        );
    }

    pub fn finalize(self) -> OctreeSnapshot {
        OctreeSnapshot {
            elements: self.elements,
            element_nodes: self.element_nodes,
            nodes: self.nodes,
            bounds_size: self.bounds_size,
            max_depth: self.max_depth,
            policy: self.policy,
        }
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
