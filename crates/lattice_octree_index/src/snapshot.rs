use crate::element::{Element, ElementNode};
use crate::node::OctreeNode;

use lattice_octree_core::{Extent3i, Point3i};

/// How [`PointOctree::add`](crate::PointOctree::add) treats a position outside the root extent
/// `[ZERO, bounds_size)`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum OutOfBoundsPolicy {
    /// No bounds check anywhere: the point routes by comparison against each node's center and
    /// lands in an extremal leaf. Elements are never rejected, are stored at their true
    /// position, and are found by any query box containing that position.
    Funnel,
    /// The stored position is clamped componentwise into `[ZERO, bounds_size - 1]`.
    Clamp,
    /// Adding an out-of-bounds element returns the tree unchanged.
    Reject,
}

impl Default for OutOfBoundsPolicy {
    fn default() -> Self {
        OutOfBoundsPolicy::Funnel
    }
}

/// One immutable, fully self-describing version of the tree's state: the three arena pools plus
/// the fixed root bounds, maximum depth, and out-of-bounds policy.
///
/// Snapshots are only ever produced whole — either by construction of an empty tree or by
/// [`SnapshotBuilder::finalize`](crate::SnapshotBuilder::finalize) — and never mutated
/// afterwards.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct OctreeSnapshot {
    pub(crate) elements: Vec<Element>,
    pub(crate) element_nodes: Vec<ElementNode>,
    pub(crate) nodes: Vec<OctreeNode>,
    pub(crate) bounds_size: Point3i,
    pub(crate) max_depth: u8,
    pub(crate) policy: OutOfBoundsPolicy,
}

impl OctreeSnapshot {
    /// Constructs the empty snapshot: a single empty root leaf.
    ///
    /// # Panics
    ///
    /// If any component of `bounds_size` is not positive.
    pub fn new(bounds_size: Point3i, max_depth: u8, policy: OutOfBoundsPolicy) -> Self {
        assert!(
            Point3i::ZERO < bounds_size,
            "every bounds_size component must be positive, got {:?}",
            bounds_size
        );

        Self {
            elements: Vec::new(),
            element_nodes: Vec::new(),
            nodes: vec![OctreeNode::empty_leaf()],
            bounds_size,
            max_depth,
            policy,
        }
    }

    /// Every stored element, in pool order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The bucket-link pool. Slots unlinked by removal remain as unreachable garbage.
    #[inline]
    pub fn element_nodes(&self) -> &[ElementNode] {
        &self.element_nodes
    }

    /// The node pool. Index 0 is the root.
    #[inline]
    pub fn nodes(&self) -> &[OctreeNode] {
        &self.nodes
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
    pub fn policy(&self) -> OutOfBoundsPolicy {
        self.policy
    }

    /// The volume spanned by the root node.
    #[inline]
    pub fn root_extent(&self) -> Extent3i {
        Extent3i::from_min_and_shape(Point3i::ZERO, self.bounds_size)
    }

    #[inline]
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub(crate) fn node(&self, index: i32) -> OctreeNode {
        self.nodes[index as usize]
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
