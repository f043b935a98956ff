use crate::element::NIL;

/// The number of elements a leaf holds before it splits. Leaves at the maximum depth ignore this
/// cap and grow without bound.
pub const MAX_ELEMENTS_PER_NODE: i32 = 8;

/// `count` takes this value iff the node is a branch.
const BRANCH_SENTINEL: i32 = -1;

/// One node of the octree, tagged leaf or branch by a sentinel count.
///
/// - Branch: `count == -1` and `first_child` indexes the first of exactly 8 contiguous children
///   in the node pool. We don't need to store an array of children; child `c` lives at
///   `first_child + c`, where `c` is an octant code (see
///   [`octant_code`](lattice_octree_core::octant_code) for the ordering).
/// - Leaf: `count >= 0` is the bucket length and `first_child` is the head index into the
///   element-node pool, or [`NIL`] when the bucket is empty.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct OctreeNode {
    pub first_child: i32,
    pub count: i32,
}

impl OctreeNode {
    /// A leaf with an empty bucket.
    #[inline]
    pub fn empty_leaf() -> Self {
        Self {
            first_child: NIL,
            count: 0,
        }
    }

    /// A leaf whose bucket list starts at `head` and holds `count` links.
    #[inline]
    pub fn leaf(head: i32, count: i32) -> Self {
        debug_assert!(count >= 0);

        Self {
            first_child: head,
            count,
        }
    }

    /// A branch whose 8 children start at `first_child`.
    #[inline]
    pub fn branch(first_child: i32) -> Self {
        Self {
            first_child,
            count: BRANCH_SENTINEL,
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.count != BRANCH_SENTINEL
    }

    #[inline]
    pub fn is_branch(&self) -> bool {
        self.count == BRANCH_SENTINEL
    }

    /// The node-pool index of the child with octant code `code`.
    #[inline]
    pub fn child(&self, code: u8) -> i32 {
        debug_assert!(self.is_branch());

        self.first_child + code as i32
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
