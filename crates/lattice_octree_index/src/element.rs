use lattice_octree_core::Point3i;

/// The sentinel pool index meaning "no entry": the end of a bucket list or an empty bucket head.
pub const NIL: i32 = -1;

/// A point element stored by the octree.
///
/// The `id` is caller-assigned and used as the key for removal and repositioning. The structure
/// does not require ids to be unique; removal takes the lowest-indexed match. The position is
/// immutable once stored — repositioning is modeled as remove-then-insert.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Element {
    pub id: u64,
    pub position: Point3i,
}

impl Element {
    #[inline]
    pub fn new(id: u64, position: Point3i) -> Self {
        Self { id, position }
    }
}

/// One link in a leaf's intrusive singly-linked bucket list.
///
/// `element` indexes the element pool (it is *not* an id); `next` indexes the element-node pool,
/// or [`NIL`] at the end of the list. Links are head-inserted, and each link belongs to exactly
/// one leaf's list at a time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ElementNode {
    pub element: i32,
    pub next: i32,
}

impl ElementNode {
    #[inline]
    pub fn new(element: i32, next: i32) -> Self {
        Self { element, next }
    }
}
