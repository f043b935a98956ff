//! The traversal engine: iterative insert, remove, and search over a snapshot's pools.
//!
//! All three algorithms walk with an explicit stack of [`Frame`]s instead of recursion, so the
//! call-stack depth stays constant no matter how deep the tree is configured.

pub(crate) mod insert;
pub(crate) mod remove;
pub(crate) mod search;

use lattice_octree_core::{octant_origin, Extent3i, Point3i};

/// The node pool index of the root.
pub(crate) const ROOT_NODE: i32 = 0;

/// One level of an iterative descent. Node volumes are implicit: each frame derives its origin
/// and shape from its parent's, starting at the root extent.
///
/// A frame also carries the node's *routing region*: the inclusive per-axis interval of
/// positions whose comparisons against the centers on this path select this node. The geometric
/// box `[origin, origin + size)` under-covers that region — floor-halved shapes lose a point to
/// the upper interval at every odd-sized level, and positions outside the root bounds route to
/// extremal children with no box at all — so pruning must use the region, not the box.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub node: i32,
    pub origin: Point3i,
    pub size: Point3i,
    pub depth: u8,
    pub region_min: Point3i,
    pub region_max: Point3i,
}

impl Frame {
    #[inline]
    pub fn root(bounds_size: Point3i) -> Self {
        Self {
            node: ROOT_NODE,
            origin: Point3i::ZERO,
            size: bounds_size,
            depth: 0,
            // Every position routes somewhere, so the root's region is unbounded.
            region_min: Point3i::fill(i32::MIN),
            region_max: Point3i::fill(i32::MAX),
        }
    }

    /// The shape of this node's children, floor-halved per component.
    #[inline]
    pub fn half(&self) -> Point3i {
        self.size / 2
    }

    #[inline]
    pub fn center(&self) -> Point3i {
        self.origin + self.half()
    }

    /// The frame for the child with octant code `code` of a branch whose children start at
    /// `first_child`.
    ///
    /// The child's routing region splits the parent's at the center on each axis, with the same
    /// bit tests as [`octant_code`](lattice_octree_core::octant_code): a set X/Z bit takes
    /// `[center, parent_max]`, and the Y split is flipped because a set bit 2 means `y < center`.
    #[inline]
    pub fn child(&self, first_child: i32, code: u8) -> Self {
        let half = self.half();
        let center = self.center();

        let mut region_min = self.region_min;
        let mut region_max = self.region_max;
        if code & 0b001 != 0 {
            *region_min.x_mut() = center.x();
        } else {
            *region_max.x_mut() = center.x() - 1;
        }
        if code & 0b010 != 0 {
            *region_min.z_mut() = center.z();
        } else {
            *region_max.z_mut() = center.z() - 1;
        }
        if code & 0b100 == 0 {
            *region_min.y_mut() = center.y();
        } else {
            *region_max.y_mut() = center.y() - 1;
        }

        Self {
            node: first_child + code as i32,
            origin: octant_origin(self.origin, half, code),
            size: half,
            depth: self.depth + 1,
            region_min,
            region_max,
        }
    }

    /// Returns `true` iff some position in this node's routing region lies in `query`, i.e. the
    /// subtree could hold a match and must not be pruned.
    #[inline]
    pub fn region_intersects(&self, query: &Extent3i) -> bool {
        self.region_min <= query.max() && query.minimum <= self.region_max
    }
}
