//! The bit arithmetic that names the 8 octants of a subdivided extent.
//!
//! A node's volume is never stored by the index; it is re-derived during traversal from the root
//! extent by repeatedly halving the shape and offsetting the origin. These two functions are the
//! only place that derivation lives, so insertion, splitting, removal, and search can never
//! disagree about which child a point belongs to.

use crate::{Extent3i, Point3i};

/// Every node of an octree subdivides into this many children.
pub const NUM_OCTANTS: usize = 8;

/// The 3-bit code of the child octant that `p` routes to, relative to `center`:
/// - bit 0: `p.x >= center.x`
/// - bit 1: `p.z >= center.z`
/// - bit 2: `p.y < center.y`
///
/// The Y axis is inverted so the "up" octants take the low codes; child order within a node is
/// UFL, UFR, UBL, UBR, DFL, DFR, DBL, DBR.
///
/// Note that this is a pure comparison with no bounds check: a point outside the node's volume
/// still maps to the extremal octant on each axis.
#[inline]
pub fn octant_code(center: Point3i, p: Point3i) -> u8 {
    ((p.x() >= center.x()) as u8)
        | (((p.z() >= center.z()) as u8) << 1)
        | (((p.y() < center.y()) as u8) << 2)
}

/// The minimum of the child octant `code` of a node with minimum `origin`, where `half` is the
/// child shape (the node's shape floor-halved per component).
///
/// The X and Z offsets apply when their bits are set; the Y offset applies when bit 2 is *clear*,
/// mirroring the inverted Y comparison in [`octant_code`] so that a child's volume contains the
/// in-bounds points routed to it.
#[inline]
pub fn octant_origin(origin: Point3i, half: Point3i, code: u8) -> Point3i {
    debug_assert!((code as usize) < NUM_OCTANTS);

    let x = if code & 0b001 != 0 { half.x() } else { 0 };
    let z = if code & 0b010 != 0 { half.z() } else { 0 };
    let y = if code & 0b100 == 0 { half.y() } else { 0 };

    origin + Point3i([x, y, z])
}

/// The volume of the child octant `code`, as an extent.
#[inline]
pub fn octant_extent(origin: Point3i, half: Point3i, code: u8) -> Extent3i {
    Extent3i::from_min_and_shape(octant_origin(origin, half, code), half)
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
