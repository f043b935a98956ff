//! The core data types for the `lattice-octree` index:
//! - `Point3i`: a 3-dimensional integer point
//! - `Extent3i`: a 3-dimensional integer extent (axis-aligned box)
//! - octant arithmetic: the bit codes and child-origin derivation used to subdivide an extent
//!   into its 8 octants

pub mod extent;
pub mod octant;
pub mod point;

pub use extent::Extent3i;
pub use octant::{octant_code, octant_origin, NUM_OCTANTS};
pub use point::Point3i;

pub use num;

pub mod prelude {
    pub use super::{octant_code, octant_origin, Extent3i, Point3i, NUM_OCTANTS};
}

#[cfg(feature = "glam")]
mod glam_conversions;
