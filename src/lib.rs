//! A persistent (immutable-snapshot) octree spatial index for point data on 3D integer lattices.
//!
//! This library is organized into two crates:
//! - **core**: lattice point and extent data types, plus the octant arithmetic used to subdivide
//!   extents
//! - **index**: the octree itself, built from flat arena pools and immutable snapshots
//!
//! Every mutation of a [`PointOctree`](crate::index::PointOctree) produces a new tree value; the
//! previous value remains fully queryable. See the `index` crate documentation for the data
//! layout.

pub use lattice_octree_core as core;
pub use lattice_octree_index as index;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::index::prelude::*;
}
