//! A persistent (immutable-snapshot) octree spatial index for point elements.
//!
//! The tree stores [`Element`]s (a caller-assigned id plus an integer position) and supports
//! insertion, removal by id, repositioning, and axis-aligned box queries. Every mutation returns
//! a *new* [`PointOctree`] value; the previous value remains fully queryable. This makes the
//! structure concurrency-safe by construction: any number of readers can hold and query
//! snapshots while a writer derives the next one.
//!
//! # Data layout
//!
//! There are no node objects and no pointers. A snapshot is three flat pools:
//! - the element pool, holding every stored [`Element`];
//! - the element-node pool, holding intrusive singly-linked [`ElementNode`] bucket links;
//! - the node pool, holding two-field [`OctreeNode`] records tagged leaf or branch by a
//!   sentinel count.
//!
//! A branch's 8 children are contiguous in the node pool, so a child is addressed as
//! `first_child + octant_code`. A node's volume is never stored; traversals re-derive it from
//! the root extent, the depth, and the octant chosen at each level. Leaves hold up to
//! [`MAX_ELEMENTS_PER_NODE`] elements before splitting, except at the maximum depth, where they
//! grow without bound (this is what keeps duplicate positions safe).
//!
//! # Example
//!
//! ```
//! use lattice_octree_core::Point3i;
//! use lattice_octree_index::{Element, PointOctree};
//!
//! let empty = PointOctree::new(Point3i::fill(5000), 8);
//! let tree = empty.add(Element::new(1, Point3i::fill(10)));
//!
//! let found = tree.query(Point3i::ZERO, Point3i::fill(20));
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, 1);
//!
//! // `empty` is an independent snapshot and still sees nothing.
//! assert!(empty.query(Point3i::ZERO, Point3i::fill(20)).is_empty());
//! ```

pub mod builder;
pub mod element;
pub mod node;
pub mod snapshot;
pub mod tree;

mod traverse;

pub use builder::SnapshotBuilder;
pub use element::{Element, ElementNode, NIL};
pub use node::{OctreeNode, MAX_ELEMENTS_PER_NODE};
pub use snapshot::{OctreeSnapshot, OutOfBoundsPolicy};
pub use tree::PointOctree;

pub mod prelude {
    pub use super::{Element, OctreeSnapshot, OutOfBoundsPolicy, PointOctree};
}
