use crate::Point3i;

use core::ops::Range;
use itertools::{iproduct, ConsTuples, Product};

/// A 3-dimensional integer extent. This is mathematically the Cartesian product of a half-closed
/// interval `[a, b)` in each dimension. You can also just think of it as an axis-aligned box with
/// some shape and a minimum point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Extent3i {
    /// The least point contained in the extent.
    pub minimum: Point3i,
    /// The length of each dimension.
    pub shape: Point3i,
}

impl Extent3i {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: Point3i, shape: Point3i) -> Self {
        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: Point3i, least_upper_bound: Point3i) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(&Point3i::ZERO);

        Self { minimum, shape }
    }

    /// An alternative representation of an extent as the minimum point and maximum point. There is
    /// a unique maximum point because the components are integers.
    #[inline]
    pub fn from_min_and_max(minimum: Point3i, max: Point3i) -> Self {
        Self::from_min_and_lub(minimum, max + Point3i::ONES)
    }

    /// Constructs the unique extent with both `p1` and `p2` as corners.
    #[inline]
    pub fn from_corners(p1: Point3i, p2: Point3i) -> Self {
        let min = p1.meet(&p2);
        let max = p1.join(&p2);

        Self::from_min_and_max(min, max)
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> Point3i {
        self.minimum + self.shape
    }

    /// The unique greatest point in the extent.
    #[inline]
    pub fn max(&self) -> Point3i {
        self.least_upper_bound() - Point3i::ONES
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: Point3i) -> bool {
        self.minimum <= p && p < self.least_upper_bound()
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(&other.minimum);
        let lub = self
            .least_upper_bound()
            .meet(&other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    #[inline]
    pub fn volume(&self) -> i64 {
        self.shape.x() as i64 * self.shape.y() as i64 * self.shape.z() as i64
    }

    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.volume() as usize
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Iterate over all points in the extent, in row-major order.
    /// ```
    /// # use lattice_octree_core::prelude::*;
    /// #
    /// let extent = Extent3i::from_min_and_shape(Point3i::ZERO, Point3i([2, 2, 1]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![
    ///     Point3i([0, 0, 0]), Point3i([1, 0, 0]), Point3i([0, 1, 0]), Point3i([1, 1, 0])
    /// ]);
    /// ```
    #[inline]
    pub fn iter_points(&self) -> Extent3iPointIter {
        let lub = self.least_upper_bound();

        Extent3iPointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(
                self.minimum.z()..lub.z(),
                self.minimum.y()..lub.y(),
                self.minimum.x()..lub.x()
            ),
        }
    }
}

type RangeProduct2 = Product<Range<i32>, Range<i32>>;
type RangeProduct3 = Product<RangeProduct2, Range<i32>>;

/// An iterator over all points in an `Extent3i`.
pub struct Extent3iPointIter {
    product_iter: ConsTuples<RangeProduct3, ((i32, i32), i32)>,
}

impl Iterator for Extent3iPointIter {
    type Item = Point3i;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(z, y, x)| Point3i([x, y, z]))
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
