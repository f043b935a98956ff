use core::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use num::Integer;
use std::cmp::{max, min, Ordering};

/// A 3-dimensional point with `i32` components, which is just a primitive array:
///
/// ```
/// use lattice_octree_core::Point3i;
///
/// let p = Point3i([1, 2, 3]);
/// assert_eq!(p.x() + p.y() + p.z(), 6);
/// ```
///
/// Points support componentwise addition, subtraction, scalar multiplication, and scalar and
/// componentwise division. Division is *floored*, not rounded towards zero, so that halving an
/// extent behaves the same for all signs.
///
/// There is also a partial order which says that a point A is less than a point B if and only if
/// every component of A is less than the corresponding component of B. This is what makes
/// box-containment tests read naturally:
///
/// ```
/// use lattice_octree_core::Point3i;
///
/// let min = Point3i::ZERO;
/// let least_upper_bound = Point3i::fill(3);
///
/// let p = Point3i([0, 1, 2]);
/// assert!(min <= p && p < least_upper_bound);
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(transparent)]
pub struct Point3i(pub [i32; 3]);

unsafe impl bytemuck::Zeroable for Point3i {}
unsafe impl bytemuck::Pod for Point3i {}

impl Point3i {
    /// The point of all zeros.
    pub const ZERO: Self = Point3i([0; 3]);
    /// The point of all ones.
    pub const ONES: Self = Point3i([1; 3]);

    /// Constructs the point with all components equal to `value`.
    #[inline]
    pub const fn fill(value: i32) -> Self {
        Point3i([value; 3])
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.0[0]
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.0[1]
    }

    #[inline]
    pub fn z(&self) -> i32 {
        self.0[2]
    }

    #[inline]
    pub fn x_mut(&mut self) -> &mut i32 {
        &mut self.0[0]
    }

    #[inline]
    pub fn y_mut(&mut self) -> &mut i32 {
        &mut self.0[1]
    }

    #[inline]
    pub fn z_mut(&mut self) -> &mut i32 {
        &mut self.0[2]
    }

    /// Returns the point after applying `f` component-wise.
    #[inline]
    pub fn map_components(&self, f: impl Fn(i32) -> i32) -> Self {
        Point3i([f(self.x()), f(self.y()), f(self.z())])
    }

    /// Component-wise maximum.
    #[inline]
    pub fn join(&self, other: &Self) -> Self {
        Point3i([
            max(self.x(), other.x()),
            max(self.y(), other.y()),
            max(self.z(), other.z()),
        ])
    }

    /// Component-wise minimum.
    #[inline]
    pub fn meet(&self, other: &Self) -> Self {
        Point3i([
            min(self.x(), other.x()),
            min(self.y(), other.y()),
            min(self.z(), other.z()),
        ])
    }

    #[inline]
    pub fn scalar_div_floor(&self, rhs: i32) -> Self {
        self.map_components(|c| c.div_floor(&rhs))
    }

    #[inline]
    pub fn vector_div_floor(&self, rhs: &Self) -> Self {
        Point3i([
            self.x().div_floor(&rhs.x()),
            self.y().div_floor(&rhs.y()),
            self.z().div_floor(&rhs.z()),
        ])
    }
}

impl Add for Point3i {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut sum = self;
        *sum.x_mut() += rhs.x();
        *sum.y_mut() += rhs.y();
        *sum.z_mut() += rhs.z();

        sum
    }
}

impl Sub for Point3i {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        let mut sub = self;
        *sub.x_mut() -= rhs.x();
        *sub.y_mut() -= rhs.y();
        *sub.z_mut() -= rhs.z();

        sub
    }
}

impl AddAssign for Point3i {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Point3i {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: i32) -> Self {
        self.map_components(|c| rhs * c)
    }
}

impl Mul<Point3i> for Point3i {
    type Output = Self;

    #[inline]
    fn mul(self, other: Self) -> Self {
        Point3i([
            other.x() * self.x(),
            other.y() * self.y(),
            other.z() * self.z(),
        ])
    }
}

// Specialized instead of the derivable rem-based impls because integer division rounds towards
// zero by default, which is not what we want.
impl Div<i32> for Point3i {
    type Output = Self;

    #[inline]
    fn div(self, rhs: i32) -> Self {
        self.scalar_div_floor(rhs)
    }
}

impl Div<Point3i> for Point3i {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Point3i) -> Self {
        self.vector_div_floor(&rhs)
    }
}

// This particular partial order allows us to say that an `Extent3i` e contains a `Point3i` p iff
// p is GEQ the minimum of e and p is less than the least upper bound of e.
impl PartialOrd for Point3i {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self < other {
            Some(Ordering::Less)
        } else if self > other {
            Some(Ordering::Greater)
        } else if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }

    #[inline]
    fn lt(&self, other: &Self) -> bool {
        self.x() < other.x() && self.y() < other.y() && self.z() < other.z()
    }

    #[inline]
    fn gt(&self, other: &Self) -> bool {
        self.x() > other.x() && self.y() > other.y() && self.z() > other.z()
    }

    #[inline]
    fn le(&self, other: &Self) -> bool {
        self.x() <= other.x() && self.y() <= other.y() && self.z() <= other.z()
    }

    #[inline]
    fn ge(&self, other: &Self) -> bool {
        self.x() >= other.x() && self.y() >= other.y() && self.z() >= other.z()
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
