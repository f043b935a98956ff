use crate::Point3i;

use glam::IVec3;

impl From<IVec3> for Point3i {
    #[inline]
    fn from(p: IVec3) -> Self {
        Point3i([p.x, p.y, p.z])
    }
}

impl From<Point3i> for IVec3 {
    #[inline]
    fn from(p: Point3i) -> Self {
        IVec3::new(p.x(), p.y(), p.z())
    }
}
