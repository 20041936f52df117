//! A trait for any shape which can be represented by triangles

use crate::extrude::{Solid, Triangle};
use crate::float_types::Real;
use nalgebra::Vector3;

/// A triangulated 3D surface.
///
/// Anything that can present itself as a bunch of triangles in 3D
/// can automatically use all the triangle-based IO backends.
pub trait Triangulated3D {
    /// Call `f` for each triangle, in emission order.
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut(&Triangle);
}

impl Triangulated3D for Solid {
    fn visit_triangles<F>(&self, f: F)
    where
        F: FnMut(&Triangle),
    {
        self.triangles.iter().for_each(f);
    }
}

/// Unit normal from the winding of `tri`, or zero for a degenerate triangle.
pub fn facet_normal(tri: &Triangle) -> Vector3<Real> {
    let n = (tri[1] - tri[0]).cross(&(tri[2] - tri[0]));
    n.try_normalize(Real::EPSILON).unwrap_or_else(Vector3::zeros)
}
