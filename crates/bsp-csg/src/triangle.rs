//! Triangle views over indexed meshes.

use nalgebra::{Point3, Vector3};

use crate::{Aabb, Plane3D};

/// A triangle in 3D space, defined by three vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point3<f32>; 3],
}

impl Triangle {
    /// Creates a new triangle from three points.
    ///
    /// The winding order determines the normal direction via the right-hand rule:
    /// normal = (b - a) × (c - a)
    pub fn new(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns the three vertices of the triangle.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f32>; 3] {
        &self.vertices
    }

    /// Computes the (unnormalized) normal vector of the triangle.
    ///
    /// The direction follows the right-hand rule based on vertex winding.
    pub fn normal(&self) -> Vector3<f32> {
        let [a, b, c] = &self.vertices;
        (b - a).cross(&(c - a))
    }

    /// Computes the unit normal vector of the triangle.
    ///
    /// Returns `None` if the triangle is degenerate (zero area).
    pub fn unit_normal(&self) -> Option<Vector3<f32>> {
        let n = self.normal();
        let len = n.norm();
        if len > f32::EPSILON {
            Some(n / len)
        } else {
            None
        }
    }

    /// Returns `true` if the squared length of the normal is at or below
    /// `tolerance`.
    #[inline]
    pub fn is_degenerate(&self, tolerance: f32) -> bool {
        self.normal().norm_squared() <= tolerance
    }

    /// Returns the plane that this triangle lies on.
    ///
    /// Degenerate triangles give a plane with non-finite components.
    pub fn plane(&self) -> Plane3D {
        let [a, b, c] = self.vertices;
        Plane3D::from_points(a, b, c)
    }

    /// Computes the centroid (center of mass) of the triangle.
    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.coords + b.coords + c.coords) / 3.0)
    }

    /// Returns the bounding box of the triangle.
    pub fn aabb(&self) -> Aabb {
        let [a, b, c] = self.vertices;
        Aabb::from_triangle(a, b, c)
    }

    /// Signed volume of the tetrahedron spanned by the origin and the triangle.
    ///
    /// Summed over a closed, outward facing surface this gives the enclosed volume.
    pub fn signed_volume(&self) -> f32 {
        let [a, b, c] = &self.vertices;
        a.coords.dot(&b.coords.cross(&c.coords)) / 6.0
    }
}

impl From<Triangle> for Plane3D {
    fn from(triangle: Triangle) -> Self {
        triangle.plane()
    }
}

impl From<&Triangle> for Plane3D {
    fn from(triangle: &Triangle) -> Self {
        triangle.plane()
    }
}
