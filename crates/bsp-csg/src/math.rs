//! Small geometric kernel: interpolation, rays, and ray queries.
//!
//! These helpers back the inside/outside classification of untouched mesh
//! parts and the bounding box pre-filter. They work on single precision
//! nalgebra types like the rest of the crate.

use nalgebra::{Point3, Vector2, Vector3};

/// Dot products of a ray direction and a plane normal below this magnitude
/// are treated as parallel.
pub const UNIT_FLOAT_EPSILON: f32 = 1.0e-6;

/// Linear interpolation `a + (b - a) * t` on 2D vectors.
#[inline]
pub fn lerp2(a: &Vector2<f32>, b: &Vector2<f32>, t: f32) -> Vector2<f32> {
    a + (b - a) * t
}

/// Linear interpolation `a + (b - a) * t` on 3D vectors.
#[inline]
pub fn lerp3(a: &Vector3<f32>, b: &Vector3<f32>, t: f32) -> Vector3<f32> {
    a + (b - a) * t
}

/// A half-line starting at `origin`. The direction is not normalized, so
/// distances along the ray are measured in multiples of `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray from an origin and a direction.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray starting at `p0` and passing through `p1` at distance 1.
    pub fn from_points(p0: Point3<f32>, p1: Point3<f32>) -> Self {
        Self {
            origin: p0,
            direction: p1 - p0,
        }
    }

    /// Returns the point at parameter `t`.
    #[inline]
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }
}

/// A plane given by one of its points and an (unnormalized) normal.
///
/// Used for ray queries, where the normal length cancels out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointNormalPlane {
    pub point: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl PointNormalPlane {
    /// Plane through the triangle, normal `(p1 - p0) × (p2 - p0)`.
    pub fn from_triangle(p0: Point3<f32>, p1: Point3<f32>, p2: Point3<f32>) -> Self {
        Self {
            point: p0,
            normal: (p1 - p0).cross(&(p2 - p0)),
        }
    }
}

/// Result of a successful ray query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit. Negative values lie behind the origin.
    pub distance: f32,
    /// The hit point.
    pub point: Point3<f32>,
}

/// Barycentric coordinate of `x` in triangle `abc`, given `ax = x - a`,
/// `ab = b - a` and `ac = c - a`.
///
/// The components weight `a`, `b` and `c` in that order. A degenerate
/// triangle yields non-finite components.
pub fn barycentric_coordinate(
    ax: &Vector3<f32>,
    ab: &Vector3<f32>,
    ac: &Vector3<f32>,
) -> Vector3<f32> {
    let d00 = ab.dot(ab);
    let d01 = ab.dot(ac);
    let d11 = ac.dot(ac);
    let d20 = ax.dot(ab);
    let d21 = ax.dot(ac);
    let determinant = d00 * d11 - d01 * d01;
    let by = (d11 * d20 - d01 * d21) / determinant;
    let bz = (d00 * d21 - d01 * d20) / determinant;
    Vector3::new(1.0 - by - bz, by, bz)
}

/// Weights three 2D values by a barycentric coordinate.
pub fn interpolate_barycentric2(
    barycentric: &Vector3<f32>,
    p0: &Vector2<f32>,
    p1: &Vector2<f32>,
    p2: &Vector2<f32>,
) -> Vector2<f32> {
    p0 * barycentric.x + p1 * barycentric.y + p2 * barycentric.z
}

/// Weights three 3D values by a barycentric coordinate.
pub fn interpolate_barycentric3(
    barycentric: &Vector3<f32>,
    p0: &Vector3<f32>,
    p1: &Vector3<f32>,
    p2: &Vector3<f32>,
) -> Vector3<f32> {
    p0 * barycentric.x + p1 * barycentric.y + p2 * barycentric.z
}

/// Intersects the infinite line of `ray` with a plane.
///
/// Returns `None` when the ray runs parallel to the plane. The returned
/// distance may be negative.
pub fn intersect_ray_and_plane(ray: &Ray, plane: &PointNormalPlane) -> Option<Intersection> {
    let denominator = ray.direction.dot(&plane.normal);
    if denominator.abs() < UNIT_FLOAT_EPSILON {
        return None;
    }
    let t = (plane.point - ray.origin).dot(&plane.normal) / denominator;
    Some(Intersection {
        distance: t,
        point: ray.at(t),
    })
}

/// Intersects `ray` with triangle `p0 p1 p2`.
///
/// A hit counts when it lies within `[0, maximum_distance]` along the ray and
/// inside or on the border of the triangle.
pub fn intersect_ray_and_triangle(
    ray: &Ray,
    p0: Point3<f32>,
    p1: Point3<f32>,
    p2: Point3<f32>,
    maximum_distance: f32,
) -> Option<Intersection> {
    let plane = PointNormalPlane::from_triangle(p0, p1, p2);
    intersect_ray_and_plane(ray, &plane).filter(|hit| {
        hit.distance >= 0.0
            && hit.distance <= maximum_distance
            && is_point_in_or_on_triangle(hit.point, p0, p1, p2)
    })
}

/// Slab test of the infinite line through `ray` against a box.
///
/// Both directions of the line are considered.
pub fn ray_intersects_box(ray: &Ray, min: &Point3<f32>, max: &Point3<f32>) -> bool {
    let slab = |axis: usize| {
        let t0 = (min[axis] - ray.origin[axis]) / ray.direction[axis];
        let t1 = (max[axis] - ray.origin[axis]) / ray.direction[axis];
        if t0 > t1 { (t1, t0) } else { (t0, t1) }
    };

    let (mut t_min, mut t_max) = slab(0);

    let (ty_min, ty_max) = slab(1);
    if t_min > ty_max || ty_min > t_max {
        return false;
    }
    if ty_min > t_min {
        t_min = ty_min;
    }
    if ty_max < t_max {
        t_max = ty_max;
    }

    let (tz_min, tz_max) = slab(2);
    !(t_min > tz_max || tz_min > t_max)
}

/// Returns `true` if `px` lies on the same side of line `ab` as `p0`, or on
/// the line itself.
#[inline]
pub fn is_point_on_same_side(
    px: Point3<f32>,
    p0: Point3<f32>,
    a: Point3<f32>,
    b: Point3<f32>,
) -> bool {
    let edge = b - a;
    let cp1 = edge.cross(&(px - a));
    let cp2 = edge.cross(&(p0 - a));
    cp1.dot(&cp2) >= 0.0
}

/// Returns `true` if `px` (assumed in the triangle's plane) lies inside the
/// triangle or on its border.
pub fn is_point_in_or_on_triangle(
    px: Point3<f32>,
    p0: Point3<f32>,
    p1: Point3<f32>,
    p2: Point3<f32>,
) -> bool {
    is_point_on_same_side(px, p0, p1, p2)
        && is_point_on_same_side(px, p1, p2, p0)
        && is_point_on_same_side(px, p2, p0, p1)
}
