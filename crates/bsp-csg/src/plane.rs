//! Plane representation and point classification for BSP trees.

use std::ops::BitOr;

use nalgebra::{Point3, Vector3};

/// Default epsilon for plane classification.
/// Points within this distance of the plane are considered "on" the plane.
pub const PLANE_EPSILON: f32 = 1e-5;

/// Which side of a plane a point lies on.
///
/// The discriminants are bit flags: OR-ing the sides of all vertices of a
/// polygon yields its [`Classification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PlaneSide {
    /// Point lies on the plane (within epsilon tolerance)
    Coplanar = 0,
    /// Point is in front of the plane (positive side of normal)
    Front = 1,
    /// Point is behind the plane (negative side of normal)
    Back = 2,
}

/// Classification of a polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Classification {
    /// All vertices are on the plane
    #[default]
    Coplanar = 0,
    /// No vertex is behind the plane, at least one is in front
    Front = 1,
    /// No vertex is in front of the plane, at least one is behind
    Back = 2,
    /// Vertices are on both sides
    Spanning = 3,
}

impl BitOr<PlaneSide> for Classification {
    type Output = Classification;

    fn bitor(self, side: PlaneSide) -> Classification {
        match self as u8 | side as u8 {
            0 => Classification::Coplanar,
            1 => Classification::Front,
            2 => Classification::Back,
            _ => Classification::Spanning,
        }
    }
}

impl From<PlaneSide> for Classification {
    fn from(side: PlaneSide) -> Self {
        Classification::Coplanar | side
    }
}

/// A plane in 3D space, represented as `normal · point = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3D {
    normal: Vector3<f32>,
    w: f32,
}

impl Plane3D {
    /// Creates a new plane from a normal vector and offset.
    /// Both are scaled so that the normal has unit length.
    ///
    /// A zero normal produces a plane with non-finite components.
    pub fn new(normal: Vector3<f32>, w: f32) -> Self {
        let norm = normal.norm();
        Self {
            normal: normal / norm,
            w: w / norm,
        }
    }

    /// Creates a plane from a point on the plane and a normal vector.
    /// The normal will be normalized automatically.
    pub fn from_point_and_normal(point: Point3<f32>, normal: Vector3<f32>) -> Self {
        let unit_normal = normal.normalize();
        Self {
            normal: unit_normal,
            w: unit_normal.dot(&point.coords),
        }
    }

    /// Creates a plane from three points.
    /// The normal direction follows the right-hand rule: `(b - a) × (c - a)`.
    ///
    /// Collinear points give a plane with non-finite components. Callers
    /// filter degenerate input before it reaches this point.
    pub fn from_points(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        Self::from_point_and_normal(a, (b - a).cross(&(c - a)))
    }

    /// Returns the unit normal vector of the plane.
    #[inline]
    pub fn normal(&self) -> Vector3<f32> {
        self.normal
    }

    /// Returns the signed distance from the origin to the plane along the normal.
    #[inline]
    pub fn w(&self) -> f32 {
        self.w
    }

    /// Computes the signed distance from a point to the plane.
    /// - Positive: point is in front (same side as normal)
    /// - Negative: point is behind (opposite side from normal)
    /// - Zero: point is on the plane
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.dot(&point.coords) - self.w
    }

    /// Classifies which side of the plane a point lies on.
    pub fn classify_point(&self, point: Point3<f32>, epsilon: f32) -> PlaneSide {
        let dist = self.signed_distance(point);
        if dist > epsilon {
            PlaneSide::Front
        } else if dist < -epsilon {
            PlaneSide::Back
        } else {
            PlaneSide::Coplanar
        }
    }

    /// Turns the plane around in place.
    #[inline]
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.w = -self.w;
    }

    /// Returns a new plane with the normal flipped (facing the opposite direction).
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            w: -self.w,
        }
    }

    /// Returns `true` if both planes face the same half-space.
    #[inline]
    pub fn faces_same_direction(&self, other: &Plane3D) -> bool {
        self.normal.dot(&other.normal) > 0.0
    }

    /// Parameter `t` at which the segment `start → end` crosses the plane.
    ///
    /// The denominator is not guarded. Callers only ask for edges whose
    /// endpoints were classified on opposite sides, where it is non-zero
    /// for any plane with a finite normal.
    #[inline]
    pub fn edge_parameter(&self, start: Point3<f32>, end: Point3<f32>) -> f32 {
        (self.w - self.normal.dot(&start.coords)) / self.normal.dot(&(end - start))
    }
}
