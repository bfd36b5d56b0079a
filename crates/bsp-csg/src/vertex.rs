//! Mesh vertices and orientation-aware references to them.

use nalgebra::{Point3, Vector2, Vector3};

use crate::math::{lerp2, lerp3};

/// Index of a vertex in the [`Csg`](crate::Csg) arena.
pub type VertexId = usize;

/// A vertex with position, normal, and texture coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>, uv: Vector2<f32>) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Vertex at `position` with zero normal and uv.
    pub fn at(position: Point3<f32>) -> Self {
        Self::new(position, Vector3::zeros(), Vector2::zeros())
    }

    /// Returns the same vertex with its normal negated.
    #[inline]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            ..*self
        }
    }

    /// Interpolates every attribute between `self` (`t = 0`) and `other` (`t = 1`).
    pub fn interpolate(&self, other: &Vertex, t: f32) -> Self {
        Self {
            position: Point3::from(lerp3(&self.position.coords, &other.position.coords, t)),
            normal: lerp3(&self.normal, &other.normal, t),
            uv: lerp2(&self.uv, &other.uv, t),
        }
    }
}

/// A polygon corner: a shared vertex plus whether its normal is read negated.
///
/// Flipping a polygon toggles `inverted` instead of touching the shared
/// vertex, so other polygons using the same vertex are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexIndex {
    pub index: VertexId,
    pub inverted: bool,
}

impl VertexIndex {
    /// A non-inverted reference to `index`.
    #[inline]
    pub fn new(index: VertexId) -> Self {
        Self {
            index,
            inverted: false,
        }
    }

    /// Returns the same reference with the orientation toggled.
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            index: self.index,
            inverted: !self.inverted,
        }
    }
}

impl From<VertexId> for VertexIndex {
    fn from(index: VertexId) -> Self {
        Self::new(index)
    }
}
