//! Convex polygons referencing shared arena vertices.

use nalgebra::{Point3, Vector3};

use crate::{Classification, Plane3D, Vertex, VertexIndex};

/// Index of a polygon in the [`Csg`](crate::Csg) arena.
pub type PolygonId = usize;

/// A convex, planar polygon.
///
/// Vertices are stored as [`VertexIndex`] references into the owning arena
/// and are in counter-clockwise winding order when viewed from the front.
/// The plane is computed once from the first three vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<VertexIndex>,
    plane: Plane3D,
}

impl Polygon {
    /// Creates a new polygon from vertex references, resolving positions
    /// through `arena`.
    ///
    /// # Panics (debug builds only)
    /// Panics if fewer than 3 vertices are provided.
    pub fn new(vertices: Vec<VertexIndex>, arena: &[Vertex]) -> Self {
        debug_assert!(
            vertices.len() >= 3,
            "Polygon must have at least 3 vertices"
        );
        let plane = Plane3D::from_points(
            arena[vertices[0].index].position,
            arena[vertices[1].index].position,
            arena[vertices[2].index].position,
        );
        Self { vertices, plane }
    }

    /// Returns the vertex references of the polygon.
    #[inline]
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    /// Returns the plane the polygon lies on.
    #[inline]
    pub fn plane(&self) -> &Plane3D {
        &self.plane
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the polygon has no vertices (always false for valid polygons).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Reverses the winding, toggles every vertex orientation, and turns the
    /// plane around.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for vertex in &mut self.vertices {
            *vertex = vertex.flipped();
        }
        self.plane.flip();
    }

    /// Classifies this polygon relative to a plane by OR-ing the side of
    /// every vertex.
    pub fn classify(&self, plane: &Plane3D, arena: &[Vertex], epsilon: f32) -> Classification {
        self.vertices
            .iter()
            .fold(Classification::Coplanar, |acc, vertex| {
                acc | plane.classify_point(arena[vertex.index].position, epsilon)
            })
    }

    /// Computes the centroid (mean of the vertex positions).
    pub fn centroid(&self, arena: &[Vertex]) -> Point3<f32> {
        let sum: Vector3<f32> = self
            .vertices
            .iter()
            .map(|v| arena[v.index].position.coords)
            .sum();
        Point3::from(sum / self.vertices.len() as f32)
    }

    /// Area of the polygon, summed over its triangle fan.
    pub fn area(&self, arena: &[Vertex]) -> f32 {
        let origin = arena[self.vertices[0].index].position;
        self.vertices[1..]
            .windows(2)
            .map(|pair| {
                let b = arena[pair[0].index].position;
                let c = arena[pair[1].index].position;
                (b - origin).cross(&(c - origin)).norm() * 0.5
            })
            .sum()
    }
}
