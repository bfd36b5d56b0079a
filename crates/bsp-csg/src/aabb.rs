//! Axis-aligned bounding boxes.

use nalgebra::Point3;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// A box containing only `point`.
    pub fn from_point(point: Point3<f32>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing all `points`, or `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::from_point(first), |mut aabb, point| {
            aabb.extend(point);
            aabb
        }))
    }

    /// Smallest box containing the triangle.
    pub fn from_triangle(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let mut aabb = Self::from_point(a);
        aabb.extend(b);
        aabb.extend(c);
        aabb
    }

    /// Grows the box to include `point`.
    pub fn extend(&mut self, point: Point3<f32>) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Returns the center of the box.
    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns `true` if the boxes overlap once each is grown by `epsilon`
    /// on every side.
    pub fn overlaps(&self, other: &Aabb, epsilon: f32) -> bool {
        (0..3).all(|axis| {
            self.min[axis] - epsilon <= other.max[axis] + epsilon
                && other.min[axis] - epsilon <= self.max[axis] + epsilon
        })
    }
}
