//! Boolean operators on polygon sets.

use tracing::debug;

use crate::{Csg, PolygonId};

/// A boolean set operation between two solids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Everything inside A or B.
    Union,
    /// Everything inside both A and B.
    Intersect,
    /// Everything inside A but not inside B.
    Subtract,
}

impl Csg {
    /// Union of the solids bounded by `a` and `b`.
    ///
    /// Both sets must be closed, outward facing surfaces made of polygons in
    /// this arena, and must not share polygon ids.
    ///
    /// An empty tree has no plane and would clip nothing, so an empty
    /// operand is resolved up front by plain set algebra in all three
    /// operators.
    pub fn union(&mut self, mut a: Vec<PolygonId>, b: Vec<PolygonId>) -> Vec<PolygonId> {
        if a.is_empty() || b.is_empty() {
            a.extend(b);
            return a;
        }
        let a = self.construct_node(a);
        let b = self.construct_node(b);
        self.clip_to(a, b);
        self.clip_to(b, a);
        self.invert(b);
        self.clip_to(b, a);
        self.invert(b);
        let rest = self.all_polygons(b);
        self.build(a, rest);
        self.all_polygons(a)
    }

    /// Part of the solid bounded by `a` that lies outside `b`.
    pub fn subtract(&mut self, a: Vec<PolygonId>, b: Vec<PolygonId>) -> Vec<PolygonId> {
        if a.is_empty() || b.is_empty() {
            return a;
        }
        let a = self.construct_node(a);
        let b = self.construct_node(b);
        self.invert(a);
        self.clip_to(a, b);
        self.clip_to(b, a);
        self.invert(b);
        self.clip_to(b, a);
        self.invert(b);
        let rest = self.all_polygons(b);
        self.build(a, rest);
        self.invert(a);
        self.all_polygons(a)
    }

    /// Part of the solid bounded by `a` that lies inside `b`.
    pub fn intersect(&mut self, a: Vec<PolygonId>, b: Vec<PolygonId>) -> Vec<PolygonId> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }
        let a = self.construct_node(a);
        let b = self.construct_node(b);
        self.invert(a);
        self.clip_to(b, a);
        self.invert(b);
        self.clip_to(a, b);
        self.clip_to(b, a);
        let rest = self.all_polygons(b);
        self.build(a, rest);
        self.invert(a);
        self.all_polygons(a)
    }

    /// Runs `op` on the two polygon sets.
    pub fn apply(&mut self, op: Operator, a: Vec<PolygonId>, b: Vec<PolygonId>) -> Vec<PolygonId> {
        let (count_a, count_b) = (a.len(), b.len());
        let result = match op {
            Operator::Union => self.union(a, b),
            Operator::Intersect => self.intersect(a, b),
            Operator::Subtract => self.subtract(a, b),
        };
        debug!(
            ?op,
            polygons_a = count_a,
            polygons_b = count_b,
            result = result.len(),
            arena_vertices = self.vertices().len(),
            arena_polygons = self.polygons().len(),
            arena_nodes = self.nodes().len(),
            "Boolean operation finished"
        );
        result
    }
}
