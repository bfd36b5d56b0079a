//! BSP tree node stored in the [`Csg`](crate::Csg) arena.

use crate::{Plane3D, PolygonId};

/// Index of a node in the [`Csg`](crate::Csg) arena.
pub type NodeId = usize;

/// A node in a BSP tree.
///
/// Each node partitions space using a splitting plane and stores the
/// polygons that are coplanar with that plane, whichever way they face.
/// Polygons on the front or back of the plane live in the respective
/// child subtrees.
///
/// A node without a plane is empty: it was created for a batch of polygons
/// that turned out to be empty, or has not been built yet. It adopts the
/// plane of the first polygon it receives.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// The splitting plane for this node.
    plane: Option<Plane3D>,

    /// Subtree in FRONT of the splitting plane.
    front: Option<NodeId>,

    /// Subtree BEHIND the splitting plane.
    back: Option<NodeId>,

    /// Polygons coplanar with the plane.
    polygons: Vec<PolygonId>,
}

impl Node {
    /// Creates an empty node with no plane, children, or polygons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the splitting plane, if the node has one.
    #[inline]
    pub fn plane(&self) -> Option<&Plane3D> {
        self.plane.as_ref()
    }

    /// Returns the front child.
    #[inline]
    pub fn front(&self) -> Option<NodeId> {
        self.front
    }

    /// Returns the back child.
    #[inline]
    pub fn back(&self) -> Option<NodeId> {
        self.back
    }

    /// Returns the polygons stored at this node.
    #[inline]
    pub fn polygons(&self) -> &[PolygonId] {
        &self.polygons
    }

    /// Returns `true` if the node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.front.is_none() && self.back.is_none()
    }

    #[inline]
    pub(crate) fn set_plane(&mut self, plane: Plane3D) {
        self.plane = Some(plane);
    }

    #[inline]
    pub(crate) fn set_front(&mut self, node: NodeId) {
        self.front = Some(node);
    }

    #[inline]
    pub(crate) fn set_back(&mut self, node: NodeId) {
        self.back = Some(node);
    }

    #[inline]
    pub(crate) fn push_polygon(&mut self, polygon: PolygonId) {
        self.polygons.push(polygon);
    }

    /// Moves the polygon list out, leaving the node without polygons.
    #[inline]
    pub(crate) fn take_polygons(&mut self) -> Vec<PolygonId> {
        std::mem::take(&mut self.polygons)
    }

    #[inline]
    pub(crate) fn set_polygons(&mut self, polygons: Vec<PolygonId>) {
        self.polygons = polygons;
    }

    /// Turns the plane around and swaps the subtrees.
    pub(crate) fn invert(&mut self) {
        if let Some(plane) = self.plane.as_mut() {
            plane.flip();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }
}
