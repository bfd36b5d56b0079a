//! The arena that owns every vertex, polygon, and node of a CSG run.

use crate::bsp::{Node, NodeId};
use crate::{CsgConfig, Polygon, PolygonId, Vertex, VertexId, VertexIndex};

/// Arena-backed CSG context.
///
/// Vertices, polygons, and BSP nodes are stored in flat vectors and refer to
/// each other by index. Polygons share vertices; splitting appends new
/// vertices and polygons, and nothing is ever removed, so every id stays
/// valid for the lifetime of the context.
///
/// The context is single-threaded and meant to live for one boolean
/// operation (or a short chain of them).
#[derive(Debug, Clone, Default)]
pub struct Csg {
    vertices: Vec<Vertex>,
    polygons: Vec<Polygon>,
    nodes: Vec<Node>,
    config: CsgConfig,
}

impl Csg {
    /// Creates an empty context with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty context with the given configuration.
    pub fn with_config(config: CsgConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration of this context.
    #[inline]
    pub fn config(&self) -> &CsgConfig {
        &self.config
    }

    /// Returns the tolerance used for point/plane classification.
    #[inline]
    pub fn plane_epsilon(&self) -> f32 {
        self.config.plane_epsilon()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id]
    }

    #[inline]
    pub fn polygon(&self, id: PolygonId) -> &Polygon {
        &self.polygons[id]
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Returns the vertex a corner refers to, with the normal negated when
    /// the corner is inverted.
    #[inline]
    pub fn resolve_vertex(&self, corner: VertexIndex) -> Vertex {
        let vertex = self.vertices[corner.index];
        if corner.inverted {
            vertex.flipped()
        } else {
            vertex
        }
    }

    /// Appends a vertex and returns its id.
    pub fn add_vertex(&mut self, vertex: Vertex) -> VertexId {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    /// Appends a polygon over existing vertices and returns its id.
    ///
    /// The polygon's plane is derived from its first three vertices.
    pub fn add_polygon(&mut self, corners: Vec<VertexIndex>) -> PolygonId {
        let polygon = Polygon::new(corners, &self.vertices);
        self.polygons.push(polygon);
        self.polygons.len() - 1
    }

    /// Appends an empty node and returns its id.
    pub fn add_node(&mut self) -> NodeId {
        self.nodes.push(Node::new());
        self.nodes.len() - 1
    }

    /// Flips every listed polygon in place.
    pub fn flip_polygons(&mut self, polygons: &[PolygonId]) {
        for &id in polygons {
            self.polygons[id].flip();
        }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }
}
