//! Constructive solid geometry on indexed triangle meshes using BSP trees.
//!
//! Meshes go in as flat buffers ([`MeshData`]), are turned into polygons in
//! a [`Csg`] arena, combined with [`Operator::Union`],
//! [`Operator::Intersect`], or [`Operator::Subtract`], and come back out
//! triangulated ([`MeshBuffers`]). [`filtered_mesh_operation`] restricts the
//! BSP work to the triangles near the intersection.
//!
//! ```
//! use bsp_csg::{CsgConfig, MeshData, Operator, mesh_operation};
//!
//! let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
//! let indices = [0, 2, 1, 0, 1, 3, 0, 3, 2, 1, 2, 3];
//! let tetrahedron = MeshData::new(&positions, &indices).unwrap();
//!
//! let config = CsgConfig::default();
//! let result = mesh_operation(Operator::Union, &tetrahedron, &tetrahedron, &config);
//! assert!(!result.is_empty());
//! ```

mod aabb;
pub mod bsp;
mod config;
mod error;
mod filter;
pub mod math;
mod mesh;
mod plane;
mod polygon;
mod stitch;
mod triangle;
mod vertex;
mod weld;

pub use aabb::Aabb;
pub use bsp::{Csg, Node, NodeId, Operator, Split};
pub use config::CsgConfig;
pub use error::{MeshError, MeshResult};
pub use filter::find_intersecting;
pub use mesh::{
    MeshBuffers, MeshData, mesh_operation, polygons_from_mesh, polygons_from_triangles,
    polygons_to_mesh,
};
pub use plane::{Classification, PLANE_EPSILON, Plane3D, PlaneSide};
pub use polygon::{Polygon, PolygonId};
pub use stitch::{contains_point, filtered_mesh_operation, mesh_operation_partial};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexId, VertexIndex};
pub use weld::UniqueIndices;
