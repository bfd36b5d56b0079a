//! Arena-backed BSP trees and the boolean operators built on them.
//!
//! All geometry of one CSG run lives in a [`Csg`] arena. Trees are built
//! over polygon ids, and clipping one tree against another removes the
//! parts of its polygons that lie inside the other solid. The three boolean
//! operators are fixed sequences of these steps.
//!
//! # Example
//!
//! ```
//! use bsp_csg::{Csg, Operator, PolygonId, Vertex, VertexIndex};
//! use nalgebra::Point3;
//!
//! // outward facing tetrahedron with its right-angle corner at `at`
//! fn tetrahedron(csg: &mut Csg, at: [f32; 3]) -> Vec<PolygonId> {
//!     let [x, y, z] = at;
//!     let corners = [[x, y, z], [x + 1.0, y, z], [x, y + 1.0, z], [x, y, z + 1.0]]
//!         .map(|[x, y, z]| csg.add_vertex(Vertex::at(Point3::new(x, y, z))));
//!     [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]]
//!         .iter()
//!         .map(|face| csg.add_polygon(face.iter().map(|&i| VertexIndex::new(corners[i])).collect()))
//!         .collect()
//! }
//!
//! let mut csg = Csg::new();
//! let a = tetrahedron(&mut csg, [0.0, 0.0, 0.0]);
//! let b = tetrahedron(&mut csg, [5.0, 5.0, 5.0]);
//!
//! // b is far away, so a survives whole
//! let result = csg.apply(Operator::Subtract, a, b);
//! assert_eq!(result.len(), 4);
//! assert!(result.iter().all(|&id| csg.polygon(id).len() == 3));
//! ```
//!
//! # Architecture
//!
//! - [`Csg`]: owns vertices, polygons, and nodes; hands out integer ids
//! - [`Node`]: splitting plane, coplanar polygon ids, and child node ids
//! - [`Split`]: outcome of cutting one polygon by a plane
//! - [`Operator`]: union, intersection, or subtraction

mod arena;
mod node;
mod ops;
mod split;
mod tree;

pub use arena::Csg;
pub use node::{Node, NodeId};
pub use ops::Operator;
pub use split::Split;
