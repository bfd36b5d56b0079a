//! Error types for mesh validation.

use thiserror::Error;

/// Errors raised when borrowed mesh buffers are malformed.
///
/// The boolean engine itself never fails: degenerate geometry is dropped and
/// empty input yields empty output. Only the buffer boundary is checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// Position buffer is not a whole number of `xyz` triples.
    #[error("position buffer length {len} is not a multiple of 3")]
    PositionLength {
        /// Number of floats in the buffer.
        len: usize,
    },

    /// Normal buffer does not match the position buffer.
    #[error("normal buffer has {actual} floats, expected {expected}")]
    NormalLength {
        /// Floats required by the vertex count.
        expected: usize,
        /// Floats supplied.
        actual: usize,
    },

    /// UV buffer does not match the vertex count.
    #[error("uv buffer has {actual} floats, expected {expected}")]
    UvLength {
        /// Floats required by the vertex count.
        expected: usize,
        /// Floats supplied.
        actual: usize,
    },

    /// Index buffer is not a whole number of faces.
    #[error("index buffer length {len} is not a multiple of the face size {arity}")]
    IndexLength {
        /// Number of indices in the buffer.
        len: usize,
        /// Vertices per face.
        arity: usize,
    },

    /// Face size not usable here: faces need at least three corners, and
    /// triangle queries need exactly three.
    #[error("unsupported face size {arity}")]
    FaceArity {
        /// Vertices per face.
        arity: usize,
    },

    /// An index points past the end of the vertex buffer.
    #[error("vertex index {index} out of range for {vertex_count} vertices")]
    VertexIndex {
        /// Offending index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// A candidate triangle does not exist in the mesh.
    #[error("triangle {index} out of range for {triangle_count} triangles")]
    TriangleIndex {
        /// Offending triangle index.
        index: u32,
        /// Number of triangles in the mesh.
        triangle_count: usize,
    },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
