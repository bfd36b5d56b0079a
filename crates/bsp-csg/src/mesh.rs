//! Conversion between indexed meshes and CSG polygons.
//!
//! Input meshes are borrowed as flat buffers ([`MeshData`]): `xyz` positions,
//! optional `xyz` normals, optional `uv` texture coordinates, and face
//! indices. Results are returned as owned buffers ([`MeshBuffers`]) in the
//! same layout, always triangulated.

use nalgebra::{Point3, Vector2, Vector3};
use tracing::info;

use crate::{
    Csg, CsgConfig, MeshError, MeshResult, Operator, PolygonId, Triangle, Vertex, VertexIndex,
};

/// A validated, borrowed view of an indexed mesh.
///
/// Missing normals and uvs read as zero.
#[derive(Debug, Clone, Copy)]
pub struct MeshData<'a> {
    positions: &'a [f32],
    normals: Option<&'a [f32]>,
    uvs: Option<&'a [f32]>,
    indices: &'a [u32],
    face_size: usize,
}

impl<'a> MeshData<'a> {
    /// Wraps a triangle mesh.
    ///
    /// Fails if the buffers are not whole numbers of positions and
    /// triangles, or if an index points past the last vertex.
    pub fn new(positions: &'a [f32], indices: &'a [u32]) -> MeshResult<Self> {
        Self::from_faces(positions, indices, 3)
    }

    /// Wraps a mesh whose faces all have `face_size` vertices (4 for quads).
    /// Faces must be convex and planar.
    pub fn from_faces(
        positions: &'a [f32],
        indices: &'a [u32],
        face_size: usize,
    ) -> MeshResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(MeshError::PositionLength {
                len: positions.len(),
            });
        }
        if face_size < 3 {
            return Err(MeshError::FaceArity { arity: face_size });
        }
        if indices.len() % face_size != 0 {
            return Err(MeshError::IndexLength {
                len: indices.len(),
                arity: face_size,
            });
        }
        let vertex_count = positions.len() / 3;
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::VertexIndex {
                index,
                vertex_count,
            });
        }
        Ok(Self {
            positions,
            normals: None,
            uvs: None,
            indices,
            face_size,
        })
    }

    /// Attaches per-vertex normals.
    pub fn with_normals(mut self, normals: &'a [f32]) -> MeshResult<Self> {
        if normals.len() != self.positions.len() {
            return Err(MeshError::NormalLength {
                expected: self.positions.len(),
                actual: normals.len(),
            });
        }
        self.normals = Some(normals);
        Ok(self)
    }

    /// Attaches per-vertex texture coordinates.
    pub fn with_uvs(mut self, uvs: &'a [f32]) -> MeshResult<Self> {
        let expected = self.vertex_count() * 2;
        if uvs.len() != expected {
            return Err(MeshError::UvLength {
                expected,
                actual: uvs.len(),
            });
        }
        self.uvs = Some(uvs);
        Ok(self)
    }

    /// Fails unless the mesh is made of triangles.
    pub(crate) fn ensure_triangles(&self) -> MeshResult<()> {
        if self.face_size == 3 {
            Ok(())
        } else {
            Err(MeshError::FaceArity {
                arity: self.face_size,
            })
        }
    }

    #[inline]
    pub fn positions(&self) -> &'a [f32] {
        self.positions
    }

    #[inline]
    pub fn normals(&self) -> Option<&'a [f32]> {
        self.normals
    }

    #[inline]
    pub fn uvs(&self) -> Option<&'a [f32]> {
        self.uvs
    }

    #[inline]
    pub fn indices(&self) -> &'a [u32] {
        self.indices
    }

    /// Vertices per face.
    #[inline]
    pub fn face_size(&self) -> usize {
        self.face_size
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.indices.len() / self.face_size
    }

    /// Number of triangles once every face is fanned from its first corner;
    /// equal to [`face_count`](Self::face_count) for triangle meshes.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.face_count() * (self.face_size - 2)
    }

    /// Returns the position of vertex `i`.
    pub fn position(&self, i: usize) -> Point3<f32> {
        Point3::new(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }

    /// Returns the normal of vertex `i`, or zero if the mesh has none.
    pub fn normal(&self, i: usize) -> Vector3<f32> {
        self.normals.map_or_else(Vector3::zeros, |n| {
            Vector3::new(n[i * 3], n[i * 3 + 1], n[i * 3 + 2])
        })
    }

    /// Returns the texture coordinate of vertex `i`, or zero if the mesh has none.
    pub fn uv(&self, i: usize) -> Vector2<f32> {
        self.uvs
            .map_or_else(Vector2::zeros, |uv| Vector2::new(uv[i * 2], uv[i * 2 + 1]))
    }

    /// Returns every attribute of vertex `i`.
    pub fn vertex(&self, i: usize) -> Vertex {
        Vertex::new(self.position(i), self.normal(i), self.uv(i))
    }

    /// Returns the indices of face `f`.
    #[inline]
    pub fn face(&self, f: usize) -> &'a [u32] {
        &self.indices[f * self.face_size..(f + 1) * self.face_size]
    }

    /// Returns the vertex indices of triangle `t`.
    ///
    /// Faces with more than three corners are fanned: face `f` owns
    /// triangles `f * (face_size - 2)` onwards, each sharing the face's first
    /// corner.
    #[inline]
    pub fn triangle_indices(&self, t: usize) -> [u32; 3] {
        let per_face = self.face_size - 2;
        let face = self.face(t / per_face);
        let fan = t % per_face;
        [face[0], face[fan + 1], face[fan + 2]]
    }

    /// Returns the positions of triangle `t`.
    pub fn triangle(&self, t: usize) -> Triangle {
        let [a, b, c] = self.triangle_indices(t);
        Triangle::new(
            self.position(a as usize),
            self.position(b as usize),
            self.position(c as usize),
        )
    }

    /// Iterates over all triangles, fanning larger faces.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(|t| self.triangle(t))
    }
}

/// Owned mesh buffers, the output of every mesh-level operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Returns `true` if there are no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, vertex: &Vertex) -> u32 {
        let index = self.vertex_count() as u32;
        self.positions.extend(vertex.position.iter());
        self.normals.extend(vertex.normal.iter());
        self.uvs.extend(vertex.uv.iter());
        index
    }

    /// Appends a triangle over existing vertices.
    #[inline]
    pub fn push_triangle(&mut self, indices: [u32; 3]) {
        self.indices.extend(indices);
    }

    /// Returns the attributes of vertex `i`.
    pub fn vertex(&self, i: usize) -> Vertex {
        Vertex::new(
            Point3::new(
                self.positions[i * 3],
                self.positions[i * 3 + 1],
                self.positions[i * 3 + 2],
            ),
            Vector3::new(
                self.normals[i * 3],
                self.normals[i * 3 + 1],
                self.normals[i * 3 + 2],
            ),
            Vector2::new(self.uvs[i * 2], self.uvs[i * 2 + 1]),
        )
    }

    /// Borrows the buffers as input for another operation.
    pub fn as_mesh_data(&self) -> MeshResult<MeshData<'_>> {
        MeshData::new(&self.positions, &self.indices)?
            .with_normals(&self.normals)?
            .with_uvs(&self.uvs)
    }

    /// Volume enclosed by the triangles, positive for outward facing winding.
    pub fn signed_volume(&self) -> f32 {
        self.triangles().map(|t| t.signed_volume()).sum()
    }

    /// Total area of the triangles.
    pub fn surface_area(&self) -> f32 {
        self.triangles().map(|t| t.normal().norm() * 0.5).sum()
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        let position = |i: u32| {
            let i = i as usize * 3;
            Point3::new(self.positions[i], self.positions[i + 1], self.positions[i + 2])
        };
        self.indices
            .chunks_exact(3)
            .map(move |t| Triangle::new(position(t[0]), position(t[1]), position(t[2])))
    }
}

/// Adds every face of `mesh` to the arena as a polygon.
///
/// All mesh vertices are appended to the arena. Faces that repeat a vertex
/// index, or whose first three corners have a degenerate cross product, are
/// skipped.
pub fn polygons_from_mesh(csg: &mut Csg, mesh: &MeshData<'_>) -> Vec<PolygonId> {
    let base = append_vertices(csg, mesh);
    (0..mesh.face_count())
        .filter_map(|f| add_face(csg, base, mesh.face(f)))
        .collect()
}

/// Adds the listed triangles of `mesh` to the arena.
///
/// Like [`polygons_from_mesh`], restricted to a subset of triangles.
pub fn polygons_from_triangles(
    csg: &mut Csg,
    mesh: &MeshData<'_>,
    triangles: &[u32],
) -> MeshResult<Vec<PolygonId>> {
    mesh.ensure_triangles()?;
    let triangle_count = mesh.triangle_count();
    if let Some(&index) = triangles.iter().find(|&&t| t as usize >= triangle_count) {
        return Err(MeshError::TriangleIndex {
            index,
            triangle_count,
        });
    }

    let base = append_vertices(csg, mesh);
    Ok(triangles
        .iter()
        .filter_map(|&t| add_face(csg, base, mesh.face(t as usize)))
        .collect())
}

fn append_vertices(csg: &mut Csg, mesh: &MeshData<'_>) -> usize {
    let base = csg.vertices().len();
    for i in 0..mesh.vertex_count() {
        csg.add_vertex(mesh.vertex(i));
    }
    base
}

fn add_face(csg: &mut Csg, base: usize, face: &[u32]) -> Option<PolygonId> {
    let repeats = face
        .iter()
        .enumerate()
        .any(|(i, index)| face[i + 1..].contains(index));
    if repeats {
        return None;
    }

    let corners: Vec<VertexIndex> = face
        .iter()
        .map(|&i| VertexIndex::new(base + i as usize))
        .collect();
    let first = Triangle::new(
        csg.vertex(corners[0].index).position,
        csg.vertex(corners[1].index).position,
        csg.vertex(corners[2].index).position,
    );
    if first.is_degenerate(csg.config().degenerate_tolerance) {
        return None;
    }
    Some(csg.add_polygon(corners))
}

/// Appends the polygons to `mesh`, fan-triangulated.
///
/// Every polygon gets its own copies of its vertices; inverted corners are
/// written with negated normals.
pub fn polygons_to_mesh(csg: &Csg, polygons: &[PolygonId], mesh: &mut MeshBuffers) {
    for &id in polygons {
        let polygon = csg.polygon(id);
        let start = mesh.vertex_count() as u32;
        for &corner in polygon.vertices() {
            mesh.push_vertex(&csg.resolve_vertex(corner));
        }
        for i in 0..polygon.len().saturating_sub(2) as u32 {
            mesh.push_triangle([start, start + i + 1, start + i + 2]);
        }
    }
}

/// Runs a boolean operation on two whole meshes.
pub fn mesh_operation(
    op: Operator,
    a: &MeshData<'_>,
    b: &MeshData<'_>,
    config: &CsgConfig,
) -> MeshBuffers {
    info!(
        ?op,
        faces_a = a.face_count(),
        faces_b = b.face_count(),
        "Starting mesh operation"
    );

    let mut csg = Csg::with_config(*config);
    let polygons_a = polygons_from_mesh(&mut csg, a);
    let polygons_b = polygons_from_mesh(&mut csg, b);
    let result = csg.apply(op, polygons_a, polygons_b);

    let mut mesh = MeshBuffers::new();
    polygons_to_mesh(&csg, &result, &mut mesh);
    mesh
}
