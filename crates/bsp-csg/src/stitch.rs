//! Boolean operations restricted to the triangles near the intersection.
//!
//! Only triangles whose bounding boxes overlap the other mesh can be cut, so
//! the BSP work runs on those alone. Every other triangle is kept or
//! dropped whole: untouched triangles are grouped into connected pieces,
//! each piece is classified inside or outside the other mesh by ray
//! parity, and kept pieces are appended to the boolean result. Pieces that
//! touch the result reuse its vertices along the seam.

use std::collections::{HashMap, VecDeque};

use nalgebra::{Point3, Vector3};
use tracing::{debug, info};

use crate::math::{Ray, ray_intersects_box};
use crate::mesh::{polygons_from_triangles, polygons_to_mesh};
use crate::{
    Aabb, Csg, CsgConfig, MeshBuffers, MeshData, MeshResult, Operator, UniqueIndices,
    find_intersecting,
};

/// Skewed direction for parity rays, chosen to avoid grazing the edges of
/// axis-aligned geometry.
const RAY_DIRECTION: [f32; 3] = [1.0, 0.3713, 0.1731];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    A,
    B,
}

/// Whether an untouched piece of `operand` survives `op`.
fn keeps_untouched(op: Operator, operand: Operand, inside_other: bool) -> bool {
    match (op, operand) {
        (Operator::Union, _) => !inside_other,
        (Operator::Intersect, _) => inside_other,
        (Operator::Subtract, Operand::A) => !inside_other,
        (Operator::Subtract, Operand::B) => inside_other,
    }
}

/// Runs `op` on whole meshes, cutting only the triangles that the bounding
/// box pre-filter selects.
pub fn filtered_mesh_operation(
    op: Operator,
    a: &MeshData<'_>,
    b: &MeshData<'_>,
    config: &CsgConfig,
) -> MeshResult<MeshBuffers> {
    let (triangles_a, triangles_b) = find_intersecting(a, b, config.box_epsilon)?;
    mesh_operation_partial(op, a, b, &triangles_a, &triangles_b, config)
}

/// Runs `op` on the listed triangles of `a` and `b` and merges the result
/// with the untouched remainder of both meshes.
///
/// The candidate lists must cover every triangle that crosses the other
/// mesh; [`find_intersecting`] computes such lists. Untouched parts of `b`
/// kept by a subtraction are emitted with reversed winding and negated
/// normals.
pub fn mesh_operation_partial(
    op: Operator,
    a: &MeshData<'_>,
    b: &MeshData<'_>,
    triangles_a: &[u32],
    triangles_b: &[u32],
    config: &CsgConfig,
) -> MeshResult<MeshBuffers> {
    a.ensure_triangles()?;
    b.ensure_triangles()?;
    info!(
        ?op,
        triangles_a = a.triangle_count(),
        triangles_b = b.triangle_count(),
        candidates_a = triangles_a.len(),
        candidates_b = triangles_b.len(),
        "Starting partial mesh operation"
    );

    let mut csg = Csg::with_config(*config);
    let polygons_a = polygons_from_triangles(&mut csg, a, triangles_a)?;
    let polygons_b = polygons_from_triangles(&mut csg, b, triangles_b)?;
    let result = csg.apply(op, polygons_a, polygons_b);

    let mut mesh = MeshBuffers::new();
    polygons_to_mesh(&csg, &result, &mut mesh);

    // one welder for result and inputs, so equal positions share an id
    let mut welder = UniqueIndices::new(config.weld_epsilon);
    let mut seam: HashMap<u32, Vec<u32>> = HashMap::new();
    for (vertex, id) in welder
        .create_unique_indices(&mesh.positions)
        .into_iter()
        .enumerate()
    {
        seam.entry(id).or_default().push(vertex as u32);
    }

    for (operand, input, candidates, other) in [
        (Operand::A, a, triangles_a, b),
        (Operand::B, b, triangles_b, a),
    ] {
        let welded = welder.create_unique_indices(input.positions());
        let components =
            untouched_components(input, candidates, &welded, config.degenerate_tolerance);
        let flip = op == Operator::Subtract && operand == Operand::B;

        let (mut kept, mut stitched) = (0, 0);
        for component in &components {
            let sample = input.triangle(component[0] as usize).centroid();
            if !keeps_untouched(op, operand, contains_point(other, sample)) {
                continue;
            }
            let piece = Piece {
                input,
                triangles: component,
                welded: &welded,
                flip,
            };
            if piece.append_to(&mut mesh, &seam, config.weld_epsilon) {
                stitched += 1;
            }
            kept += 1;
        }

        debug!(
            ?operand,
            components = components.len(),
            kept,
            stitched,
            "Merged untouched triangles"
        );
    }

    Ok(mesh)
}

/// Returns `true` if `point` lies inside the closed surface `mesh`.
///
/// Counts crossings of a ray from `point` with the faces; an odd count
/// means inside. Faces of any size are fanned into triangles. The result is
/// unreliable for points on the surface.
pub fn contains_point(mesh: &MeshData<'_>, point: Point3<f32>) -> bool {
    let Some(bounds) = Aabb::from_points((0..mesh.vertex_count()).map(|i| mesh.position(i)))
    else {
        return false;
    };
    let ray = Ray::new(point, Vector3::from(RAY_DIRECTION));
    if !ray_intersects_box(&ray, &bounds.min, &bounds.max) {
        return false;
    }
    crossings(mesh, &ray) % 2 == 1
}

/// Number of triangles of `mesh` that `ray` passes through.
///
/// Only signs of triple products are compared, so the count does not depend
/// on the size of the mesh. A ray through an edge shared by two triangles is
/// counted once.
fn crossings(mesh: &MeshData<'_>, ray: &Ray) -> usize {
    mesh.triangles()
        .filter(|triangle| {
            let [p0, p1, p2] = *triangle.vertices();
            let side = passes_left(ray, p0, p1);
            if passes_left(ray, p1, p2) != side || passes_left(ray, p2, p0) != side {
                return false;
            }
            let normal = triangle.normal();
            let facing = normal.dot(&ray.direction);
            facing != 0.0 && normal.dot(&(p0 - ray.origin)) / facing >= 0.0
        })
        .count()
}

/// Whether `ray` passes to the left of the directed edge `a -> b`.
///
/// The turn is always evaluated with the endpoints in lexicographic order,
/// so an edge walked both ways gives opposite answers. A ray through the
/// edge itself counts as left of the ordered edge.
fn passes_left(ray: &Ray, a: Point3<f32>, b: Point3<f32>) -> bool {
    let reversed = a.coords.as_slice() > b.coords.as_slice();
    let (first, second) = if reversed { (b, a) } else { (a, b) };
    let turn = ray
        .direction
        .dot(&(first - ray.origin).cross(&(second - ray.origin)));
    (turn >= 0.0) != reversed
}

/// Groups the triangles not listed in `candidates` into connected pieces.
///
/// Triangles are connected when they share a welded vertex id. Each piece
/// lists its triangles in breadth-first order from its lowest index.
/// Triangles with a repeated corner, or whose squared normal length is at
/// or below `degenerate_tolerance`, belong to no piece.
fn untouched_components(
    mesh: &MeshData<'_>,
    candidates: &[u32],
    welded: &[u32],
    degenerate_tolerance: f32,
) -> Vec<Vec<u32>> {
    let triangle_count = mesh.triangle_count();
    let mut visited = vec![false; triangle_count];
    for &t in candidates {
        visited[t as usize] = true;
    }
    for (t, seen) in visited.iter_mut().enumerate() {
        let [i0, i1, i2] = mesh.triangle_indices(t);
        let repeats = i0 == i1 || i1 == i2 || i2 == i0;
        if repeats || mesh.triangle(t).is_degenerate(degenerate_tolerance) {
            *seen = true;
        }
    }

    let mut by_vertex: HashMap<u32, Vec<u32>> = HashMap::new();
    for t in (0..triangle_count).filter(|&t| !visited[t]) {
        for i in mesh.triangle_indices(t) {
            by_vertex.entry(welded[i as usize]).or_default().push(t as u32);
        }
    }

    let mut components = Vec::new();
    for seed in 0..triangle_count {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let mut component = Vec::new();
        let mut queue = VecDeque::from([seed as u32]);
        while let Some(t) = queue.pop_front() {
            component.push(t);
            for i in mesh.triangle_indices(t as usize) {
                for &neighbour in &by_vertex[&welded[i as usize]] {
                    if !visited[neighbour as usize] {
                        visited[neighbour as usize] = true;
                        queue.push_back(neighbour);
                    }
                }
            }
        }
        components.push(component);
    }
    components
}

/// A connected set of untouched input triangles about to be copied out.
struct Piece<'m, 'a> {
    input: &'m MeshData<'a>,
    triangles: &'m [u32],
    welded: &'m [u32],
    flip: bool,
}

impl Piece<'_, '_> {
    /// Appends the piece, sharing vertices between its triangles.
    ///
    /// A corner whose welded id matches a result vertex with the same normal
    /// and uv (within `tolerance`) reuses that vertex. Returns `true` if any
    /// corner was reused.
    fn append_to(&self, out: &mut MeshBuffers, seam: &HashMap<u32, Vec<u32>>, tolerance: f32) -> bool {
        let mut remap: HashMap<u32, u32> = HashMap::new();
        let mut stitched = false;

        for &t in self.triangles {
            let [i0, i1, i2] = self.input.triangle_indices(t as usize);
            let corners = if self.flip { [i0, i2, i1] } else { [i0, i1, i2] };

            let mut triangle = [0u32; 3];
            for (slot, corner) in triangle.iter_mut().zip(corners) {
                *slot = match remap.get(&corner) {
                    Some(&index) => index,
                    None => {
                        let mut vertex = self.input.vertex(corner as usize);
                        if self.flip {
                            vertex = vertex.flipped();
                        }
                        let shared = seam.get(&self.welded[corner as usize]).and_then(|found| {
                            found.iter().copied().find(|&index| {
                                let existing = out.vertex(index as usize);
                                (existing.normal - vertex.normal).norm() <= tolerance
                                    && (existing.uv - vertex.uv).norm() <= tolerance
                            })
                        });
                        let index = match shared {
                            Some(index) => {
                                stitched = true;
                                index
                            }
                            None => out.push_vertex(&vertex),
                        };
                        remap.insert(corner, index);
                        index
                    }
                };
            }
            out.push_triangle(triangle);
        }
        stitched
    }
}
