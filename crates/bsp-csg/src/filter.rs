//! Bounding box pre-filter selecting the triangles a boolean can touch.

use std::collections::BTreeSet;

use tracing::debug;

use crate::{Aabb, MeshData, MeshResult};

/// Finds the triangles of `a` and `b` whose bounding boxes overlap a
/// bounding box of the other mesh.
///
/// Boxes are compared with `epsilon` slack on both sides. The returned lists
/// are ascending and free of duplicates. Only these triangles can be cut by
/// a boolean operation; all others are either kept or dropped whole.
pub fn find_intersecting(
    a: &MeshData<'_>,
    b: &MeshData<'_>,
    epsilon: f32,
) -> MeshResult<(Vec<u32>, Vec<u32>)> {
    a.ensure_triangles()?;
    b.ensure_triangles()?;

    let boxes_a: Vec<Aabb> = a.triangles().map(|t| t.aabb()).collect();
    let boxes_b: Vec<Aabb> = b.triangles().map(|t| t.aabb()).collect();

    let mut triangles_a = Vec::new();
    let mut triangles_b = BTreeSet::new();
    for (i, box_a) in boxes_a.iter().enumerate() {
        for (j, box_b) in boxes_b.iter().enumerate() {
            if box_a.overlaps(box_b, epsilon) {
                if triangles_a.last() != Some(&(i as u32)) {
                    triangles_a.push(i as u32);
                }
                triangles_b.insert(j as u32);
            }
        }
    }

    debug!(
        candidates_a = triangles_a.len(),
        candidates_b = triangles_b.len(),
        triangles_a = boxes_a.len(),
        triangles_b = boxes_b.len(),
        "Bounding box pre-filter"
    );
    Ok((triangles_a, triangles_b.into_iter().collect()))
}
