//! Splitting polygons by a plane.

use crate::{Classification, Csg, Plane3D, PlaneSide, PolygonId, VertexIndex};

/// Where a polygon ended up after [`Csg::split_polygon`].
///
/// Unsplit polygons keep their id. A spanning polygon is replaced by up to
/// two new polygons; a piece with fewer than three vertices is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// On the plane, facing the same way.
    CoplanarFront(PolygonId),
    /// On the plane, facing the other way.
    CoplanarBack(PolygonId),
    /// Entirely in front.
    Front(PolygonId),
    /// Entirely behind.
    Back(PolygonId),
    /// Cut in two.
    Spanning {
        front: Option<PolygonId>,
        back: Option<PolygonId>,
    },
}

impl Csg {
    /// Classifies a polygon against `plane`, cutting it when it spans the plane.
    ///
    /// Each edge crossing the plane gets a new vertex whose position, normal,
    /// and uv are interpolated between the edge's endpoints. Normals are
    /// interpolated as they are seen through the polygon (inversion applied),
    /// so the new corner is stored non-inverted.
    pub fn split_polygon(&mut self, plane: &Plane3D, polygon: PolygonId) -> Split {
        let epsilon = self.plane_epsilon();
        let corners = self.polygon(polygon).vertices().to_vec();
        let sides: Vec<PlaneSide> = corners
            .iter()
            .map(|corner| plane.classify_point(self.vertex(corner.index).position, epsilon))
            .collect();
        let classification = sides
            .iter()
            .fold(Classification::Coplanar, |acc, &side| acc | side);

        match classification {
            Classification::Coplanar => {
                if plane.faces_same_direction(self.polygon(polygon).plane()) {
                    Split::CoplanarFront(polygon)
                } else {
                    Split::CoplanarBack(polygon)
                }
            }
            Classification::Front => Split::Front(polygon),
            Classification::Back => Split::Back(polygon),
            Classification::Spanning => {
                let mut front = Vec::with_capacity(corners.len() + 1);
                let mut back = Vec::with_capacity(corners.len() + 1);

                for (i, &vi) in corners.iter().enumerate() {
                    let j = (i + 1) % corners.len();
                    let vj = corners[j];
                    let (ti, tj) = (sides[i], sides[j]);

                    if ti != PlaneSide::Back {
                        front.push(vi);
                    }
                    if ti != PlaneSide::Front {
                        back.push(vi);
                    }
                    if Classification::from(ti) | tj == Classification::Spanning {
                        let a = self.resolve_vertex(vi);
                        let b = self.resolve_vertex(vj);
                        let t = plane.edge_parameter(a.position, b.position);
                        let id = self.add_vertex(a.interpolate(&b, t));
                        front.push(VertexIndex::new(id));
                        back.push(VertexIndex::new(id));
                    }
                }

                let front = (front.len() >= 3).then(|| self.add_polygon(front));
                let back = (back.len() >= 3).then(|| self.add_polygon(back));
                Split::Spanning { front, back }
            }
        }
    }
}
