//! Position welding: map nearby positions to shared vertex ids.

use std::collections::HashMap;

use nalgebra::Point3;

use crate::config::DEFAULT_WELD_EPSILON;

type DistanceMap = HashMap<i64, u32>;
type PlaneMap = HashMap<i64, DistanceMap>;

/// Assigns the same id to every position that falls into the same cell of
/// a grid with spacing `epsilon`.
///
/// Positions are quantized per axis to `round(v / epsilon)` and looked up in
/// maps nested by x, then y, then z. Ids are handed out in order of first
/// appearance, starting at 0, so the ids of one welder are stable across
/// several meshes fed into it.
#[derive(Debug, Clone)]
pub struct UniqueIndices {
    epsilon: f32,
    cells: HashMap<i64, PlaneMap>,
    next_index: u32,
}

impl Default for UniqueIndices {
    fn default() -> Self {
        Self::new(DEFAULT_WELD_EPSILON)
    }
}

impl UniqueIndices {
    /// Creates an empty welder with grid spacing `epsilon`.
    pub fn new(epsilon: f32) -> Self {
        Self {
            epsilon,
            cells: HashMap::new(),
            next_index: 0,
        }
    }

    /// Number of distinct ids handed out so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.next_index as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.next_index == 0
    }

    /// Returns the id of the cell `(x, y, z)`, assigning the next free id if
    /// the cell has not been seen before.
    pub fn get_index(&mut self, x: i64, y: i64, z: i64) -> u32 {
        let next_index = &mut self.next_index;
        *self
            .cells
            .entry(x)
            .or_default()
            .entry(y)
            .or_default()
            .entry(z)
            .or_insert_with(|| {
                let index = *next_index;
                *next_index += 1;
                index
            })
    }

    /// Returns the id of the cell containing `point`.
    pub fn get_vertex_index(&mut self, point: &Point3<f32>) -> u32 {
        let [x, y, z] = [point.x, point.y, point.z].map(|v| self.quantize(v));
        self.get_index(x, y, z)
    }

    /// Welds a flat `xyz` position buffer, returning one id per vertex.
    pub fn create_unique_indices(&mut self, positions: &[f32]) -> Vec<u32> {
        positions
            .chunks_exact(3)
            .map(|p| self.get_vertex_index(&Point3::new(p[0], p[1], p[2])))
            .collect()
    }

    #[inline]
    fn quantize(&self, v: f32) -> i64 {
        (v / self.epsilon).round() as i64
    }
}
