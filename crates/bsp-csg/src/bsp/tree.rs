//! BSP tree construction, clipping, and traversal over the arena.
//!
//! All traversals use explicit work lists instead of recursion, so deep
//! trees built from large meshes cannot overflow the stack. Output order
//! matches a recursive pre-order walk (node, front subtree, back subtree).

use std::collections::VecDeque;

use tracing::trace;

use crate::{Csg, PolygonId};

use super::node::NodeId;
use super::split::Split;

#[derive(Debug, Clone, Copy)]
enum Branch {
    Front,
    Back,
}

/// One pending `clip_polygons` call: the node to clip against, its input,
/// and the partial results gathered from its children.
#[derive(Debug)]
struct ClipFrame {
    node: NodeId,
    input: Vec<PolygonId>,
    front: Vec<PolygonId>,
    back: Vec<PolygonId>,
    parent: Option<(usize, Branch)>,
}

impl ClipFrame {
    fn new(node: NodeId, input: Vec<PolygonId>, parent: Option<(usize, Branch)>) -> Self {
        Self {
            node,
            input,
            front: Vec::new(),
            back: Vec::new(),
            parent,
        }
    }
}

impl Csg {
    /// Creates a new node and builds a tree from `polygons` under it.
    ///
    /// An empty input yields a node without a plane.
    pub fn construct_node(&mut self, polygons: Vec<PolygonId>) -> NodeId {
        let node = self.add_node();
        self.build(node, polygons);
        node
    }

    /// Inserts `polygons` into the tree rooted at `node`.
    ///
    /// A node without a plane adopts the plane of the first polygon it
    /// receives. Coplanar polygons (either facing) are stored at the node;
    /// the rest are pushed into the front or back subtree, which is created
    /// on first use. Spanning polygons are split.
    pub fn build(&mut self, node: NodeId, polygons: Vec<PolygonId>) {
        let mut queue = VecDeque::from([(node, polygons)]);

        while let Some((node_id, batch)) = queue.pop_front() {
            let Some(&first) = batch.first() else {
                continue;
            };
            let plane = match self.node(node_id).plane() {
                Some(plane) => *plane,
                None => {
                    let plane = *self.polygon(first).plane();
                    self.node_mut(node_id).set_plane(plane);
                    plane
                }
            };

            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in batch {
                match self.split_polygon(&plane, polygon) {
                    Split::CoplanarFront(id) | Split::CoplanarBack(id) => {
                        self.node_mut(node_id).push_polygon(id);
                    }
                    Split::Front(id) => front.push(id),
                    Split::Back(id) => back.push(id),
                    Split::Spanning { front: f, back: b } => {
                        front.extend(f);
                        back.extend(b);
                    }
                }
            }

            trace!(
                node = node_id,
                coplanar = self.node(node_id).polygons().len(),
                front = front.len(),
                back = back.len(),
                "Partitioned batch"
            );

            if !front.is_empty() {
                let child = match self.node(node_id).front() {
                    Some(child) => child,
                    None => {
                        let child = self.add_node();
                        self.node_mut(node_id).set_front(child);
                        child
                    }
                };
                queue.push_back((child, front));
            }
            if !back.is_empty() {
                let child = match self.node(node_id).back() {
                    Some(child) => child,
                    None => {
                        let child = self.add_node();
                        self.node_mut(node_id).set_back(child);
                        child
                    }
                };
                queue.push_back((child, back));
            }
        }
    }

    /// Removes the parts of `polygons` that lie inside the solid described by
    /// the tree at `node`.
    ///
    /// Polygons are pushed down the tree; whatever reaches a missing back
    /// child is inside and dropped, whatever reaches a missing front child is
    /// kept. Coplanar polygons go with the side they face. The result lists
    /// front survivors before back survivors at every level.
    pub fn clip_polygons(&mut self, node: NodeId, polygons: Vec<PolygonId>) -> Vec<PolygonId> {
        let mut frames = vec![ClipFrame::new(node, polygons, None)];

        let mut cursor = 0;
        while cursor < frames.len() {
            let node_id = frames[cursor].node;
            let input = std::mem::take(&mut frames[cursor].input);

            let plane = match self.node(node_id).plane() {
                Some(plane) if !input.is_empty() => *plane,
                _ => {
                    frames[cursor].front = input;
                    cursor += 1;
                    continue;
                }
            };

            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in input {
                match self.split_polygon(&plane, polygon) {
                    Split::CoplanarFront(id) | Split::Front(id) => front.push(id),
                    Split::CoplanarBack(id) | Split::Back(id) => back.push(id),
                    Split::Spanning { front: f, back: b } => {
                        front.extend(f);
                        back.extend(b);
                    }
                }
            }

            match self.node(node_id).front() {
                Some(child) => frames.push(ClipFrame::new(
                    child,
                    front,
                    Some((cursor, Branch::Front)),
                )),
                None => frames[cursor].front = front,
            }
            if let Some(child) = self.node(node_id).back() {
                frames.push(ClipFrame::new(child, back, Some((cursor, Branch::Back))));
            }

            cursor += 1;
        }

        // children always sit after their parent, so popping from the end
        // finishes every subtree before its parent is assembled
        while let Some(frame) = frames.pop() {
            let mut result = frame.front;
            result.extend(frame.back);
            match frame.parent {
                None => return result,
                Some((parent, Branch::Front)) => frames[parent].front = result,
                Some((parent, Branch::Back)) => frames[parent].back = result,
            }
        }
        Vec::new()
    }

    /// Clips the polygons of every node under `node` against the tree at `other`.
    pub fn clip_to(&mut self, node: NodeId, other: NodeId) {
        for id in self.subtree(node) {
            let polygons = self.node_mut(id).take_polygons();
            let clipped = self.clip_polygons(other, polygons);
            self.node_mut(id).set_polygons(clipped);
        }
    }

    /// Converts the solid at `node` into its complement: flips every polygon
    /// and plane and swaps front with back.
    pub fn invert(&mut self, node: NodeId) {
        for id in self.subtree(node) {
            let polygons = self.node(id).polygons().to_vec();
            self.flip_polygons(&polygons);
            self.node_mut(id).invert();
        }
    }

    /// Collects every polygon under `node`: the node's own polygons, then
    /// the front subtree, then the back subtree.
    pub fn all_polygons(&self, node: NodeId) -> Vec<PolygonId> {
        let mut result = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            let current = self.node(id);
            result.extend_from_slice(current.polygons());
            stack.extend(current.back());
            stack.extend(current.front());
        }
        result
    }

    /// Returns the ids of all nodes under `node` in pre-order.
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            result.push(id);
            let current = self.node(id);
            stack.extend(current.back());
            stack.extend(current.front());
        }
        result
    }

    /// Returns the total number of polygons stored under `node`.
    pub fn polygon_count(&self, node: NodeId) -> usize {
        self.subtree(node)
            .into_iter()
            .map(|id| self.node(id).polygons().len())
            .sum()
    }

    /// Returns the maximum depth of the tree at `node` (1 for a single node).
    pub fn depth(&self, node: NodeId) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(node, 1)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let current = self.node(id);
            stack.extend(current.front().map(|child| (child, depth + 1)));
            stack.extend(current.back().map(|child| (child, depth + 1)));
        }
        deepest
    }
}
