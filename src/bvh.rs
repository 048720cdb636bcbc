//! Bounding Volume Hierarchy

use std::{cmp::Ordering, fmt::Debug};

use glam::Vec3A;
use log::debug;
use rand::{Rng, RngCore};

use crate::{
    bounds::{surrounding_box, BoundingBox},
    error::SceneError,
    hittables::{nearest, HitRecord, Hittable, HittableList},
    ray::Ray,
    utils::{
        arena::{Arena, ArenaIndex},
        Axis,
    },
};

/// A node in the BVH.
#[derive(Debug)]
enum BvhNode {
    /// A single primitive, referenced by its position in the primitive list
    Leaf { primitive: usize, bbox: BoundingBox },
    /// Holds the bounding box that contains both subhierarchies
    Interior {
        bbox: BoundingBox,
        left: ArenaIndex,
        right: ArenaIndex,
    },
}

impl BvhNode {
    fn bbox(&self) -> BoundingBox {
        match self {
            BvhNode::Leaf { bbox, .. } | BvhNode::Interior { bbox, .. } => *bbox,
        }
    }
}

/// Compares two bounding boxes by their minimum along the given axis
pub fn box_cmp(a: &BoundingBox, b: &BoundingBox, axis: Axis) -> Ordering {
    a.min[axis].total_cmp(&b.min[axis])
}

/// A binary tree of nested bounding boxes over a list of primitives.
///
/// Primitives are owned once by the hierarchy; nodes live in an [Arena] and
/// refer to primitives and to each other by index.
pub struct Bvh {
    primitives: HittableList,
    nodes: Arena<BvhNode>,
    root: ArenaIndex,
}

impl Bvh {
    /// Builds the hierarchy over `primitives` for the shutter interval `[time0, time1]`.
    ///
    /// Fails if the list is empty or if any primitive is unbounded.
    pub fn new<R: Rng + ?Sized>(
        primitives: HittableList,
        time0: f32,
        time1: f32,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        if primitives.is_empty() {
            return Err(SceneError::EmptyScene);
        }

        let boxes = primitives
            .iter()
            .enumerate()
            .map(|(index, p)| {
                p.bounding_box(time0, time1)
                    .ok_or(SceneError::UnboundedPrimitive { index })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut order: Vec<usize> = (0..primitives.len()).collect();
        let mut nodes = Arena::with_capacity(2 * primitives.len() - 1);
        let root = build(&mut nodes, &boxes, &mut order, rng);

        debug!(
            "built BVH over {} primitives with {} nodes",
            primitives.len(),
            nodes.len()
        );

        Ok(Self {
            primitives,
            nodes,
            root,
        })
    }

    /// Number of primitives in the hierarchy
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Always `false`: [Bvh::new] rejects an empty list. Provided alongside [Bvh::len].
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    fn hit_node(
        &self,
        idx: ArenaIndex,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        match &self.nodes[idx] {
            BvhNode::Leaf { primitive, .. } => {
                self.primitives[*primitive].hit(ray, t_min, t_max, rng)
            }
            BvhNode::Interior { bbox, left, right } => {
                if !bbox.hit(ray, t_min, t_max) {
                    return None;
                }

                let left_hit = self.hit_node(*left, ray, t_min, t_max, rng);
                let t_max = left_hit.as_ref().map_or(t_max, |rec| rec.t);
                let right_hit = self.hit_node(*right, ray, t_min, t_max, rng);

                nearest(left_hit, right_hit)
            }
        }
    }
}

/// Recursively builds nodes for the primitives listed in `order`, returning the subtree's root.
fn build<R: Rng + ?Sized>(
    nodes: &mut Arena<BvhNode>,
    boxes: &[BoundingBox],
    order: &mut [usize],
    rng: &mut R,
) -> ArenaIndex {
    if order.len() == 1 {
        let primitive = order[0];
        return nodes.add(BvhNode::Leaf {
            primitive,
            bbox: boxes[primitive],
        });
    }

    let axis: Axis = rng.gen_range(0..3);
    order.sort_by(|&a, &b| box_cmp(&boxes[a], &boxes[b], axis));

    let (left_items, right_items) = order.split_at_mut(order.len() / 2);
    let left = build(nodes, boxes, left_items, rng);
    let right = build(nodes, boxes, right_items, rng);

    let bbox = surrounding_box(nodes[left].bbox(), nodes[right].bbox());
    nodes.add(BvhNode::Interior { bbox, left, right })
}

impl Debug for Bvh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Bvh {{{:?}, {} primitives}}",
            self.nodes[self.root].bbox(),
            self.primitives.len()
        )
    }
}

impl Hittable for Bvh {
    fn hit(
        &self,
        ray: &Ray,
        t_min: f32,
        t_max: f32,
        rng: &mut dyn RngCore,
    ) -> Option<HitRecord<'_>> {
        self.hit_node(self.root, ray, t_min, t_max, rng)
    }

    fn bounding_box(&self, _time0: f32, _time1: f32) -> Option<BoundingBox> {
        Some(self.nodes[self.root].bbox())
    }

    fn pdf_value(&self, origin: Vec3A, direction: Vec3A, rng: &mut dyn RngCore) -> f32 {
        self.primitives.pdf_value(origin, direction, rng)
    }

    fn random_direction(&self, origin: Vec3A, rng: &mut dyn RngCore) -> Vec3A {
        self.primitives.random_direction(origin, rng)
    }
}
