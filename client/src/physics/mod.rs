//! Minimal static-world collision for the kinematic character.
//!
//! The world is a set of axis-aligned boxes. The character is swept as an
//! axis-aligned box of its capsule's extents, one axis at a time, which is
//! enough for flat ground, ledges and platforms.

use bevy::prelude::*;
use locomotion::{CharacterMotor, GroundProbe, LayerMask};

/// Keeps the swept box from resting exactly on a face.
const SKIN: f32 = 1e-3;

#[derive(Component, Debug, Clone, Copy)]
pub struct StaticCollider {
    pub half_extents: Vec3,
    pub layer: LayerMask,
    /// Triggers never block movement and are never ground.
    pub is_trigger: bool,
}

impl StaticCollider {
    pub fn solid(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            layer: LayerMask::DEFAULT,
            is_trigger: false,
        }
    }

    pub fn trigger(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            layer: LayerMask::DEFAULT,
            is_trigger: true,
        }
    }
}

/// Volume and last resolved velocity of a character moved by
/// [`KinematicMotor`]. The transform origin sits at the feet.
#[derive(Component, Debug, Clone, Copy)]
pub struct KinematicBody {
    pub radius: f32,
    pub height: f32,
    pub velocity: Vec3,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self {
            radius: 0.28,
            height: 1.8,
            velocity: Vec3::ZERO,
        }
    }
}

impl KinematicBody {
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.radius, self.height * 0.5, self.radius)
    }

    /// Box centre for a feet position.
    pub fn center(&self, feet: Vec3) -> Vec3 {
        feet + Vec3::Y * (self.height * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb3 {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.clamp(self.min(), self.max())
    }

    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) <= radius * radius
    }

    pub fn overlaps(&self, other: &Aabb3) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y && delta.z < reach.z
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ColliderShape {
    pub bounds: Aabb3,
    pub layer: LayerMask,
    pub is_trigger: bool,
}

/// Frame snapshot of every static collider, gathered before locomotion runs.
#[derive(Debug, Default, Clone)]
pub struct CollisionWorld {
    shapes: Vec<ColliderShape>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, center: Vec3, collider: &StaticCollider) {
        self.shapes.push(ColliderShape {
            bounds: Aabb3::new(center, collider.half_extents),
            layer: collider.layer,
            is_trigger: collider.is_trigger,
        });
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn solids(&self) -> impl Iterator<Item = &Aabb3> {
        self.shapes
            .iter()
            .filter(|shape| !shape.is_trigger)
            .map(|shape| &shape.bounds)
    }

    /// Moves `body` along one axis by `delta`, stopping at the first solid face.
    fn sweep_axis(&self, body: Aabb3, axis: usize, delta: f32) -> f32 {
        if delta == 0.0 {
            return 0.0;
        }

        let mut allowed = delta;
        for solid in self.solids() {
            // Only boxes overlapping on the other two axes can block.
            let blocks = (0..3).filter(|other| *other != axis).all(|other| {
                (body.center[other] - solid.center[other]).abs()
                    < body.half_extents[other] + solid.half_extents[other]
            });
            if !blocks {
                continue;
            }

            if delta > 0.0 {
                let gap = solid.min()[axis] - body.max()[axis];
                if gap >= -SKIN {
                    allowed = allowed.min((gap - SKIN).max(0.0));
                }
            } else {
                let gap = body.min()[axis] - solid.max()[axis];
                if gap >= -SKIN {
                    allowed = allowed.max(-(gap - SKIN).max(0.0));
                }
            }
        }
        allowed
    }

    /// Resolves a displacement for a box, vertical axis first.
    pub fn resolve(&self, body: Aabb3, displacement: Vec3) -> Vec3 {
        let mut moved = body;
        let mut actual = Vec3::ZERO;
        for axis in [1, 0, 2] {
            let step = self.sweep_axis(moved, axis, displacement[axis]);
            actual[axis] = step;
            moved.center[axis] += step;
        }
        actual
    }
}

impl GroundProbe for CollisionWorld {
    fn check_sphere(&self, center: Vec3, radius: f32, layers: LayerMask) -> bool {
        self.shapes.iter().any(|shape| {
            !shape.is_trigger
                && shape.layer.intersects(layers)
                && shape.bounds.intersects_sphere(center, radius)
        })
    }
}

/// [`CharacterMotor`] over a [`CollisionWorld`] for one frame.
pub struct KinematicMotor<'a> {
    world: &'a CollisionWorld,
    body: KinematicBody,
    position: Vec3,
}

impl<'a> KinematicMotor<'a> {
    pub fn new(world: &'a CollisionWorld, body: KinematicBody, position: Vec3) -> Self {
        Self {
            world,
            body,
            position,
        }
    }

    pub fn body(&self) -> KinematicBody {
        self.body
    }
}

impl CharacterMotor for KinematicMotor<'_> {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    fn move_by(&mut self, displacement: Vec3, dt: f32) -> Vec3 {
        let bounds = Aabb3::new(self.body.center(self.position), self.body.half_extents());
        let actual = self.world.resolve(bounds, displacement);
        self.position += actual;
        if dt > 0.0 {
            self.body.velocity = actual / dt;
        }
        actual
    }
}
