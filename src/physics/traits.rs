use crate::physics::components::BoxShape;
use crate::physics::error::PhysicsError;
use nalgebra::{Isometry3, Vector3};
use serde::{Deserialize, Serialize};

/// Generational index of a rigid body inside a physics world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle {
    pub index: usize,
    pub generation: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    Static,
    Dynamic,
}

/// Everything the engine needs to allocate a box-shaped body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDesc {
    pub shape: BoxShape,
    pub mass: f64,
    pub transform: Isometry3<f64>,
    pub body_type: BodyType,
    pub bounciness: f64,
}

impl BodyDesc {
    pub fn dynamic_box(half_extents: Vector3<f64>, mass: f64, transform: Isometry3<f64>) -> Self {
        Self {
            shape: BoxShape::new(half_extents),
            mass,
            transform,
            body_type: BodyType::Dynamic,
            bounciness: 0.0,
        }
    }

    pub fn static_box(half_extents: Vector3<f64>, transform: Isometry3<f64>) -> Self {
        Self {
            shape: BoxShape::new(half_extents),
            mass: 1.0,
            transform,
            body_type: BodyType::Static,
            bounciness: 0.0,
        }
    }

    pub fn with_bounciness(mut self, bounciness: f64) -> Self {
        self.bounciness = bounciness;
        self
    }
}

/// The narrow surface the control-and-stepping core consumes from a rigid-body engine.
///
/// Handles passed to any method other than `create_rigid_body` must be live;
/// a stale or foreign handle is a caller bug and implementations panic.
pub trait PhysicsEngine {
    fn create_rigid_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError>;
    fn destroy_rigid_body(&mut self, handle: BodyHandle);
    fn contains(&self, handle: BodyHandle) -> bool;
    fn body_count(&self) -> usize;

    fn transform(&self, handle: BodyHandle) -> Isometry3<f64>;
    fn set_transform(&mut self, handle: BodyHandle, transform: Isometry3<f64>);
    fn set_body_type(&mut self, handle: BodyHandle, body_type: BodyType);
    fn mass(&self, handle: BodyHandle) -> f64;

    fn apply_force_at_center_of_mass(&mut self, handle: BodyHandle, force: Vector3<f64>);
    fn apply_torque(&mut self, handle: BodyHandle, torque: Vector3<f64>);

    fn linear_velocity(&self, handle: BodyHandle) -> Vector3<f64>;
    fn angular_velocity(&self, handle: BodyHandle) -> Vector3<f64>;
    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vector3<f64>);
    fn set_angular_velocity(&mut self, handle: BodyHandle, velocity: Vector3<f64>);

    /// Rigidly attach `child` to `parent` at their current relative pose.
    fn weld(&mut self, child: BodyHandle, parent: BodyHandle) -> Result<(), PhysicsError>;

    fn gravity(&self) -> Vector3<f64>;
    fn step(&mut self, dt: f64);
    /// Simulated time accumulated by `step`.
    fn time(&self) -> f64;
}
