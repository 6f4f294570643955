use crate::physics::{BodyHandle, PhysicsEngine};
use nalgebra::{Isometry3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional slot of a motor; the discriminant is its index in the motor array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotorPosition {
    FrontLeft = 0,
    FrontRight = 1,
    BackLeft = 2,
    BackRight = 3,
}

impl MotorPosition {
    /// Fixed motor order used by the mixer and every motor array.
    pub const ALL: [MotorPosition; 4] = [
        MotorPosition::FrontLeft,
        MotorPosition::FrontRight,
        MotorPosition::BackLeft,
        MotorPosition::BackRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// # Panics
    /// If `index` is not in `0..4`.
    pub fn from_index(index: usize) -> Self {
        *Self::ALL
            .get(index)
            .unwrap_or_else(|| panic!("motor index {} out of range 0..4", index))
    }

    pub fn is_front(self) -> bool {
        matches!(self, MotorPosition::FrontLeft | MotorPosition::FrontRight)
    }

    pub fn is_right(self) -> bool {
        matches!(self, MotorPosition::FrontRight | MotorPosition::BackRight)
    }

    /// Sign of the rotor reaction torque about the frame's up axis.
    pub fn rotor_sign(self) -> f64 {
        match self {
            MotorPosition::FrontLeft | MotorPosition::BackRight => 1.0,
            MotorPosition::FrontRight | MotorPosition::BackLeft => -1.0,
        }
    }

    /// Offset of the motor centre from the frame centre, frame axes
    /// (+X right, +Y up, -Z forward).
    pub fn local_offset(self, frame_size: f64) -> Vector3<f64> {
        let half = frame_size / 2.0;
        let x = if self.is_right() { half } else { -half };
        let z = if self.is_front() { -half } else { half };
        Vector3::new(x, 0.0, z)
    }
}

impl fmt::Display for MotorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MotorPosition::FrontLeft => "front-left",
            MotorPosition::FrontRight => "front-right",
            MotorPosition::BackLeft => "back-left",
            MotorPosition::BackRight => "back-right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleRole {
    Frame,
    Motor(MotorPosition),
}

/// A physical part of the drone: one rigid body plus its fixed pose in the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DroneModule {
    role: ModuleRole,
    body: BodyHandle,
    local_transform: Isometry3<f64>,
}

impl DroneModule {
    pub(crate) fn new(role: ModuleRole, body: BodyHandle, local_transform: Isometry3<f64>) -> Self {
        Self {
            role,
            body,
            local_transform,
        }
    }

    pub fn role(&self) -> ModuleRole {
        self.role
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Pose relative to the frame when the drone is at rest.
    pub fn local_transform(&self) -> &Isometry3<f64> {
        &self.local_transform
    }

    pub fn transform<W: PhysicsEngine>(&self, world: &W) -> Isometry3<f64> {
        world.transform(self.body)
    }

    pub fn apply_force<W: PhysicsEngine>(&self, world: &mut W, force: Vector3<f64>) {
        world.apply_force_at_center_of_mass(self.body, force);
    }

    pub fn apply_torque<W: PhysicsEngine>(&self, world: &mut W, torque: Vector3<f64>) {
        world.apply_torque(self.body, torque);
    }

    pub fn linear_velocity<W: PhysicsEngine>(&self, world: &W) -> Vector3<f64> {
        world.linear_velocity(self.body)
    }

    pub fn angular_velocity<W: PhysicsEngine>(&self, world: &W) -> Vector3<f64> {
        world.angular_velocity(self.body)
    }

    /// Places the module relative to a frame pose and clears its momentum.
    pub(crate) fn place<W: PhysicsEngine>(&self, world: &mut W, frame_transform: &Isometry3<f64>) {
        world.set_transform(self.body, frame_transform * self.local_transform);
        world.set_linear_velocity(self.body, Vector3::zeros());
        world.set_angular_velocity(self.body, Vector3::zeros());
    }

    pub(crate) fn release<W: PhysicsEngine>(self, world: &mut W) {
        world.destroy_rigid_body(self.body);
    }
}
