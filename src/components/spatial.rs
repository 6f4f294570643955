use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Spatial state of a rigid body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position of the centre of mass in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in world axes [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    /// Create a spatial component at rest with the given pose
    pub fn at_transform(transform: &Isometry3<f64>) -> Self {
        Self {
            position: transform.translation.vector,
            attitude: transform.rotation,
            ..Default::default()
        }
    }

    pub fn transform(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position), self.attitude)
    }

    pub fn set_transform(&mut self, transform: &Isometry3<f64>) {
        self.position = transform.translation.vector;
        self.attitude = transform.rotation;
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().all(|x| x.is_finite())
            && self.velocity.iter().all(|x| x.is_finite())
            && self.angular_velocity.iter().all(|x| x.is_finite())
            && self.attitude.coords.iter().all(|x| x.is_finite())
    }
}
