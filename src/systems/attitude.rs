use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Attitude of the frame as the controllers see it [rad].
///
/// Frame axes are +X right, +Y up, -Z forward in a +Y-up world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    /// Nose up positive
    pub pitch: f64,
    /// Right side up positive
    pub roll: f64,
    /// Heading about world +Y, counter-clockwise seen from above
    pub yaw: f64,
}

impl Attitude {
    pub fn from_orientation(orientation: &UnitQuaternion<f64>) -> Self {
        let forward = orientation * -Vector3::z();
        let right = orientation * Vector3::x();
        Self {
            pitch: forward.y.clamp(-1.0, 1.0).asin(),
            roll: right.y.clamp(-1.0, 1.0).asin(),
            yaw: (-forward.x).atan2(-forward.z),
        }
    }
}

/// Wraps an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}
