use crate::components::MotorPosition;
use crate::physics::components::ReferenceFrame;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// How the scripted force evolves once the threshold has been crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisturbancePolicy {
    /// Base force on the first tick, doubled on every tick after that
    Doubling,
    /// Base force on every tick past the threshold
    Constant,
    /// Base force on the first tick past the threshold only
    OneShot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisturbanceConfig {
    /// Simulated time since reset after which the disturbance starts [s]
    pub threshold: f64,
    /// Force applied to each target motor on the first disturbed tick [N]
    pub force: Vector3<f64>,
    pub frame: ReferenceFrame,
    pub policy: DisturbancePolicy,
    pub targets: Vec<MotorPosition>,
}

impl Default for DisturbanceConfig {
    fn default() -> Self {
        Self {
            threshold: 15.0,
            force: Vector3::new(0.0, 0.0001, 0.0),
            frame: ReferenceFrame::Inertial,
            policy: DisturbancePolicy::Doubling,
            targets: vec![MotorPosition::BackLeft, MotorPosition::BackRight],
        }
    }
}

impl DisturbanceConfig {
    /// A schedule that never fires.
    pub fn disabled() -> Self {
        Self {
            threshold: f64::INFINITY,
            ..Default::default()
        }
    }
}
