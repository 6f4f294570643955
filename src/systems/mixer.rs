use crate::components::MotorPosition;
use serde::{Deserialize, Serialize};

/// Per-axis outputs of one control tick, already in thrust units [N].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisCommands {
    /// Thrust every motor produces before corrections
    pub baseline: f64,
    /// Positive lifts the nose
    pub pitch: f64,
    /// Positive lifts the right side
    pub roll: f64,
    /// Positive turns the heading counter-clockwise seen from above
    pub yaw: f64,
}

/// Fixed linear mixing law, motors in [`MotorPosition::ALL`] order.
///
/// Independent scalar corrections are summed per motor rather than solving
/// the coupled allocation problem.
pub fn mix(commands: &AxisCommands) -> [f64; 4] {
    MotorPosition::ALL.map(|motor| {
        let pitch = if motor.is_front() {
            commands.pitch
        } else {
            -commands.pitch
        };
        let roll = if motor.is_right() {
            commands.roll
        } else {
            -commands.roll
        };
        commands.baseline + pitch + roll + motor.rotor_sign() * commands.yaw
    })
}
