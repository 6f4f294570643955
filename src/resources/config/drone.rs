use crate::components::PidGains;
use serde::{Deserialize, Serialize};

/// Altitude-hold tuning shared by every drone variant unless overridden.
pub const DEFAULT_HOVER_GAINS: PidGains = PidGains {
    p: 0.7,
    i: 0.35,
    d: 0.35,
    integral_limit: None,
};

fn default_hover_gains() -> PidGains {
    DEFAULT_HOVER_GAINS
}

/// Gains for the four controllers of a [`ControllerBank`](crate::components::ControllerBank).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControllerBankConfig {
    pub pitch: PidGains,
    pub roll: PidGains,
    pub yaw: PidGains,
    #[serde(default = "default_hover_gains")]
    pub hover: PidGains,
}

impl ControllerBankConfig {
    /// Attitude gains given explicitly, altitude gains from [`DEFAULT_HOVER_GAINS`].
    pub fn new(pitch: PidGains, roll: PidGains, yaw: PidGains) -> Self {
        Self {
            pitch,
            roll,
            yaw,
            hover: DEFAULT_HOVER_GAINS,
        }
    }

    pub fn with_hover(mut self, hover: PidGains) -> Self {
        self.hover = hover;
        self
    }
}

impl Default for ControllerBankConfig {
    fn default() -> Self {
        let gains = PidGains::new(0.7, 0.35, 0.35);
        Self::new(gains, gains, gains)
    }
}

/// Geometry, mass and control-output parameters of the quad-rotor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneConfig {
    /// Edge length of the square frame [m]
    pub frame_size: f64,
    /// Frame mass [kg]
    pub frame_mass: f64,
    /// Mass of each motor [kg]
    pub motor_mass: f64,
    /// Propeller radius, also the half-width of a motor body [m]
    pub propeller_radius: f64,
    /// Attitude PID outputs are multiplied by this before mixing [N per unit output]
    pub attitude_output_scale: f64,
    /// Rotor reaction torque per Newton of thrust [m]
    pub rotor_torque_ratio: f64,
    pub controllers: ControllerBankConfig,
}

impl Default for DroneConfig {
    fn default() -> Self {
        Self {
            frame_size: 0.088,
            frame_mass: 0.12,
            motor_mass: 0.01,
            propeller_radius: 0.02,
            attitude_output_scale: 0.01,
            rotor_torque_ratio: 0.05,
            controllers: ControllerBankConfig::default(),
        }
    }
}

impl DroneConfig {
    pub fn total_mass(&self) -> f64 {
        self.frame_mass + 4.0 * self.motor_mass
    }
}
