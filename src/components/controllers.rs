use crate::components::pid::PidController;
use crate::resources::config::ControllerBankConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// Control axis served by one controller of the bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerRole {
    Pitch,
    Roll,
    Yaw,
    Hover,
}

impl ControllerRole {
    pub const ALL: [ControllerRole; 4] = [
        ControllerRole::Pitch,
        ControllerRole::Roll,
        ControllerRole::Yaw,
        ControllerRole::Hover,
    ];
}

impl fmt::Display for ControllerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerRole::Pitch => "pitch",
            ControllerRole::Roll => "roll",
            ControllerRole::Yaw => "yaw",
            ControllerRole::Hover => "hover",
        };
        f.write_str(name)
    }
}

/// Name that matches no [`ControllerRole`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown controller role '{0}'")]
pub struct UnknownRoleError(pub String);

impl FromStr for ControllerRole {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pitch" => Ok(ControllerRole::Pitch),
            "roll" => Ok(ControllerRole::Roll),
            "yaw" => Ok(ControllerRole::Yaw),
            "hover" | "altitude" => Ok(ControllerRole::Hover),
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}

/// Exactly one PID controller per [`ControllerRole`], gains fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerBank {
    pitch: PidController,
    roll: PidController,
    yaw: PidController,
    hover: PidController,
}

impl ControllerBank {
    pub fn new(config: &ControllerBankConfig) -> Self {
        Self {
            pitch: PidController::new(config.pitch),
            roll: PidController::new(config.roll),
            yaw: PidController::new(config.yaw),
            hover: PidController::new(config.hover),
        }
    }

    /// Resets all four controllers.
    pub fn reset(&mut self) {
        for role in ControllerRole::ALL {
            self[role].reset();
        }
    }

    /// Controller for a role named at runtime.
    ///
    /// # Panics
    /// If `name` is not one of the four roles.
    pub fn by_name(&mut self, name: &str) -> &mut PidController {
        let role = name
            .parse::<ControllerRole>()
            .unwrap_or_else(|err| panic!("controller bank lookup failed: {}", err));
        &mut self[role]
    }
}

impl Index<ControllerRole> for ControllerBank {
    type Output = PidController;

    fn index(&self, role: ControllerRole) -> &PidController {
        match role {
            ControllerRole::Pitch => &self.pitch,
            ControllerRole::Roll => &self.roll,
            ControllerRole::Yaw => &self.yaw,
            ControllerRole::Hover => &self.hover,
        }
    }
}

impl IndexMut<ControllerRole> for ControllerBank {
    fn index_mut(&mut self, role: ControllerRole) -> &mut PidController {
        match role {
            ControllerRole::Pitch => &mut self.pitch,
            ControllerRole::Roll => &mut self.roll,
            ControllerRole::Yaw => &mut self.yaw,
            ControllerRole::Hover => &mut self.hover,
        }
    }
}
