use super::{disturbance::DisturbanceConfig, drone::DroneConfig, physics::PhysicsConfig};
use crate::components::PidGains;
use crate::resources::errors::{ConfigError, Result};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to build a [`SimulationScene`](crate::scene::SimulationScene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub physics: PhysicsConfig,
    pub drone: DroneConfig,
    pub disturbance: DisturbanceConfig,
    /// Height of the frame's centre above the world origin at home [m]
    pub initial_height: f64,
    pub floor_half_extents: Vector3<f64>,
    pub floor_bounciness: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            drone: DroneConfig::default(),
            disturbance: DisturbanceConfig::default(),
            initial_height: 5.0,
            floor_half_extents: Vector3::new(50.0, 0.5, 50.0),
            floor_bounciness: 0.3,
        }
    }
}

impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )))
            }
        };

        positive("physics.timestep", self.physics.timestep)?;
        positive("physics.max_velocity", self.physics.max_velocity)?;
        positive("physics.max_angular_velocity", self.physics.max_angular_velocity)?;
        positive("drone.frame_size", self.drone.frame_size)?;
        positive("drone.frame_mass", self.drone.frame_mass)?;
        positive("drone.motor_mass", self.drone.motor_mass)?;
        positive("drone.propeller_radius", self.drone.propeller_radius)?;

        if !self.physics.gravity.iter().all(|g| g.is_finite()) {
            return Err(ConfigError::Invalid("physics.gravity must be finite".into()));
        }
        if self.physics.max_bodies < 6 {
            return Err(ConfigError::Invalid(
                "physics.max_bodies must leave room for the floor and five drone bodies".into(),
            ));
        }
        if self.floor_half_extents.iter().any(|e| !(*e > 0.0)) {
            return Err(ConfigError::Invalid(
                "floor_half_extents must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.floor_bounciness) {
            return Err(ConfigError::Invalid(
                "floor_bounciness must lie in [0, 1]".into(),
            ));
        }
        if self.disturbance.threshold.is_nan() || self.disturbance.threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "disturbance.threshold must be non-negative".into(),
            ));
        }

        let controllers = &self.drone.controllers;
        for (name, gains) in [
            ("pitch", controllers.pitch),
            ("roll", controllers.roll),
            ("yaw", controllers.yaw),
            ("hover", controllers.hover),
        ] {
            validate_gains(name, &gains)?;
        }

        Ok(())
    }
}

fn validate_gains(name: &str, gains: &PidGains) -> Result<()> {
    if ![gains.p, gains.i, gains.d].iter().all(|g| g.is_finite()) {
        return Err(ConfigError::Invalid(format!(
            "{} gains must be finite",
            name
        )));
    }
    if let Some(limit) = gains.integral_limit {
        if !(limit >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "{} integral_limit must be non-negative",
                name
            )));
        }
    }
    Ok(())
}
