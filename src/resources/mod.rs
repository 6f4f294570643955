pub mod config;
pub mod errors;

pub use config::{
    ControllerBankConfig, DisturbanceConfig, DisturbancePolicy, DroneConfig, PhysicsConfig,
    SceneConfig, DEFAULT_HOVER_GAINS,
};
pub use errors::{ConfigError, SceneError};
