pub mod disturbance;
pub mod drone;
pub mod physics;
pub mod simulation;

pub use disturbance::{DisturbanceConfig, DisturbancePolicy};
pub use drone::{ControllerBankConfig, DroneConfig, DEFAULT_HOVER_GAINS};
pub use physics::PhysicsConfig;
pub use simulation::SceneConfig;
