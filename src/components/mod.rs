mod controllers;
pub mod drone;
mod pid;
mod spatial;

pub use controllers::{ControllerBank, ControllerRole, UnknownRoleError};
pub use drone::{Drone, DroneModule, ModuleRole, MotorPosition, Setpoint};
pub use pid::{PidController, PidGains};
pub use spatial::SpatialComponent;
