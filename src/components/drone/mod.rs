mod assembly;
mod module;

pub use assembly::{Drone, Setpoint};
pub use module::{DroneModule, ModuleRole, MotorPosition};
