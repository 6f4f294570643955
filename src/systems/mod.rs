mod attitude;
mod disturbance;
mod mixer;

pub use attitude::{wrap_angle, Attitude};
pub use disturbance::DisturbanceSchedule;
pub use mixer::{mix, AxisCommands};
