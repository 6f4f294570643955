mod forces;
mod motion;
mod shape;

pub use forces::{Force, ForceSystem, Moment, ReferenceFrame};
pub use motion::{apply_velocity_limits, velocity_at_point, MassMember, MotionSystem};
pub use shape::BoxShape;
