pub mod components;
pub mod error;
pub mod traits;
mod world;

pub use error::PhysicsError;
pub use traits::{BodyDesc, BodyHandle, BodyType, PhysicsEngine};
pub use world::RigidBodyWorld;
