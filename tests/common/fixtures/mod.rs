mod drone;
mod scene;

pub use drone::*;
pub use scene::*;
