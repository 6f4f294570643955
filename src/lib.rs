//! Quad-rotor control harness that reproduces intermediate-axis instability
//! with a scripted disturbance on a PID-stabilised drone.

pub mod components;
pub mod physics;
pub mod resources;
pub mod scene;
pub mod systems;

pub use scene::{SimulationScene, StepReport, Telemetry};
