use dzhanibekov::resources::{DroneConfig, PhysicsConfig};
use nalgebra::{Isometry3, Vector3};

pub fn test_drone_config() -> DroneConfig {
    DroneConfig::default()
}

/// Physics world that refuses bodies past `max_bodies`.
pub fn limited_physics_config(max_bodies: usize) -> PhysicsConfig {
    PhysicsConfig {
        max_bodies,
        ..Default::default()
    }
}

/// Arbitrary tilted pose away from the origin.
pub fn tilted_pose() -> Isometry3<f64> {
    Isometry3::new(Vector3::new(1.5, 3.0, -2.0), Vector3::new(0.1, -0.4, 0.25))
}
