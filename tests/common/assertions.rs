use approx::assert_relative_eq;
use dzhanibekov::{components::DroneModule, physics::PhysicsEngine, Telemetry};
use nalgebra::{Isometry3, Vector3};

/// Assert that two transforms match in translation and rotation
#[track_caller]
pub fn assert_transform_eq(actual: &Isometry3<f64>, expected: &Isometry3<f64>, epsilon: f64) {
    assert_relative_eq!(
        actual.translation.vector,
        expected.translation.vector,
        epsilon = epsilon
    );
    let angle = actual.rotation.angle_to(&expected.rotation);
    assert!(
        angle < epsilon,
        "Rotation differs by {} rad: {:?} vs {:?}",
        angle,
        actual.rotation,
        expected.rotation
    );
}

/// Assert that a module's body carries no linear or angular velocity
#[track_caller]
pub fn assert_at_rest<W: PhysicsEngine>(module: &DroneModule, world: &W) {
    assert_eq!(
        module.linear_velocity(world),
        Vector3::zeros(),
        "{:?} still moving",
        module.role()
    );
    assert_eq!(
        module.angular_velocity(world),
        Vector3::zeros(),
        "{:?} still rotating",
        module.role()
    );
}

/// Assert that every telemetry value is finite
#[track_caller]
pub fn assert_telemetry_valid(telemetry: &Telemetry) {
    assert!(
        telemetry.position.iter().all(|x| x.is_finite()),
        "Position is not finite"
    );
    assert!(
        telemetry.velocity.iter().all(|x| x.is_finite()),
        "Velocity is not finite"
    );
    assert!(
        telemetry.angular_velocity.iter().all(|x| x.is_finite()),
        "Angular velocity is not finite"
    );
    assert!(telemetry.attitude.pitch.is_finite(), "Pitch is not finite");
    assert!(telemetry.attitude.roll.is_finite(), "Roll is not finite");
    assert!(telemetry.attitude.yaw.is_finite(), "Yaw is not finite");
    assert!(
        telemetry.thrusts.iter().all(|x| x.is_finite()),
        "Motor thrust is not finite"
    );
}
