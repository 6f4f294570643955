use approx::assert_relative_eq;
use dzhanibekov::{systems::Attitude, SimulationScene};
use nalgebra::{Isometry3, Unit, UnitQuaternion, Vector3};

use crate::common::{assert_telemetry_valid, quiet_scene_config};

const TILT: f64 = 0.2;

/// Hovering scene teleported to home rotated by `angle` about `axis`.
fn scene_rotated_about(axis: Unit<Vector3<f64>>, angle: f64) -> SimulationScene {
    let mut scene = SimulationScene::from_config(&quiet_scene_config()).unwrap();
    scene.reset();

    let home = *scene.home();
    let pose = Isometry3::from_parts(home.translation, UnitQuaternion::from_axis_angle(&axis, angle));
    let (drone, world) = scene.parts_mut();
    drone.set_transform(world, pose);
    scene
}

fn run_seconds(scene: &mut SimulationScene, seconds: f64) -> Attitude {
    let ticks = (seconds / scene.timestep()).round() as usize;
    scene.run(ticks);
    let telemetry = scene.telemetry();
    assert_telemetry_valid(&telemetry);
    telemetry.attitude
}

#[test]
fn test_pitch_recovers_to_level() {
    let mut scene = scene_rotated_about(Vector3::x_axis(), TILT);
    assert_relative_eq!(scene.telemetry().attitude.pitch, TILT, epsilon = 1e-9);

    let attitude = run_seconds(&mut scene, 6.0);
    assert!(attitude.pitch.abs() < 0.01, "pitch still {}", attitude.pitch);
    assert!(attitude.roll.abs() < 0.01);
}

#[test]
fn test_roll_recovers_to_level() {
    let mut scene = scene_rotated_about(Vector3::z_axis(), TILT);
    assert_relative_eq!(scene.telemetry().attitude.roll, TILT, epsilon = 1e-9);

    let attitude = run_seconds(&mut scene, 6.0);
    assert!(attitude.roll.abs() < 0.01, "roll still {}", attitude.roll);
    assert!(attitude.pitch.abs() < 0.01);
}

#[test]
fn test_yaw_returns_to_latched_heading() {
    let mut scene = scene_rotated_about(Vector3::y_axis(), TILT);
    assert_relative_eq!(scene.drone().setpoint().unwrap().yaw, 0.0);
    assert_relative_eq!(scene.telemetry().attitude.yaw, TILT, epsilon = 1e-9);

    let attitude = run_seconds(&mut scene, 12.0);
    assert!(attitude.yaw.abs() < 0.02, "yaw still {}", attitude.yaw);
}
