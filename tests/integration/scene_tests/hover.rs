use approx::assert_relative_eq;
use dzhanibekov::SimulationScene;

use crate::common::{assert_telemetry_valid, frame_altitude, quiet_scene_config};

#[test]
fn test_hover_holds_altitude() {
    let mut scene = SimulationScene::from_config(&quiet_scene_config()).unwrap();
    scene.reset();
    let start = frame_altitude(&scene);

    // Ten simulated seconds
    scene.run(600);

    let telemetry = scene.telemetry();
    assert_telemetry_valid(&telemetry);
    assert_relative_eq!(telemetry.position.y, start, epsilon = 0.05);
    assert!(telemetry.attitude.pitch.abs() < 1e-3);
    assert!(telemetry.attitude.roll.abs() < 1e-3);
}

#[test]
fn test_hover_recovers_from_displacement() {
    let mut scene = SimulationScene::from_config(&quiet_scene_config()).unwrap();
    scene.reset();
    let target = frame_altitude(&scene);

    {
        let (drone, world) = scene.parts_mut();
        let mut pose = *drone.home();
        pose.translation.vector.y -= 0.5;
        drone.set_transform(world, pose);
    }

    scene.run(60 * 30);
    assert_relative_eq!(frame_altitude(&scene), target, epsilon = 0.05);
}

#[test]
fn test_unarmed_drone_lands_on_floor() {
    let mut scene = SimulationScene::from_config(&quiet_scene_config()).unwrap();
    scene.parts_mut().0.reset();

    scene.run(60 * 5);

    let telemetry = scene.telemetry();
    assert_telemetry_valid(&telemetry);
    assert_eq!(telemetry.thrusts, [0.0; 4]);
    // Floor top face is at 0.5 m
    assert!(
        telemetry.position.y > 0.5 && telemetry.position.y < 0.6,
        "frame came to rest at {}",
        telemetry.position.y
    );
}
