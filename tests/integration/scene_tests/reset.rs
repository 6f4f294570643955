use approx::assert_relative_eq;
use dzhanibekov::{physics::PhysicsEngine, SimulationScene};
use pretty_assertions::assert_eq;

use crate::common::{
    assert_at_rest, assert_transform_eq, assert_telemetry_valid, early_disturbance_config,
};

#[test]
fn test_reset_matches_fresh_scene() {
    let config = early_disturbance_config(1.0);

    let mut used = SimulationScene::from_config(&config).unwrap();
    used.reset();
    used.run(150);
    used.reset();

    let mut fresh = SimulationScene::from_config(&config).unwrap();
    fresh.reset();

    assert_eq!(used.telemetry(), fresh.telemetry());
    assert_eq!(used.drone().controllers(), fresh.drone().controllers());
    assert_eq!(used.drone().setpoint(), fresh.drone().setpoint());

    let used_reports = used.run(80);
    let fresh_reports = fresh.run(80);
    for (a, b) in used_reports.iter().zip(&fresh_reports) {
        assert_eq!(a.tick, b.tick);
        assert_eq!(a.disturbance, b.disturbance);
    }

    let (a, b) = (used.telemetry(), fresh.telemetry());
    assert_telemetry_valid(&a);
    assert_relative_eq!(a.position, b.position, epsilon = 1e-9);
    assert_relative_eq!(a.angular_velocity, b.angular_velocity, epsilon = 1e-9);
    assert_eq!(a.thrusts, b.thrusts);
}

#[test]
fn test_reset_mid_disturbance_rearms_schedule() {
    let mut scene = SimulationScene::from_config(&early_disturbance_config(0.5)).unwrap();
    scene.reset();
    scene.run(45);
    assert!(scene.disturbance().ticks_past() > 0);

    scene.reset();
    assert_eq!(scene.disturbance().ticks_past(), 0);
    assert_eq!(scene.elapsed(), 0.0);

    let first = scene.step();
    assert_eq!(first.tick, 1);
    assert_eq!(first.disturbance, None);
}

#[test]
fn test_reset_returns_drone_home_at_rest() {
    let mut scene = SimulationScene::from_config(&early_disturbance_config(0.2)).unwrap();
    scene.reset();
    scene.run(60);
    assert!(scene.telemetry().angular_velocity.norm() > 0.0);

    scene.reset();

    let home = *scene.home();
    let drone = scene.drone();
    let world = scene.world();
    for module in drone.modules() {
        assert_at_rest(module, world);
        assert_transform_eq(
            &module.transform(world),
            &(home * module.local_transform()),
            1e-12,
        );
    }
    assert!(drone.is_armed());
    assert_relative_eq!(drone.setpoint().unwrap().altitude, home.translation.vector.y);
    assert_eq!(world.body_count(), 6);
}
