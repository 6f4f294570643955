use dzhanibekov::{
    components::MotorPosition, physics::PhysicsEngine, resources::SceneConfig, SimulationScene,
};
use pretty_assertions::assert_eq;

use crate::common::{
    angular_speed, assert_telemetry_valid, coarse_scene_config, early_disturbance_config,
    no_hover_gain_config, run_until, RecordingWorld, TEST_DISTURBANCE,
};

fn recording_scene(config: &SceneConfig) -> SimulationScene<RecordingWorld> {
    let world = RecordingWorld::new(config.physics.clone());
    let mut scene = SimulationScene::new(world, config).unwrap();
    scene.reset();
    scene
}

#[test]
fn test_disturbance_starts_one_tick_past_threshold() {
    let mut scene = SimulationScene::from_config(&coarse_scene_config()).unwrap();
    scene.reset();

    // 15.0 s / 0.1 s = 150 ticks, none of which is disturbed
    let quiet = run_until(&mut scene, 150);
    assert!(quiet.iter().all(|report| report.disturbance.is_none()));

    let reports = scene.run(3);
    assert_eq!(reports[0].tick, 151);
    assert_eq!(reports[0].disturbance, Some(TEST_DISTURBANCE));
    assert_eq!(reports[1].disturbance, Some(TEST_DISTURBANCE * 2.0));
    assert_eq!(reports[2].disturbance, Some(TEST_DISTURBANCE * 4.0));
}

#[test]
fn test_disturbance_lands_on_back_motors_only() {
    let mut scene = recording_scene(&coarse_scene_config());
    run_until(&mut scene, 152);

    let motors: Vec<_> = MotorPosition::ALL
        .iter()
        .map(|position| scene.drone().motor(*position).body())
        .collect();
    let world = scene.world();

    for (tick, expected) in [(151, TEST_DISTURBANCE), (152, TEST_DISTURBANCE * 2.0)] {
        for (position, body) in MotorPosition::ALL.iter().zip(&motors) {
            let hits = world
                .forces_on(tick, *body)
                .into_iter()
                .filter(|force| *force == expected)
                .count();
            let wanted = if position.is_front() { 0 } else { 1 };
            assert_eq!(hits, wanted, "{} on tick {}", position, tick);
        }
    }

    // Tick 150 only carries thrust, one force per motor
    for body in &motors {
        assert_eq!(world.forces_on(150, *body).len(), 1);
    }
    assert_eq!(world.forces_on(151, scene.drone().frame().body()).len(), 0);
}

#[test]
fn test_disturbance_injects_instability() {
    let mut scene = SimulationScene::from_config(&no_hover_gain_config()).unwrap();
    scene.reset();

    let threshold_tick =
        (scene.disturbance().config().threshold / scene.timestep()).round() as u64 + 1;
    let quiet = run_until(&mut scene, threshold_tick - 1);
    assert!(quiet.iter().all(|report| report.disturbance.is_none()));

    let report = scene.step();
    assert!(report.disturbance.is_some());
    let at_threshold = angular_speed(&scene);

    scene.run(20);
    let after = angular_speed(&scene);
    assert!(
        after > at_threshold,
        "angular speed went from {} to {}",
        at_threshold,
        after
    );
}

#[test]
fn test_assembly_holds_together_under_runaway_disturbance() {
    let mut scene = SimulationScene::from_config(&early_disturbance_config(0.0)).unwrap();
    scene.reset();

    // 199 doublings take the force far past anything the frame can balance
    run_until(&mut scene, 199);
    let before = scene.drone().frame().transform(scene.world()).translation.vector;
    let report = scene.step();
    assert!(report.disturbance.is_some());

    let world = scene.world();
    let frame = scene.drone().frame().transform(world);
    for motor in scene.drone().motors() {
        let separation = (motor.transform(world).translation.vector - frame.translation.vector).norm();
        assert!(
            (separation - motor.local_transform().translation.vector.norm()).abs() < 1e-9,
            "{:?} drifted to {} m from the frame",
            motor.role(),
            separation
        );
    }

    let moved = (frame.translation.vector - before).norm();
    assert!(moved > 0.0, "frame stopped moving");
    assert!(moved <= world.config().max_velocity * scene.timestep() * 2.0);
    assert_telemetry_valid(&scene.telemetry());
}

#[test]
fn test_disturbance_follows_frame_in_body_mode() {
    use dzhanibekov::physics::components::ReferenceFrame;
    use nalgebra::{Isometry3, Vector3};

    let mut config = coarse_scene_config();
    config.disturbance.frame = ReferenceFrame::Body;
    config.disturbance.threshold = 0.0;
    config.disturbance.force = Vector3::new(0.0, 0.0, -1e-3);
    let mut scene = recording_scene(&config);

    // Yawed a quarter turn: body -Z becomes world -X
    let pose = Isometry3::new(Vector3::new(0.0, 5.0, 0.0), Vector3::y() * std::f64::consts::FRAC_PI_2);
    {
        let (drone, world) = scene.parts_mut();
        drone.set_transform(world, pose);
    }
    scene.step();

    let back_left = scene.drone().motor(MotorPosition::BackLeft).body();
    let forces = scene.world().forces_on(1, back_left);
    assert!(forces
        .iter()
        .any(|f| (f - Vector3::new(-1e-3, 0.0, 0.0)).norm() < 1e-12));
    assert_eq!(scene.world().body_count(), 6);
}
