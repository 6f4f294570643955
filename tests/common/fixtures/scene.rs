use dzhanibekov::{
    components::PidGains,
    resources::{DisturbanceConfig, SceneConfig},
};
use nalgebra::Vector3;

/// Base disturbance force used across the scene tests [N].
pub const TEST_DISTURBANCE: Vector3<f64> = Vector3::new(0.0, 1e-4, 0.0);

/// Default scene with the disturbance switched off.
pub fn quiet_scene_config() -> SceneConfig {
    SceneConfig {
        disturbance: DisturbanceConfig::disabled(),
        ..Default::default()
    }
}

/// 0.1 s ticks with the disturbance crossing at 15 s, i.e. on tick 151.
pub fn coarse_scene_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.physics.timestep = 0.1;
    config.disturbance = DisturbanceConfig {
        threshold: 15.0,
        force: TEST_DISTURBANCE,
        ..Default::default()
    };
    config
}

/// Altitude hold reduced to gravity feed-forward only.
pub fn no_hover_gain_config() -> SceneConfig {
    let mut config = SceneConfig::default();
    config.drone.controllers = config.drone.controllers.with_hover(PidGains::zero());
    config
}

/// Early, short disturbance so a run crosses it within a few seconds.
pub fn early_disturbance_config(threshold: f64) -> SceneConfig {
    let mut config = SceneConfig::default();
    config.disturbance.threshold = threshold;
    config
}
