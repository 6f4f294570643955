use dzhanibekov::{resources::SceneConfig, SimulationScene};
use std::{env, error::Error, path::Path};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Simulated seconds run when no tick count is given.
const DEFAULT_DURATION: f64 = 20.0;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Usage: bolt [config.yaml] [ticks]
    let args: Vec<String> = env::args().collect();
    let config = match args.get(1) {
        Some(path) => SceneConfig::load(Path::new(path))?,
        None => SceneConfig::default(),
    };
    let ticks = match args.get(2) {
        Some(ticks) => ticks.parse::<usize>()?,
        None => (DEFAULT_DURATION / config.physics.timestep).round() as usize,
    };

    let mut scene = SimulationScene::from_config(&config)?;
    scene.reset();

    let ticks_per_second = (1.0 / config.physics.timestep).round().max(1.0) as u64;
    println!("{}", serde_json::to_string(&scene.telemetry())?);
    for _ in 0..ticks {
        let report = scene.step();
        if report.tick % ticks_per_second == 0 {
            println!("{}", serde_json::to_string(&scene.telemetry())?);
        }
    }

    let telemetry = scene.telemetry();
    info!(
        "Finished {} ticks: altitude {:.3} m, angular speed {:.3} rad/s",
        ticks,
        telemetry.position.y,
        telemetry.angular_velocity.norm()
    );
    Ok(())
}
