use crate::components::{ControllerBank, Drone};
use crate::physics::{BodyDesc, BodyHandle, PhysicsEngine, RigidBodyWorld};
use crate::resources::{SceneConfig, SceneError};
use crate::systems::{Attitude, DisturbanceSchedule};
use nalgebra::{Isometry3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Outcome of one fixed-timestep tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    /// 1-based tick count since the last reset
    pub tick: u64,
    /// Simulated time since the last reset, after this tick's physics step [s]
    pub elapsed: f64,
    /// Scripted force applied to each target motor on this tick, if any
    pub disturbance: Option<Vector3<f64>>,
}

/// Snapshot of the drone state for logging and analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub tick: u64,
    pub elapsed: f64,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
    pub attitude: Attitude,
    pub angular_velocity: Vector3<f64>,
    pub thrusts: [f64; 4],
    pub armed: bool,
}

/// Physics world, floor and drone driven by a fixed-timestep loop.
///
/// Each tick runs the drone's control phase, then the scripted disturbance,
/// then the physics step.
#[derive(Debug)]
pub struct SimulationScene<W: PhysicsEngine = RigidBodyWorld> {
    world: W,
    drone: Drone,
    floor: BodyHandle,
    disturbance: DisturbanceSchedule,
    timestep: f64,
    home: Isometry3<f64>,
    /// World time at the last reset
    start_time: f64,
    tick: u64,
}

impl SimulationScene<RigidBodyWorld> {
    /// Builds a scene on the reference physics world.
    pub fn from_config(config: &SceneConfig) -> Result<Self, SceneError> {
        Self::new(RigidBodyWorld::new(config.physics.clone()), config)
    }
}

impl<W: PhysicsEngine> SimulationScene<W> {
    /// Validates `config`, builds the floor and the drone in `world`, places the
    /// drone at its home pose and arms hover.
    ///
    /// An invalid config is rejected before any body is created.
    pub fn new(mut world: W, config: &SceneConfig) -> Result<Self, SceneError> {
        config.validate()?;
        let floor = world.create_rigid_body(
            BodyDesc::static_box(config.floor_half_extents, Isometry3::identity())
                .with_bounciness(config.floor_bounciness),
        )?;

        let home = Isometry3::translation(0.0, config.initial_height, 0.0);
        let controllers = ControllerBank::new(&config.drone.controllers);
        let mut drone = match Drone::new(&config.drone, controllers, &mut world, home) {
            Ok(drone) => drone,
            Err(err) => {
                world.destroy_rigid_body(floor);
                return Err(err.into());
            }
        };
        drone.set_transform(&mut world, home);
        drone.hover(&world);

        info!(
            "Scene ready: drone at {:.2} m, timestep {:.4} s, disturbance after {} s",
            config.initial_height, config.physics.timestep, config.disturbance.threshold
        );

        Ok(Self {
            start_time: world.time(),
            world,
            drone,
            floor,
            disturbance: DisturbanceSchedule::new(config.disturbance.clone()),
            timestep: config.physics.timestep,
            home,
            tick: 0,
        })
    }

    /// Advances the scene by one fixed timestep.
    pub fn step(&mut self) -> StepReport {
        self.tick += 1;
        self.drone.update_physics(&mut self.world, self.timestep);

        let elapsed = self.elapsed();
        let disturbance = self.disturbance.apply(elapsed, &self.drone, &mut self.world);

        self.world.step(self.timestep);

        StepReport {
            tick: self.tick,
            elapsed: self.elapsed(),
            disturbance,
        }
    }

    /// Steps `ticks` times and returns every report.
    pub fn run(&mut self, ticks: usize) -> Vec<StepReport> {
        (0..ticks).map(|_| self.step()).collect()
    }

    /// Returns to the post-construction state: elapsed time zeroed, controllers
    /// cleared, drone at home at rest with hover re-armed, disturbance re-armed.
    pub fn reset(&mut self) {
        self.start_time = self.world.time();
        self.tick = 0;
        self.drone.reset();
        self.drone.set_transform(&mut self.world, self.home);
        self.drone.hover(&self.world);
        self.disturbance.reset();
        debug!("Scene reset at world time {:.4} s", self.start_time);
    }

    /// Simulated time since the last reset [s].
    pub fn elapsed(&self) -> f64 {
        self.world.time() - self.start_time
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn timestep(&self) -> f64 {
        self.timestep
    }

    pub fn home(&self) -> &Isometry3<f64> {
        &self.home
    }

    pub fn floor(&self) -> BodyHandle {
        self.floor
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn drone(&self) -> &Drone {
        &self.drone
    }

    /// Split borrow for driving the drone directly between ticks.
    pub fn parts_mut(&mut self) -> (&mut Drone, &mut W) {
        (&mut self.drone, &mut self.world)
    }

    pub fn disturbance(&self) -> &DisturbanceSchedule {
        &self.disturbance
    }

    pub fn telemetry(&self) -> Telemetry {
        let frame = self.drone.frame();
        let transform = frame.transform(&self.world);
        Telemetry {
            tick: self.tick,
            elapsed: self.elapsed(),
            position: transform.translation.vector,
            velocity: frame.linear_velocity(&self.world),
            attitude: Attitude::from_orientation(&transform.rotation),
            angular_velocity: frame.angular_velocity(&self.world),
            thrusts: self.drone.last_thrusts(),
            armed: self.drone.is_armed(),
        }
    }

    /// Releases the drone and floor bodies and hands the world back.
    pub fn into_world(self) -> W {
        let Self {
            mut world,
            drone,
            floor,
            ..
        } = self;
        drone.destroy(&mut world);
        world.destroy_rigid_body(floor);
        world
    }
}
