use crate::components::drone::module::{DroneModule, ModuleRole, MotorPosition};
use crate::components::{ControllerBank, ControllerRole};
use crate::physics::{BodyDesc, BodyHandle, PhysicsEngine, PhysicsError};
use crate::resources::DroneConfig;
use crate::systems::{mix, wrap_angle, Attitude, AxisCommands};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Frame plate thickness relative to its edge length.
const FRAME_THICKNESS_RATIO: f64 = 0.1;
/// Motor can height relative to the propeller radius.
const MOTOR_HEIGHT_RATIO: f64 = 0.5;

/// Targets latched by [`Drone::hover`]. Pitch and roll always aim for level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Setpoint {
    pub altitude: f64,
    pub yaw: f64,
}

/// Quad-rotor built from one frame body and four welded motor bodies.
#[derive(Debug)]
pub struct Drone {
    frame: DroneModule,
    motors: [DroneModule; 4],
    controllers: ControllerBank,
    config: DroneConfig,
    home: Isometry3<f64>,
    setpoint: Option<Setpoint>,
    last_commands: AxisCommands,
    last_thrusts: [f64; 4],
}

impl Drone {
    /// Allocates the frame and motor bodies around `home`.
    ///
    /// On failure every body already created is released before the error is
    /// returned, so the world is left as it was.
    pub fn new<W: PhysicsEngine>(
        config: &DroneConfig,
        controllers: ControllerBank,
        world: &mut W,
        home: Isometry3<f64>,
    ) -> Result<Self, PhysicsError> {
        let frame_half = Vector3::new(
            config.frame_size / 2.0,
            config.frame_size * FRAME_THICKNESS_RATIO / 2.0,
            config.frame_size / 2.0,
        );
        let motor_half = Vector3::new(
            config.propeller_radius,
            config.propeller_radius * MOTOR_HEIGHT_RATIO / 2.0,
            config.propeller_radius,
        );

        let mut layout = vec![(
            ModuleRole::Frame,
            Isometry3::identity(),
            BodyDesc::dynamic_box(frame_half, config.frame_mass, home),
        )];
        for position in MotorPosition::ALL {
            // Motors sit on top of the frame corners
            let offset = position.local_offset(config.frame_size)
                + Vector3::y() * (frame_half.y + motor_half.y);
            let local = Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity());
            layout.push((
                ModuleRole::Motor(position),
                local,
                BodyDesc::dynamic_box(motor_half, config.motor_mass, home * local),
            ));
        }

        let mut modules: Vec<DroneModule> = Vec::with_capacity(layout.len());
        for (role, local, desc) in layout {
            match world.create_rigid_body(desc) {
                Ok(body) => modules.push(DroneModule::new(role, body, local)),
                Err(err) => {
                    warn!("Drone body allocation failed for {:?}: {}", role, err);
                    release_all(world, modules);
                    return Err(err);
                }
            }
        }

        let frame_body = modules[0].body();
        for motor in &modules[1..] {
            if let Err(err) = world.weld(motor.body(), frame_body) {
                warn!("Failed to weld {:?} to the frame: {}", motor.role(), err);
                release_all(world, modules);
                return Err(err);
            }
        }

        let frame = modules.remove(0);
        let motors: [DroneModule; 4] = modules
            .try_into()
            .unwrap_or_else(|_| unreachable!("four motor modules allocated above"));

        debug!(
            "Drone assembled: frame {:?}, {} motors",
            frame.body(),
            motors.len()
        );

        Ok(Self {
            frame,
            motors,
            controllers,
            config: config.clone(),
            home,
            setpoint: None,
            last_commands: AxisCommands::default(),
            last_thrusts: [0.0; 4],
        })
    }

    /// Runs one control tick and queues motor forces on the world.
    ///
    /// An unarmed drone produces no thrust.
    ///
    /// # Panics
    /// If `dt` is not strictly positive.
    pub fn update_physics<W: PhysicsEngine>(&mut self, world: &mut W, dt: f64) {
        assert!(dt > 0.0, "drone control timestep must be positive, got {}", dt);

        let Some(setpoint) = self.setpoint else {
            self.last_commands = AxisCommands::default();
            self.last_thrusts = [0.0; 4];
            return;
        };

        let frame_transform = self.frame.transform(world);
        let attitude = Attitude::from_orientation(&frame_transform.rotation);
        let altitude = frame_transform.translation.vector.y;

        let scale = self.config.attitude_output_scale;
        let pitch = self.controllers[ControllerRole::Pitch].evaluate(-attitude.pitch, dt);
        let roll = self.controllers[ControllerRole::Roll].evaluate(-attitude.roll, dt);
        let yaw = self.controllers[ControllerRole::Yaw]
            .evaluate(wrap_angle(setpoint.yaw - attitude.yaw), dt);
        let collective =
            self.controllers[ControllerRole::Hover].evaluate(setpoint.altitude - altitude, dt);

        let commands = AxisCommands {
            baseline: (self.weight(world) + collective) / 4.0,
            pitch: pitch * scale,
            roll: roll * scale,
            yaw: yaw * scale,
        };
        let thrusts = mix(&commands);

        let up = frame_transform.rotation * Vector3::y();
        for (motor, thrust) in self.motors.iter().zip(thrusts) {
            let sign = match motor.role() {
                ModuleRole::Motor(position) => position.rotor_sign(),
                ModuleRole::Frame => 0.0,
            };
            motor.apply_force(world, up * thrust);
            motor.apply_torque(world, up * (sign * self.config.rotor_torque_ratio * thrust));
        }

        self.last_commands = commands;
        self.last_thrusts = thrusts;
    }

    /// Arms altitude hold at the current altitude and heading.
    ///
    /// Calling it again re-latches the targets.
    pub fn hover<W: PhysicsEngine>(&mut self, world: &W) {
        let transform = self.frame.transform(world);
        let setpoint = Setpoint {
            altitude: transform.translation.vector.y,
            yaw: Attitude::from_orientation(&transform.rotation).yaw,
        };
        info!(
            "Hover latched at altitude {:.3} m, heading {:.3} rad",
            setpoint.altitude, setpoint.yaw
        );
        self.setpoint = Some(setpoint);
    }

    /// Clears controller state and disarms. Bodies are not moved.
    pub fn reset(&mut self) {
        self.controllers.reset();
        self.setpoint = None;
        self.last_commands = AxisCommands::default();
        self.last_thrusts = [0.0; 4];
    }

    /// Teleports the frame to `transform`, carrying the motors along and
    /// zeroing every module's velocity.
    pub fn set_transform<W: PhysicsEngine>(&self, world: &mut W, transform: Isometry3<f64>) {
        for module in self.modules() {
            module.place(world, &transform);
        }
    }

    /// Releases every module body back to the world.
    pub fn destroy<W: PhysicsEngine>(self, world: &mut W) {
        let Self { frame, motors, .. } = self;
        release_all(world, std::iter::once(frame).chain(motors));
    }

    /// Total weight of the assembly in the world's gravity [N].
    pub fn weight<W: PhysicsEngine>(&self, world: &W) -> f64 {
        let mass: f64 = self.modules().iter().map(|m| world.mass(m.body())).sum();
        mass * world.gravity().norm()
    }

    pub fn frame(&self) -> &DroneModule {
        &self.frame
    }

    /// Motors in front-left, front-right, back-left, back-right order.
    pub fn motors(&self) -> &[DroneModule; 4] {
        &self.motors
    }

    pub fn motor(&self, position: MotorPosition) -> &DroneModule {
        &self.motors[position.index()]
    }

    /// Frame first, then the motors in positional order.
    pub fn modules(&self) -> [&DroneModule; 5] {
        [
            &self.frame,
            &self.motors[0],
            &self.motors[1],
            &self.motors[2],
            &self.motors[3],
        ]
    }

    pub fn bodies(&self) -> [BodyHandle; 5] {
        self.modules().map(DroneModule::body)
    }

    pub fn controllers(&self) -> &ControllerBank {
        &self.controllers
    }

    pub fn config(&self) -> &DroneConfig {
        &self.config
    }

    pub fn home(&self) -> &Isometry3<f64> {
        &self.home
    }

    pub fn setpoint(&self) -> Option<Setpoint> {
        self.setpoint
    }

    pub fn is_armed(&self) -> bool {
        self.setpoint.is_some()
    }

    pub fn last_commands(&self) -> &AxisCommands {
        &self.last_commands
    }

    /// Thrust commanded on the last control tick, positional order [N].
    pub fn last_thrusts(&self) -> [f64; 4] {
        self.last_thrusts
    }

    pub fn attitude<W: PhysicsEngine>(&self, world: &W) -> Attitude {
        Attitude::from_orientation(&self.frame.transform(world).rotation)
    }
}

fn release_all<W: PhysicsEngine>(world: &mut W, modules: impl IntoIterator<Item = DroneModule>) {
    for module in modules {
        module.release(world);
    }
}
