use dzhanibekov::{
    physics::{BodyDesc, BodyHandle, BodyType, PhysicsEngine, PhysicsError, RigidBodyWorld},
    resources::PhysicsConfig,
    SimulationScene, StepReport,
};
use nalgebra::{Isometry3, Vector3};

/// Reference world that records every force applied between steps.
#[derive(Debug, Default)]
pub struct RecordingWorld {
    inner: RigidBodyWorld,
    pending: Vec<(BodyHandle, Vector3<f64>)>,
    /// Forces applied before each completed step, one entry per step
    pub history: Vec<Vec<(BodyHandle, Vector3<f64>)>>,
}

impl RecordingWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            inner: RigidBodyWorld::new(config),
            ..Default::default()
        }
    }

    /// Forces applied to `body` during the 1-based `tick`.
    pub fn forces_on(&self, tick: usize, body: BodyHandle) -> Vec<Vector3<f64>> {
        self.history[tick - 1]
            .iter()
            .filter(|(handle, _)| *handle == body)
            .map(|(_, force)| *force)
            .collect()
    }
}

impl PhysicsEngine for RecordingWorld {
    fn create_rigid_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        self.inner.create_rigid_body(desc)
    }

    fn destroy_rigid_body(&mut self, handle: BodyHandle) {
        self.inner.destroy_rigid_body(handle)
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.inner.contains(handle)
    }

    fn body_count(&self) -> usize {
        self.inner.body_count()
    }

    fn transform(&self, handle: BodyHandle) -> Isometry3<f64> {
        self.inner.transform(handle)
    }

    fn set_transform(&mut self, handle: BodyHandle, transform: Isometry3<f64>) {
        self.inner.set_transform(handle, transform)
    }

    fn set_body_type(&mut self, handle: BodyHandle, body_type: BodyType) {
        self.inner.set_body_type(handle, body_type)
    }

    fn mass(&self, handle: BodyHandle) -> f64 {
        self.inner.mass(handle)
    }

    fn apply_force_at_center_of_mass(&mut self, handle: BodyHandle, force: Vector3<f64>) {
        self.pending.push((handle, force));
        self.inner.apply_force_at_center_of_mass(handle, force)
    }

    fn apply_torque(&mut self, handle: BodyHandle, torque: Vector3<f64>) {
        self.inner.apply_torque(handle, torque)
    }

    fn linear_velocity(&self, handle: BodyHandle) -> Vector3<f64> {
        self.inner.linear_velocity(handle)
    }

    fn angular_velocity(&self, handle: BodyHandle) -> Vector3<f64> {
        self.inner.angular_velocity(handle)
    }

    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vector3<f64>) {
        self.inner.set_linear_velocity(handle, velocity)
    }

    fn set_angular_velocity(&mut self, handle: BodyHandle, velocity: Vector3<f64>) {
        self.inner.set_angular_velocity(handle, velocity)
    }

    fn weld(&mut self, child: BodyHandle, parent: BodyHandle) -> Result<(), PhysicsError> {
        self.inner.weld(child, parent)
    }

    fn gravity(&self) -> Vector3<f64> {
        self.inner.gravity()
    }

    fn step(&mut self, dt: f64) {
        self.history.push(std::mem::take(&mut self.pending));
        self.inner.step(dt)
    }

    fn time(&self) -> f64 {
        self.inner.time()
    }
}

/// Steps the scene until its tick counter reaches `tick`, returning the reports.
pub fn run_until<W: PhysicsEngine>(scene: &mut SimulationScene<W>, tick: u64) -> Vec<StepReport> {
    let remaining = tick.saturating_sub(scene.tick()) as usize;
    scene.run(remaining)
}

/// Altitude of the drone frame.
pub fn frame_altitude<W: PhysicsEngine>(scene: &SimulationScene<W>) -> f64 {
    scene.telemetry().position.y
}

/// Angular speed of the drone frame [rad/s].
pub fn angular_speed<W: PhysicsEngine>(scene: &SimulationScene<W>) -> f64 {
    scene.telemetry().angular_velocity.norm()
}
