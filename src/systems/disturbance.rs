use crate::components::Drone;
use crate::physics::components::ReferenceFrame;
use crate::physics::PhysicsEngine;
use crate::resources::{DisturbanceConfig, DisturbancePolicy};
use nalgebra::Vector3;
use tracing::{debug, info};

/// Slack on the threshold comparison; elapsed time is a sum of timesteps.
const CROSSING_TOLERANCE: f64 = 1e-9;

/// Time-triggered force injector on a fixed set of motors.
///
/// Independent of the control law: once the threshold is crossed the force is
/// applied unconditionally according to the configured policy.
#[derive(Debug, Clone, PartialEq)]
pub struct DisturbanceSchedule {
    config: DisturbanceConfig,
    /// Ticks since the threshold was crossed
    ticks_past: u32,
}

impl DisturbanceSchedule {
    pub fn new(config: DisturbanceConfig) -> Self {
        Self {
            config,
            ticks_past: 0,
        }
    }

    pub fn config(&self) -> &DisturbanceConfig {
        &self.config
    }

    pub fn is_crossed(&self, elapsed: f64) -> bool {
        elapsed >= self.config.threshold - CROSSING_TOLERANCE
    }

    pub fn ticks_past(&self) -> u32 {
        self.ticks_past
    }

    pub fn reset(&mut self) {
        self.ticks_past = 0;
    }

    /// Force for this tick per target motor, expressed in the configured frame.
    ///
    /// Advances the schedule; call once per tick.
    pub fn next_force(&mut self, elapsed: f64) -> Option<Vector3<f64>> {
        if !self.is_crossed(elapsed) {
            return None;
        }

        let k = self.ticks_past;
        if k == 0 {
            info!(
                "Disturbance threshold {:.3} s crossed at {:.3} s",
                self.config.threshold, elapsed
            );
        }
        self.ticks_past = self.ticks_past.saturating_add(1);

        match self.config.policy {
            DisturbancePolicy::Doubling => {
                Some(self.config.force * 2f64.powi(i32::try_from(k).unwrap_or(i32::MAX)))
            },
            DisturbancePolicy::Constant => Some(self.config.force),
            DisturbancePolicy::OneShot => (k == 0).then_some(self.config.force),
        }
    }

    /// Advances the schedule and queues this tick's force on the target motors.
    ///
    /// Returns the force applied to each target, in the configured frame.
    pub fn apply<W: PhysicsEngine>(
        &mut self,
        elapsed: f64,
        drone: &Drone,
        world: &mut W,
    ) -> Option<Vector3<f64>> {
        let force = self.next_force(elapsed)?;
        let inertial = match self.config.frame {
            ReferenceFrame::Inertial => force,
            ReferenceFrame::Body => drone.frame().transform(world).rotation * force,
        };
        for &target in &self.config.targets {
            drone.motor(target).apply_force(world, inertial);
        }
        debug!("Disturbance {:?} applied to {:?}", force, self.config.targets);
        Some(force)
    }
}
