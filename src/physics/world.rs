use crate::components::SpatialComponent;
use crate::physics::components::{
    apply_velocity_limits, velocity_at_point, BoxShape, Force, ForceSystem, MassMember, Moment,
    MotionSystem,
};
use crate::physics::error::PhysicsError;
use crate::physics::traits::{BodyDesc, BodyHandle, BodyType, PhysicsEngine};
use crate::resources::PhysicsConfig;
use nalgebra::{Isometry3, Matrix3, UnitQuaternion, Vector3};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone)]
struct RigidBody {
    shape: BoxShape,
    mass: f64,
    local_inertia: Matrix3<f64>,
    body_type: BodyType,
    bounciness: f64,
    spatial: SpatialComponent,
    forces: ForceSystem,
    /// Body this one is welded to, if any
    parent: Option<BodyHandle>,
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    body: Option<RigidBody>,
}

/// Box-only rigid-body world with welded composites and ground contact
/// against static boxes.
///
/// Welded bodies are integrated together as one composite rigid body; forces
/// applied to any member act at that member's centre of mass. A body welded to
/// a static body never moves.
#[derive(Debug, Clone)]
pub struct RigidBodyWorld {
    config: PhysicsConfig,
    slots: Vec<Slot>,
    free: Vec<usize>,
    len: usize,
    time: f64,
}

impl Default for RigidBodyWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl RigidBodyWorld {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            time: 0.0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn shape(&self, handle: BodyHandle) -> &BoxShape {
        &self.body(handle).shape
    }

    pub fn body_type(&self, handle: BodyHandle) -> BodyType {
        self.body(handle).body_type
    }

    pub fn spatial(&self, handle: BodyHandle) -> &SpatialComponent {
        &self.body(handle).spatial
    }

    /// Body `handle` is welded to, if any.
    pub fn parent(&self, handle: BodyHandle) -> Option<BodyHandle> {
        self.body(handle).parent.filter(|p| self.contains(*p))
    }

    /// Adds a force expressed in either frame to the body's accumulator.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Force) {
        let body = self.body_mut(handle);
        if body.body_type == BodyType::Dynamic {
            body.forces.add_force(force);
        }
    }

    pub fn apply_moment(&mut self, handle: BodyHandle, moment: Moment) {
        let body = self.body_mut(handle);
        if body.body_type == BodyType::Dynamic {
            body.forces.add_moment(moment);
        }
    }

    /// Net force queued on the body for the next step, world frame.
    pub fn pending_force(&self, handle: BodyHandle) -> Vector3<f64> {
        let body = self.body(handle);
        body.forces.net_force(&body.spatial.attitude)
    }

    /// Kinetic energy of every dynamic body, summed.
    pub fn kinetic_energy(&self) -> f64 {
        self.live()
            .filter(|(_, body)| body.body_type == BodyType::Dynamic)
            .filter_map(|(_, body)| {
                let rotation = body.spatial.attitude.to_rotation_matrix();
                let inertia = rotation.matrix() * body.local_inertia * rotation.matrix().transpose();
                MotionSystem::new(body.mass, inertia).ok().map(|motion| {
                    motion.kinetic_energy(&body.spatial.velocity, &body.spatial.angular_velocity)
                })
            })
            .sum()
    }

    fn body(&self, handle: BodyHandle) -> &RigidBody {
        self.slots
            .get(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
            .unwrap_or_else(|| panic!("stale or unknown body handle {:?}", handle))
    }

    fn body_mut(&mut self, handle: BodyHandle) -> &mut RigidBody {
        self.slots
            .get_mut(handle.index)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_mut())
            .unwrap_or_else(|| panic!("stale or unknown body handle {:?}", handle))
    }

    fn live(&self) -> impl Iterator<Item = (usize, &RigidBody)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.body.as_ref().map(|body| (index, body)))
    }

    fn at(&self, index: usize) -> &RigidBody {
        self.slots[index]
            .body
            .as_ref()
            .unwrap_or_else(|| panic!("no live body in slot {}", index))
    }

    fn at_mut(&mut self, index: usize) -> &mut RigidBody {
        self.slots[index]
            .body
            .as_mut()
            .unwrap_or_else(|| panic!("no live body in slot {}", index))
    }

    fn root_of(&self, index: usize) -> usize {
        let mut current = index;
        // A chain can never be longer than the number of slots
        for _ in 0..self.slots.len() {
            match self.at(current).parent.filter(|p| self.contains(*p)) {
                Some(parent) => current = parent.index,
                None => return current,
            }
        }
        current
    }

    /// Live bodies grouped by the root of their weld chain, in slot order.
    fn groups(&self) -> BTreeMap<usize, Vec<usize>> {
        let mut groups: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (index, _) in self.live() {
            groups.entry(self.root_of(index)).or_default().push(index);
        }
        groups
    }

    fn integrate_group(&mut self, root: usize, members: &[usize], dt: f64) {
        // Positions relative to the root body
        let origin = self.at(root).spatial.position;
        let mass_members: Vec<MassMember> = members
            .iter()
            .map(|&index| {
                let body = self.at(index);
                MassMember {
                    mass: body.mass,
                    local_inertia: body.local_inertia,
                    position: body.spatial.position - origin,
                    attitude: body.spatial.attitude,
                }
            })
            .collect();

        let motion = MotionSystem::composite(&mass_members).unwrap_or_else(|err| {
            panic!(
                "body group rooted at slot {} has invalid mass properties: {}",
                root, err
            )
        });

        let center = motion.center_of_mass();
        let mut momentum = Vector3::zeros();
        let mut angular_momentum = Vector3::zeros();
        let mut force = self.config.gravity * motion.mass();
        let mut moment = Vector3::zeros();

        for &index in members {
            let body = self.at(index);
            let attitude = &body.spatial.attitude;
            let rotation = attitude.to_rotation_matrix();
            let inertia = rotation.matrix() * body.local_inertia * rotation.matrix().transpose();
            let arm = body.spatial.position - origin - center;
            let linear = body.spatial.velocity * body.mass;

            momentum += linear;
            angular_momentum += inertia * body.spatial.angular_velocity + arm.cross(&linear);

            let applied = body.forces.net_force(attitude);
            force += applied;
            moment += arm.cross(&applied) + body.forces.net_moment(attitude);
        }

        // Integrate from identity so the resulting attitude is this step's rotation
        let mut spatial = SpatialComponent {
            position: center,
            velocity: momentum / motion.mass(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: motion.inertia_inv() * angular_momentum,
        };
        motion.accelerate(&mut spatial, force, moment, dt);
        // Limit before the pose advances
        apply_velocity_limits(
            &mut spatial,
            self.config.max_velocity,
            self.config.max_angular_velocity,
        );
        motion.advance(&mut spatial, dt);

        let rotation = spatial.attitude;
        for &index in members {
            let body = self.at_mut(index);
            let arm = rotation * (body.spatial.position - origin - center);
            body.spatial.position = origin + spatial.position + arm;
            body.spatial.attitude =
                UnitQuaternion::new_normalize((rotation * body.spatial.attitude).into_inner());
            body.spatial.velocity =
                velocity_at_point(&spatial.velocity, &spatial.angular_velocity, &arm);
            body.spatial.angular_velocity = spatial.angular_velocity;
        }
    }

    /// Pushes dynamic groups out of static boxes along the static box's up axis.
    fn resolve_ground_contacts(&mut self, groups: &BTreeMap<usize, Vec<usize>>) {
        let grounds: Vec<(SpatialComponent, BoxShape, f64)> = self
            .live()
            .filter(|(_, body)| body.body_type == BodyType::Static)
            .map(|(_, body)| (body.spatial.clone(), body.shape, body.bounciness))
            .collect();

        for (&root, members) in groups {
            if self.at(root).body_type == BodyType::Static {
                continue;
            }

            for (ground, ground_shape, bounciness) in &grounds {
                let normal = ground.attitude * Vector3::y();
                let half = ground_shape.half_extents();
                let top = ground.position + normal * half.y;

                let depth = members
                    .iter()
                    .filter_map(|&index| {
                        let body = self.at(index);
                        let direction = body.spatial.attitude.inverse() * -normal;
                        let lowest = body.spatial.position
                            + body.spatial.attitude * body.shape.local_support_point(&direction, 0.0);
                        let local = ground.attitude.inverse() * (lowest - ground.position);
                        let over_ground = local.x.abs() <= half.x
                            && local.z.abs() <= half.z
                            && local.y >= -half.y;
                        over_ground.then(|| (top - lowest).dot(&normal))
                    })
                    .fold(0.0_f64, f64::max);

                if depth <= 0.0 {
                    continue;
                }

                let total_mass: f64 = members.iter().map(|&i| self.at(i).mass).sum();
                let velocity = members
                    .iter()
                    .map(|&i| self.at(i).spatial.velocity * self.at(i).mass)
                    .sum::<Vector3<f64>>()
                    / total_mass;
                let approach = velocity.dot(&normal);
                let impulse = if approach < 0.0 {
                    -normal * approach * (1.0 + bounciness)
                } else {
                    Vector3::zeros()
                };

                for &index in members {
                    let body = self.at_mut(index);
                    body.spatial.position += normal * depth;
                    body.spatial.velocity += impulse;
                }
                debug!("Resolved ground contact of depth {:.4} for group {}", depth, root);
            }
        }
    }
}

impl PhysicsEngine for RigidBodyWorld {
    fn create_rigid_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        if !desc.shape.is_valid() {
            return Err(PhysicsError::InvalidParameter(format!(
                "box half-extents must be positive, got {:?}",
                desc.shape.half_extents()
            )));
        }
        if !(desc.mass > 0.0 && desc.mass.is_finite()) {
            return Err(PhysicsError::InvalidParameter(format!(
                "body mass must be positive, got {}",
                desc.mass
            )));
        }
        if !(0.0..=1.0).contains(&desc.bounciness) {
            return Err(PhysicsError::InvalidParameter(format!(
                "bounciness must lie in [0, 1], got {}",
                desc.bounciness
            )));
        }
        if self.len >= self.config.max_bodies {
            return Err(PhysicsError::CapacityExceeded(self.config.max_bodies));
        }

        let body = RigidBody {
            shape: desc.shape,
            mass: desc.mass,
            local_inertia: desc.shape.local_inertia_tensor(desc.mass),
            body_type: desc.body_type,
            bounciness: desc.bounciness,
            spatial: SpatialComponent::at_transform(&desc.transform),
            forces: ForceSystem::new(),
            parent: None,
        };

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot::default());
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];
        slot.body = Some(body);
        self.len += 1;

        Ok(BodyHandle {
            index,
            generation: slot.generation,
        })
    }

    fn destroy_rigid_body(&mut self, handle: BodyHandle) {
        assert!(
            self.contains(handle),
            "stale or unknown body handle {:?}",
            handle
        );
        let slot = &mut self.slots[handle.index];
        slot.body = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;

        for slot in self.slots.iter_mut() {
            if let Some(body) = slot.body.as_mut() {
                if body.parent == Some(handle) {
                    body.parent = None;
                }
            }
        }
    }

    fn contains(&self, handle: BodyHandle) -> bool {
        self.slots
            .get(handle.index)
            .map_or(false, |slot| {
                slot.generation == handle.generation && slot.body.is_some()
            })
    }

    fn body_count(&self) -> usize {
        self.len
    }

    fn transform(&self, handle: BodyHandle) -> Isometry3<f64> {
        self.body(handle).spatial.transform()
    }

    fn set_transform(&mut self, handle: BodyHandle, transform: Isometry3<f64>) {
        self.body_mut(handle).spatial.set_transform(&transform);
    }

    fn set_body_type(&mut self, handle: BodyHandle, body_type: BodyType) {
        let body = self.body_mut(handle);
        body.body_type = body_type;
        if body_type == BodyType::Static {
            body.spatial.velocity = Vector3::zeros();
            body.spatial.angular_velocity = Vector3::zeros();
            body.forces.clear();
        }
    }

    fn mass(&self, handle: BodyHandle) -> f64 {
        self.body(handle).mass
    }

    fn apply_force_at_center_of_mass(&mut self, handle: BodyHandle, force: Vector3<f64>) {
        self.apply_force(handle, Force::inertial(force));
    }

    fn apply_torque(&mut self, handle: BodyHandle, torque: Vector3<f64>) {
        self.apply_moment(handle, Moment::inertial(torque));
    }

    fn linear_velocity(&self, handle: BodyHandle) -> Vector3<f64> {
        self.body(handle).spatial.velocity
    }

    fn angular_velocity(&self, handle: BodyHandle) -> Vector3<f64> {
        self.body(handle).spatial.angular_velocity
    }

    fn set_linear_velocity(&mut self, handle: BodyHandle, velocity: Vector3<f64>) {
        self.body_mut(handle).spatial.velocity = velocity;
    }

    fn set_angular_velocity(&mut self, handle: BodyHandle, velocity: Vector3<f64>) {
        self.body_mut(handle).spatial.angular_velocity = velocity;
    }

    fn weld(&mut self, child: BodyHandle, parent: BodyHandle) -> Result<(), PhysicsError> {
        let reject = |reason: &str| PhysicsError::InvalidWeld {
            child,
            parent,
            reason: reason.to_string(),
        };

        if !self.contains(child) || !self.contains(parent) {
            return Err(reject("both bodies must be live"));
        }
        if child == parent {
            return Err(reject("a body cannot be welded to itself"));
        }
        if self.body(child).parent.filter(|p| self.contains(*p)).is_some() {
            return Err(reject("child is already welded"));
        }
        if self.root_of(parent.index) == child.index {
            return Err(reject("weld would create a cycle"));
        }

        self.body_mut(child).parent = Some(parent);
        Ok(())
    }

    fn gravity(&self) -> Vector3<f64> {
        self.config.gravity
    }

    fn step(&mut self, dt: f64) {
        assert!(
            dt > 0.0 && dt.is_finite(),
            "physics timestep must be positive, got {}",
            dt
        );

        let groups = self.groups();
        for (&root, members) in &groups {
            if self.at(root).body_type == BodyType::Dynamic {
                self.integrate_group(root, members, dt);
            }
        }
        self.resolve_ground_contacts(&groups);

        for slot in self.slots.iter_mut() {
            if let Some(body) = slot.body.as_mut() {
                body.forces.clear();
            }
        }
        self.time += dt;
    }

    fn time(&self) -> f64 {
        self.time
    }
}
