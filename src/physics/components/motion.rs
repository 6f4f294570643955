use crate::components::SpatialComponent;
use crate::physics::error::PhysicsError;
use nalgebra::{Matrix3, UnitQuaternion, Vector3};

/// Mass properties of one body taking part in a composite.
#[derive(Debug, Clone, Copy)]
pub struct MassMember {
    pub mass: f64,
    /// Inertia tensor about the member's own centre, in its local frame
    pub local_inertia: Matrix3<f64>,
    pub position: Vector3<f64>,
    pub attitude: UnitQuaternion<f64>,
}

/// Handles motion integration and kinematics calculations
#[derive(Debug, Clone)]
pub struct MotionSystem {
    /// Mass of the body [kg]
    mass: f64,
    /// Centre of mass in world coordinates [m]
    center_of_mass: Vector3<f64>,
    /// Inertia tensor about the centre of mass, world axes [kg⋅m²]
    inertia: Matrix3<f64>,
    /// Inverse of inertia tensor [kg⋅m²]^-1
    inertia_inv: Matrix3<f64>,
}

impl MotionSystem {
    /// Create a new motion system with given mass and world-axis inertia
    pub fn new(mass: f64, inertia: Matrix3<f64>) -> Result<Self, PhysicsError> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::InvalidParameter(
                "Mass must be positive".into(),
            ));
        }

        if !is_inertia_valid(&inertia) {
            return Err(PhysicsError::InvalidParameter(
                "Invalid inertia tensor".into(),
            ));
        }

        let inertia_inv = inertia.try_inverse().ok_or_else(|| {
            PhysicsError::InvalidParameter("Failed to invert inertia tensor".into())
        })?;

        Ok(Self {
            mass,
            center_of_mass: Vector3::zeros(),
            inertia,
            inertia_inv,
        })
    }

    /// Lump several rigidly joined bodies into one, using the parallel-axis theorem.
    pub fn composite(members: &[MassMember]) -> Result<Self, PhysicsError> {
        let mass: f64 = members.iter().map(|m| m.mass).sum();
        if members.is_empty() || mass <= 0.0 {
            return Err(PhysicsError::InvalidParameter(
                "Composite body needs positive total mass".into(),
            ));
        }

        let center_of_mass = members
            .iter()
            .map(|m| m.position * m.mass)
            .sum::<Vector3<f64>>()
            / mass;

        let inertia = members
            .iter()
            .map(|m| {
                let rotation = m.attitude.to_rotation_matrix();
                let rotated = rotation.matrix() * m.local_inertia * rotation.matrix().transpose();
                let r = m.position - center_of_mass;
                let shift = (Matrix3::identity() * r.norm_squared() - r * r.transpose()) * m.mass;
                rotated + shift
            })
            .sum::<Matrix3<f64>>();

        let mut motion = Self::new(mass, inertia)?;
        motion.center_of_mass = center_of_mass;
        Ok(motion)
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn center_of_mass(&self) -> Vector3<f64> {
        self.center_of_mass
    }

    pub fn inertia(&self) -> Matrix3<f64> {
        self.inertia
    }

    pub fn inertia_inv(&self) -> Matrix3<f64> {
        self.inertia_inv
    }

    /// Integrate motion for one timestep using semi-implicit Euler integration.
    ///
    /// `force` and `moment` are world-frame totals about the centre of mass;
    /// the spatial state's angular velocity is expressed in world axes.
    pub fn integrate(
        &self,
        spatial: &mut SpatialComponent,
        force: Vector3<f64>,
        moment: Vector3<f64>,
        dt: f64,
    ) -> Result<(), PhysicsError> {
        if dt <= 0.0 {
            return Err(PhysicsError::InvalidParameter(
                "Timestep must be positive".into(),
            ));
        }

        self.accelerate(spatial, force, moment, dt);
        self.advance(spatial, dt);
        Ok(())
    }

    /// Velocity half of [`MotionSystem::integrate`]. Callers must pass a positive `dt`.
    pub fn accelerate(
        &self,
        spatial: &mut SpatialComponent,
        force: Vector3<f64>,
        moment: Vector3<f64>,
        dt: f64,
    ) {
        let acceleration = force / self.mass;
        let omega = spatial.angular_velocity;
        let gyro_term = omega.cross(&(self.inertia * omega));
        let angular_acceleration = self.inertia_inv * (moment - gyro_term);

        spatial.velocity += acceleration * dt;
        spatial.angular_velocity += angular_acceleration * dt;
    }

    /// Pose half of [`MotionSystem::integrate`], using the already updated velocities.
    pub fn advance(&self, spatial: &mut SpatialComponent, dt: f64) {
        spatial.position += spatial.velocity * dt;

        let rotation = UnitQuaternion::from_scaled_axis(spatial.angular_velocity * dt);
        spatial.attitude = UnitQuaternion::new_normalize((rotation * spatial.attitude).into_inner());
    }

    /// Compute kinetic energy of the system
    pub fn kinetic_energy(&self, velocity: &Vector3<f64>, angular_velocity: &Vector3<f64>) -> f64 {
        let translational = 0.5 * self.mass * velocity.norm_squared();
        let rotational = 0.5 * angular_velocity.dot(&(self.inertia * angular_velocity));
        translational + rotational
    }
}

/// Calculate velocity at a point offset from center of mass
pub fn velocity_at_point(
    center_velocity: &Vector3<f64>,
    angular_velocity: &Vector3<f64>,
    offset: &Vector3<f64>,
) -> Vector3<f64> {
    center_velocity + angular_velocity.cross(offset)
}

/// Applies velocity and angular velocity limits to prevent excessive motion.
pub fn apply_velocity_limits(
    spatial: &mut SpatialComponent,
    max_velocity: f64,
    max_angular_velocity: f64,
) {
    limit_norm(&mut spatial.velocity, max_velocity);
    limit_norm(&mut spatial.angular_velocity, max_angular_velocity);
}

fn limit_norm(vector: &mut Vector3<f64>, max: f64) {
    let mut norm = vector.norm();
    if !norm.is_finite() {
        // Overflowed norm: clamp per component first so the rescale stays finite
        *vector = vector.map(|x| x.clamp(-max, max));
        norm = vector.norm();
    }
    if norm > max {
        *vector *= max / norm;
    }
}

/// Check if inertia tensor is valid (symmetric and positive definite)
fn is_inertia_valid(inertia: &Matrix3<f64>) -> bool {
    if !inertia.iter().all(|x| x.is_finite()) || !is_matrix_symmetric(inertia) {
        return false;
    }

    let eigenvals = match inertia.symmetric_eigen().eigenvalues.as_slice() {
        [x, y, z] => [*x, *y, *z],
        _ => return false,
    };

    eigenvals.iter().all(|&v| v > 0.0)
}

/// Check if matrix is symmetric
fn is_matrix_symmetric(mat: &Matrix3<f64>) -> bool {
    const EPSILON: f64 = 1e-10;
    for i in 0..3 {
        for j in 0..3 {
            if (mat[(i, j)] - mat[(j, i)]).abs() > EPSILON {
                return false;
            }
        }
    }
    true
}
