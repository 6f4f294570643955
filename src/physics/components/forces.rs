use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

/// Reference frames for forces and moments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    /// Inertial/world frame
    Inertial,
    /// Body-fixed frame
    Body,
}

/// A force acting at a body's centre of mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force {
    /// Force vector in Newtons
    pub vector: Vector3<f64>,
    /// Frame the vector is expressed in
    pub frame: ReferenceFrame,
}

/// A pure moment about a body's centre of mass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moment {
    /// Moment vector in Newton-meters
    pub vector: Vector3<f64>,
    /// Frame the vector is expressed in
    pub frame: ReferenceFrame,
}

impl Force {
    pub fn inertial(vector: Vector3<f64>) -> Self {
        Self {
            vector,
            frame: ReferenceFrame::Inertial,
        }
    }

    pub fn body(vector: Vector3<f64>) -> Self {
        Self {
            vector,
            frame: ReferenceFrame::Body,
        }
    }
}

impl Moment {
    pub fn inertial(vector: Vector3<f64>) -> Self {
        Self {
            vector,
            frame: ReferenceFrame::Inertial,
        }
    }

    pub fn body(vector: Vector3<f64>) -> Self {
        Self {
            vector,
            frame: ReferenceFrame::Body,
        }
    }
}

/// Forces and moments accumulated on one body during a tick.
///
/// Kept in insertion order so that summation is reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct ForceSystem {
    forces: Vec<Force>,
    moments: Vec<Moment>,
}

impl ForceSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_force(&mut self, force: Force) {
        self.forces.push(force);
    }

    pub fn add_moment(&mut self, moment: Moment) {
        self.moments.push(moment);
    }

    /// Clear all forces and moments
    pub fn clear(&mut self) {
        self.forces.clear();
        self.moments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.forces.is_empty() && self.moments.is_empty()
    }

    /// Net force in the inertial frame for a body at `attitude`
    pub fn net_force(&self, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
        self.forces
            .iter()
            .map(|force| to_inertial(force.vector, force.frame, attitude))
            .sum()
    }

    /// Net moment in the inertial frame for a body at `attitude`
    pub fn net_moment(&self, attitude: &UnitQuaternion<f64>) -> Vector3<f64> {
        self.moments
            .iter()
            .map(|moment| to_inertial(moment.vector, moment.frame, attitude))
            .sum()
    }
}

fn to_inertial(
    vector: Vector3<f64>,
    frame: ReferenceFrame,
    attitude: &UnitQuaternion<f64>,
) -> Vector3<f64> {
    match frame {
        ReferenceFrame::Inertial => vector,
        ReferenceFrame::Body => attitude * vector,
    }
}
