use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in its body's local frame, described by half-widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    half_extents: Vector3<f64>,
}

impl BoxShape {
    pub fn new(half_extents: Vector3<f64>) -> Self {
        Self { half_extents }
    }

    /// Cube with the given full edge length.
    pub fn cube(size: f64) -> Self {
        Self::new(Vector3::repeat(size / 2.0))
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        self.half_extents
    }

    /// Half-widths grown by `margin`, used for bounding boxes.
    pub fn local_extents(&self, margin: f64) -> Vector3<f64> {
        self.half_extents + Vector3::repeat(margin)
    }

    /// Farthest corner of the box along `direction`.
    pub fn local_support_point(&self, direction: &Vector3<f64>, margin: f64) -> Vector3<f64> {
        assert!(margin >= 0.0, "support margin must be non-negative");
        let pick = |d: f64, e: f64| if d < 0.0 { -e - margin } else { e + margin };
        Vector3::new(
            pick(direction.x, self.half_extents.x),
            pick(direction.y, self.half_extents.y),
            pick(direction.z, self.half_extents.z),
        )
    }

    /// Inertia tensor of a solid box of `mass` about its centre.
    pub fn local_inertia_tensor(&self, mass: f64) -> Matrix3<f64> {
        let e = self.half_extents.component_mul(&self.half_extents);
        let factor = mass / 3.0;
        Matrix3::from_diagonal(&Vector3::new(
            factor * (e.y + e.z),
            factor * (e.x + e.z),
            factor * (e.x + e.y),
        ))
    }

    pub fn is_valid(&self) -> bool {
        self.half_extents.iter().all(|e| e.is_finite() && *e > 0.0)
    }
}
