use serde::{Deserialize, Serialize};

/// Gains of a single-axis PID controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
    /// Symmetric clamp on the accumulated integral. `None` leaves it unbounded.
    #[serde(default)]
    pub integral_limit: Option<f64>,
}

impl PidGains {
    pub const fn new(p: f64, i: f64, d: f64) -> Self {
        Self {
            p,
            i,
            d,
            integral_limit: None,
        }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn with_integral_limit(mut self, limit: f64) -> Self {
        self.integral_limit = Some(limit);
        self
    }
}

/// Single-axis feedback controller.
///
/// `evaluate` mutates the integral and the remembered error, so it must be
/// called at most once per axis per control tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PidController {
    gains: PidGains,
    integral: f64,
    previous_error: Option<f64>,
}

impl PidController {
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            integral: 0.0,
            previous_error: None,
        }
    }

    pub fn gains(&self) -> &PidGains {
        &self.gains
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn previous_error(&self) -> Option<f64> {
        self.previous_error
    }

    /// Computes the control output for `error` over a timestep of `dt` seconds.
    ///
    /// # Panics
    /// If `dt` is not strictly positive.
    pub fn evaluate(&mut self, error: f64, dt: f64) -> f64 {
        assert!(dt > 0.0, "PID timestep must be positive, got {}", dt);

        let proportional = self.gains.p * error;

        self.integral += error * dt;
        if let Some(limit) = self.gains.integral_limit {
            self.integral = self.integral.clamp(-limit, limit);
        }
        let integral = self.gains.i * self.integral;

        // No history on the first call after construction or reset
        let derivative = match self.previous_error {
            Some(previous) => self.gains.d * (error - previous) / dt,
            None => 0.0,
        };
        self.previous_error = Some(error);

        proportional + integral + derivative
    }

    /// Clears integral and error history together; gains are kept.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = None;
    }
}
