//! # Inclination Factors (ic, iq, iγ)
//!
//! Reductions for a load inclined β degrees from the vertical:
//!
//! ```text
//! ic = iq = (1 − β/90°)²
//! iγ      = (1 − β/φ)²
//! ```
//!
//! ## Range tolerance
//!
//! Both expressions are squared, so the factors stay ≥ 0 even outside the
//! physical range: β > 90° or β ≥ φ give a positive factor that no longer
//! means anything. Such inputs are computed, not rejected;
//! [`inclination_beyond_friction`] lets callers flag them.
//!
//! φ = 0 makes iγ a division by zero. Validation rejects β > 0 with φ = 0;
//! for β = 0 the load is vertical and iγ = 1.

use serde::{Deserialize, Serialize};

use super::FactorSet;

/// Inclination correction factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InclinationFactors {
    /// Cohesion inclination factor ic
    pub ic: f64,
    /// Surcharge inclination factor iq (equal to ic)
    pub iq: f64,
    /// Self-weight inclination factor iγ
    pub i_gamma: f64,
}

/// True when the load inclination reaches the friction angle, where iγ
/// starts growing again instead of falling to zero.
pub fn inclination_beyond_friction(load_inclination_deg: f64, friction_angle_deg: f64) -> bool {
    load_inclination_deg > 0.0 && load_inclination_deg >= friction_angle_deg
}

impl InclinationFactors {
    /// Compute inclination factors from angles in degrees.
    ///
    /// ```rust
    /// use footing_core::factors::InclinationFactors;
    ///
    /// let i = InclinationFactors::compute(10.0, 30.0);
    /// assert!((i.ic - (8.0f64 / 9.0).powi(2)).abs() < 1e-12);
    /// assert!((i.i_gamma - (2.0f64 / 3.0).powi(2)).abs() < 1e-12);
    /// ```
    pub fn compute(load_inclination_deg: f64, friction_angle_deg: f64) -> Self {
        let ic = (1.0 - load_inclination_deg / 90.0).powi(2);

        let i_gamma = if load_inclination_deg == 0.0 {
            1.0
        } else {
            (1.0 - load_inclination_deg / friction_angle_deg).powi(2)
        };

        if inclination_beyond_friction(load_inclination_deg, friction_angle_deg) {
            log::warn!(
                "load inclination {} deg reaches friction angle {} deg; i_gamma = {:.4} is outside the formula's range",
                load_inclination_deg,
                friction_angle_deg,
                i_gamma
            );
        }

        log::debug!("inclination factors: ic = iq = {:.4}, igamma = {:.4}", ic, i_gamma);

        InclinationFactors { ic, iq: ic, i_gamma }
    }
}

impl FactorSet for InclinationFactors {
    const SYMBOLS: [&'static str; 3] = ["ic", "iq", "iγ"];

    fn cohesion_term(&self) -> f64 {
        self.ic
    }

    fn surcharge_term(&self) -> f64 {
        self.iq
    }

    fn unit_weight_term(&self) -> f64 {
        self.i_gamma
    }
}
