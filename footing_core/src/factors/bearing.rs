//! # Bearing Capacity Factors (Nc, Nq, Nγ)
//!
//! Dimensionless multipliers that depend only on the friction angle φ:
//!
//! ```text
//! Nq = e^(π·tan φ) · tan²(45° + φ/2)
//! Nc = (Nq − 1) · cot φ          (π + 2 at φ = 0)
//! Nγ = 2 · (Nq + 1) · tan φ
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::FactorSet;
use crate::units::{Degrees, Radians};

/// Limiting value of Nc as φ → 0 (purely cohesive soil)
pub const NC_UNDRAINED: f64 = PI + 2.0;

/// Bearing capacity factors for one friction angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingCapacityFactors {
    /// Cohesion factor Nc
    pub nc: f64,
    /// Surcharge factor Nq
    pub nq: f64,
    /// Self-weight factor Nγ
    pub n_gamma: f64,
}

impl BearingCapacityFactors {
    /// Compute Nc, Nq, Nγ for a friction angle in degrees.
    ///
    /// The angle must lie in [0°, 90°); input validation guarantees this
    /// before the engine gets here. At φ = 0 the cot φ singularity in Nc is
    /// removable and the limit π + 2 is returned.
    ///
    /// ```rust
    /// use footing_core::factors::BearingCapacityFactors;
    ///
    /// let f = BearingCapacityFactors::from_friction_angle(30.0);
    /// assert!((f.nq - 18.40).abs() < 0.01);
    /// assert!((f.nc - 30.14).abs() < 0.01);
    /// ```
    pub fn from_friction_angle(friction_angle_deg: f64) -> Self {
        let phi: Radians = Degrees(friction_angle_deg).into();
        let tan_phi = phi.0.tan();
        let passive: Radians = Degrees(45.0 + friction_angle_deg / 2.0).into();

        let nq = (PI * tan_phi).exp() * passive.0.tan().powi(2);

        let nc = if friction_angle_deg == 0.0 {
            NC_UNDRAINED
        } else {
            (nq - 1.0) / tan_phi
        };

        let n_gamma = 2.0 * (nq + 1.0) * tan_phi;

        log::debug!(
            "bearing factors for phi = {} deg: Nc = {:.4}, Nq = {:.4}, Ngamma = {:.4}",
            friction_angle_deg,
            nc,
            nq,
            n_gamma
        );

        BearingCapacityFactors { nc, nq, n_gamma }
    }

    /// False once e^(π·tan φ) has overflowed, which happens just below 90°
    pub fn is_finite(&self) -> bool {
        self.nc.is_finite() && self.nq.is_finite() && self.n_gamma.is_finite()
    }

    /// Nq/Nc ratio used by the shape factor Sc
    pub fn nq_over_nc(&self) -> f64 {
        self.nq / self.nc
    }
}

impl FactorSet for BearingCapacityFactors {
    const SYMBOLS: [&'static str; 3] = ["Nc", "Nq", "Nγ"];

    fn cohesion_term(&self) -> f64 {
        self.nc
    }

    fn surcharge_term(&self) -> f64 {
        self.nq
    }

    fn unit_weight_term(&self) -> f64 {
        self.n_gamma
    }
}
