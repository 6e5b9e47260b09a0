//! # Depth Factors (dc, dq, dγ)
//!
//! Corrections for the shear strength of the soil above the foundation
//! level:
//!
//! ```text
//! k  = Df/B             if Df/B ≤ 1
//! k  = arctan(Df/B)     if Df/B > 1   (radians)
//! dc = 1 + 0.4·k
//! dq = 1 + 2·tan φ·(1 − sin φ)²·k
//! dγ = 1
//! ```
//!
//! k jumps from 1 to π/4 as Df/B crosses 1, so dc and dq are discontinuous
//! there. That is how the formula is published and it is kept as-is.

use serde::{Deserialize, Serialize};

use super::FactorSet;

/// Depth correction factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthFactors {
    /// Cohesion depth factor dc
    pub dc: f64,
    /// Surcharge depth factor dq
    pub dq: f64,
    /// Self-weight depth factor dγ (always 1)
    pub d_gamma: f64,
}

/// Depth parameter k for an embedment ratio Df/B
pub fn depth_parameter(depth_ratio: f64) -> f64 {
    if depth_ratio <= 1.0 {
        depth_ratio
    } else {
        depth_ratio.atan()
    }
}

impl DepthFactors {
    /// Compute depth factors.
    ///
    /// `width_m` must be positive; validation rejects zero widths upstream.
    ///
    /// ```rust
    /// use footing_core::factors::DepthFactors;
    ///
    /// let d = DepthFactors::compute(1.0, 2.0, 30f64.to_radians());
    /// assert!((d.dc - 1.2).abs() < 1e-12);
    /// assert_eq!(d.d_gamma, 1.0);
    /// ```
    pub fn compute(embedment_depth_m: f64, width_m: f64, friction_angle_rad: f64) -> Self {
        let k = depth_parameter(embedment_depth_m / width_m);
        let (sin_phi, tan_phi) = (friction_angle_rad.sin(), friction_angle_rad.tan());

        let factors = DepthFactors {
            dc: 1.0 + 0.4 * k,
            dq: 1.0 + 2.0 * tan_phi * (1.0 - sin_phi).powi(2) * k,
            d_gamma: 1.0,
        };

        log::debug!(
            "depth factors (k = {:.4}): dc = {:.4}, dq = {:.4}",
            k,
            factors.dc,
            factors.dq
        );

        factors
    }
}

impl FactorSet for DepthFactors {
    const SYMBOLS: [&'static str; 3] = ["dc", "dq", "dγ"];

    fn cohesion_term(&self) -> f64 {
        self.dc
    }

    fn surcharge_term(&self) -> f64 {
        self.dq
    }

    fn unit_weight_term(&self) -> f64 {
        self.d_gamma
    }
}
