//! # Shape Factors (Sc, Sq, Sγ)
//!
//! Corrections for a footing of finite length. With B the footing width and
//! L its length (B ≤ L by convention, not enforced):
//!
//! | Shape              | Sc              | Sq              | Sγ            |
//! |--------------------|-----------------|-----------------|---------------|
//! | Rectangular        | 1 + (Nq/Nc)(B/L)| 1 + tan φ (B/L) | 1 − 0.4 (B/L) |
//! | Square / Circular  | 1 + Nq/Nc       | 1 + tan φ       | 0.6           |
//!
//! A rectangle with B = L gives the square values for Sc and Sq, while its Sγ
//! (1 − 0.4 = 0.6) matches the constant of the square branch too.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{BearingCapacityFactors, FactorSet};
use crate::errors::CalcError;

/// Sγ for square and circular footings
pub const S_GAMMA_SQUARE: f64 = 0.6;

/// Plan shape of the footing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootingShape {
    /// Rectangular footing, factors scale with B/L
    #[default]
    Rectangular,
    /// Square footing (B = L)
    Square,
    /// Circular footing (B = L = diameter)
    Circular,
}

impl FootingShape {
    /// All shape variants for selection lists
    pub const ALL: [FootingShape; 3] = [
        FootingShape::Rectangular,
        FootingShape::Square,
        FootingShape::Circular,
    ];

    /// Lowercase name used in input files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            FootingShape::Rectangular => "rectangular",
            FootingShape::Square => "square",
            FootingShape::Circular => "circular",
        }
    }

    /// Display name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            FootingShape::Rectangular => "Rectangular",
            FootingShape::Square => "Square",
            FootingShape::Circular => "Circular",
        }
    }
}

impl fmt::Display for FootingShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for FootingShape {
    type Err = CalcError;

    /// Parse a shape name (case-insensitive). `cuadrado` is read as square.
    ///
    /// ```rust
    /// use footing_core::factors::FootingShape;
    ///
    /// assert_eq!("Square".parse::<FootingShape>().unwrap(), FootingShape::Square);
    /// assert_eq!("cuadrado".parse::<FootingShape>().unwrap(), FootingShape::Square);
    /// assert!("triangular".parse::<FootingShape>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        if wanted == "cuadrado" {
            return Ok(FootingShape::Square);
        }
        FootingShape::ALL
            .into_iter()
            .find(|shape| shape.name() == wanted)
            .ok_or_else(|| {
                CalcError::invalid_configuration(
                    "shape",
                    s,
                    "Unsupported footing shape; expected rectangular, square or circular",
                )
            })
    }
}

/// Shape correction factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeFactors {
    /// Cohesion shape factor Sc
    pub sc: f64,
    /// Surcharge shape factor Sq
    pub sq: f64,
    /// Self-weight shape factor Sγ
    pub s_gamma: f64,
}

impl ShapeFactors {
    /// Compute shape factors.
    ///
    /// # Arguments
    ///
    /// * `shape` - Footing plan shape
    /// * `width_m` - Footing width B
    /// * `length_m` - Footing length L (must be positive)
    /// * `bearing` - Nc and Nq for the same friction angle
    /// * `friction_angle_rad` - φ in radians
    pub fn compute(
        shape: FootingShape,
        width_m: f64,
        length_m: f64,
        bearing: &BearingCapacityFactors,
        friction_angle_rad: f64,
    ) -> Self {
        let tan_phi = friction_angle_rad.tan();
        let factors = match shape {
            FootingShape::Rectangular => {
                let ratio = width_m / length_m;
                ShapeFactors {
                    sc: 1.0 + bearing.nq_over_nc() * ratio,
                    sq: 1.0 + tan_phi * ratio,
                    s_gamma: 1.0 - 0.4 * ratio,
                }
            }
            FootingShape::Square | FootingShape::Circular => ShapeFactors {
                sc: 1.0 + bearing.nq_over_nc(),
                sq: 1.0 + tan_phi,
                s_gamma: S_GAMMA_SQUARE,
            },
        };

        log::debug!(
            "shape factors ({}): Sc = {:.4}, Sq = {:.4}, Sgamma = {:.4}",
            shape.name(),
            factors.sc,
            factors.sq,
            factors.s_gamma
        );

        factors
    }
}

impl FactorSet for ShapeFactors {
    const SYMBOLS: [&'static str; 3] = ["Sc", "Sq", "Sγ"];

    fn cohesion_term(&self) -> f64 {
        self.sc
    }

    fn surcharge_term(&self) -> f64 {
        self.sq
    }

    fn unit_weight_term(&self) -> f64 {
        self.s_gamma
    }
}
