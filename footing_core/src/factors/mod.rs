//! # Bearing Capacity Factors
//!
//! The four factor families combined by the general bearing capacity
//! equation:
//!
//! ```text
//! q_u = c·Nc·Sc·dc·ic + q·Nq·Sq·dq·iq + ½·γ·B·Nγ·Sγ·dγ·iγ
//! ```
//!
//! ## Factor Summary
//!
//! | Family       | Symbols        | Depends on                   |
//! |--------------|----------------|------------------------------|
//! | Bearing      | Nc, Nq, Nγ     | φ                            |
//! | Shape        | Sc, Sq, Sγ     | shape, B/L, Nq/Nc, φ         |
//! | Depth        | dc, dq, dγ     | Df/B, φ                      |
//! | Inclination  | ic, iq, iγ     | β, φ                         |
//!
//! Each family is a plain `Copy` struct with one field per term, and all of
//! them implement [`FactorSet`] so the presentation layer can walk them
//! uniformly.

pub mod bearing;
pub mod depth;
pub mod inclination;
pub mod shape;

pub use bearing::BearingCapacityFactors;
pub use depth::DepthFactors;
pub use inclination::InclinationFactors;
pub use shape::{FootingShape, ShapeFactors};

/// Literature references for the factor formulas.
pub mod factor_ref {
    /// Nq (Reissner / Prandtl)
    pub const NQ: &str = "Reissner (1924)";
    /// Nc (Prandtl)
    pub const NC: &str = "Prandtl (1921)";
    /// Nγ
    pub const N_GAMMA: &str = "Vesic (1973)";
    /// Shape factors
    pub const SHAPE: &str = "De Beer (1970)";
    /// Depth factors
    pub const DEPTH: &str = "Hansen (1970)";
    /// Inclination factors
    pub const INCLINATION: &str = "Meyerhof (1963), Hanna & Meyerhof (1981)";
}

/// A family of three correction factors, one per term of the bearing
/// capacity equation.
pub trait FactorSet {
    /// Display symbols in term order (cohesion, surcharge, unit weight)
    const SYMBOLS: [&'static str; 3];

    /// Factor applied to the cohesion term
    fn cohesion_term(&self) -> f64;

    /// Factor applied to the surcharge (overburden) term
    fn surcharge_term(&self) -> f64;

    /// Factor applied to the soil self-weight term
    fn unit_weight_term(&self) -> f64;

    /// Symbol/value pairs in term order
    fn named(&self) -> [(&'static str, f64); 3] {
        [
            (Self::SYMBOLS[0], self.cohesion_term()),
            (Self::SYMBOLS[1], self.surcharge_term()),
            (Self::SYMBOLS[2], self.unit_weight_term()),
        ]
    }
}
