//! # Bearing Capacity Equations
//!
//! Every formula the engine evaluates is registered in [`registry`] with its
//! source, variables and assumptions. Keeping them in one place enables:
//! - Verification against the published methods (Prandtl, Reissner, Vesic,
//!   De Beer, Hansen, Meyerhof)
//! - An equations appendix in PDF reports
//! - A generated `EQUATIONS.md` (`cargo run --bin gen-equations`)
//!
//! The numeric implementations live in [`crate::factors`] and
//! [`crate::calculations`]; this module only describes them.
//!
//! ## Units
//!
//! - Lengths in m, unit weights in t/m³, cohesion in t/m²
//! - Angles in degrees at the API boundary, radians inside trig functions
//! - Reported capacities in kg/cm² (1 kg/cm² = 10 t/m²)

pub mod registry;

pub use registry::{
    bearing_capacity_equations,
    generate_equations_markdown,
    generate_static_equations_appendix_typst,
    group_by_category,
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
};
