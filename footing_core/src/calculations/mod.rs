//! # Foundation Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Validated input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `compute(&input) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`bearing_capacity`] - Ultimate and allowable bearing capacity of a
//!   shallow footing

pub mod bearing_capacity;

pub use bearing_capacity::{
    compute, BearingCapacityResult, FoundationInput, FoundationInputBuilder, FoundationRecord,
};
