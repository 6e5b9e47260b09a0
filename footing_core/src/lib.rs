//! # footing_core - Shallow Foundation Bearing Capacity Engine
//!
//! `footing_core` computes the ultimate and allowable bearing capacity of a
//! shallow footing with the general bearing capacity equation (bearing,
//! shape, depth and inclination factors). All inputs and outputs are
//! JSON-serializable, so the engine can sit behind a CLI, a file format or
//! another program without glue.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Validated**: A `FoundationInput` cannot exist with out-of-range values
//! - **JSON-First**: All data types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use footing_core::{compute, FootingShape, FoundationInput};
//!
//! let input = FoundationInput::builder()
//!     .with_label("Z-1")
//!     .with_width(2.0)
//!     .with_length(4.0)
//!     .with_embedment_depth(1.0)
//!     .with_unit_weights(1.93, 1.93)
//!     .with_friction_angle(31.4)
//!     .with_safety_factor(3.0)
//!     .with_shape(FootingShape::Rectangular)
//!     .build()?;
//!
//! let result = compute(&input)?;
//! assert_eq!(result.ultimate_capacity_kgcm2, 10.47);
//! assert_eq!(result.allowable_capacity_kgcm2, 3.49);
//! # Ok::<(), footing_core::CalcError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Input validation and the bearing capacity engine
//! - [`factors`] - Bearing, shape, depth and inclination factors
//! - [`equations`] - Equation registry for reports and EQUATIONS.md
//! - [`report`] - HTML and text tables
//! - [`diagram`] - SVG footing diagram
//! - [`pdf`] - Typst-based PDF reports
//! - [`sheet`] - Saved calculation sheets
//! - [`file_io`] - Atomic saves and validated loads
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod diagram;
pub mod equations;
pub mod errors;
pub mod factors;
pub mod file_io;
pub mod pdf;
pub mod report;
pub mod sheet;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{compute, BearingCapacityResult, FoundationInput, FoundationInputBuilder};
pub use errors::{CalcError, CalcResult};
pub use factors::FootingShape;
pub use file_io::{load_input, load_sheet, save_sheet};
pub use sheet::{CalculationSheet, SheetMetadata};
