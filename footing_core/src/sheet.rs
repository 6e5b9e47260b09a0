//! # Calculation Sheets
//!
//! A `CalculationSheet` is the saved form of one bearing capacity case: who
//! ran it, for which job, when, and the validated input. Results are not
//! stored; they are recomputed on load, which is cheap and keeps a sheet
//! consistent with the engine that reads it.
//!
//! ## Structure
//!
//! ```text
//! CalculationSheet
//! ├── meta: SheetMetadata (schema version, engineer, job id, timestamps)
//! └── input: FoundationInput
//! ```
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::FoundationInput;
//! use footing_core::sheet::CalculationSheet;
//!
//! let input = FoundationInput::builder()
//!     .with_width(2.0)
//!     .with_length(4.0)
//!     .with_embedment_depth(1.0)
//!     .with_unit_weights(1.93, 1.93)
//!     .with_friction_angle(31.4)
//!     .with_safety_factor(3.0)
//!     .build()
//!     .unwrap();
//!
//! let sheet = CalculationSheet::new("Jane Engineer", "26-014", input);
//! let json = serde_json::to_string_pretty(&sheet).unwrap();
//! assert!(json.contains("\"job_id\": \"26-014\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculations::{compute, BearingCapacityResult, FoundationInput};
use crate::errors::CalcResult;

/// Current schema version for calculation sheets
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Sheet metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetMetadata {
    /// Schema version of the file (semver)
    pub version: String,
    /// Responsible engineer
    pub engineer: String,
    /// Job/project number (e.g., "26-014")
    pub job_id: String,
    /// When the sheet was created
    pub created: DateTime<Utc>,
    /// When the sheet was last changed
    pub modified: DateTime<Utc>,
}

/// One saved bearing capacity case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSheet {
    pub meta: SheetMetadata,
    pub input: FoundationInput,
}

impl CalculationSheet {
    /// Create a sheet stamped with the current schema version and time.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, input: FoundationInput) -> Self {
        let now = Utc::now();
        CalculationSheet {
            meta: SheetMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            input,
        }
    }

    /// Replace the input and bump the modified timestamp.
    pub fn set_input(&mut self, input: FoundationInput) {
        self.input = input;
        self.touch();
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Run the bearing capacity calculation for this sheet's input
    pub fn compute(&self) -> CalcResult<BearingCapacityResult> {
        compute(&self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FootingShape;

    fn input(width: f64) -> FoundationInput {
        FoundationInput::builder()
            .with_label("Z-1")
            .with_width(width)
            .with_length(4.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.93, 1.93)
            .with_friction_angle(31.4)
            .with_safety_factor(3.0)
            .with_shape(FootingShape::Rectangular)
            .build()
            .unwrap()
    }

    #[test]
    fn test_sheet_creation() {
        let sheet = CalculationSheet::new("Test Engineer", "TEST-001", input(2.0));
        assert_eq!(sheet.meta.version, SCHEMA_VERSION);
        assert_eq!(sheet.meta.engineer, "Test Engineer");
        assert_eq!(sheet.meta.created, sheet.meta.modified);
    }

    #[test]
    fn test_set_input_touches() {
        let mut sheet = CalculationSheet::new("Test", "TEST", input(2.0));
        let created = sheet.meta.created;
        sheet.set_input(input(3.0));
        assert_eq!(sheet.input.width_m(), 3.0);
        assert!(sheet.meta.modified >= created);
    }

    #[test]
    fn test_sheet_serialization() {
        let sheet = CalculationSheet::new("Test", "TEST", input(2.0));
        let json = serde_json::to_string(&sheet).unwrap();
        assert!(json.contains("\"shape\":\"rectangular\""));

        let back: CalculationSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet);
    }

    #[test]
    fn test_sheet_compute() {
        let sheet = CalculationSheet::new("Test", "TEST", input(2.0));
        let result = sheet.compute().unwrap();
        assert_eq!(result.ultimate_capacity_kgcm2, 10.47);
    }
}
