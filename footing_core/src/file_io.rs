//! # File I/O Module
//!
//! Reads and writes calculation sheets and bare inputs:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//! - **Input validation**: Loaded inputs go through the same checks as the
//!   builder, so a bad value is reported as `InvalidConfiguration`
//!
//! ## File Format
//!
//! Sheets are pretty-printed JSON (`.json`). An input file may be either a
//! full sheet or a bare input object:
//!
//! ```json
//! { "width_m": 2.0, "length_m": 4.0, "embedment_depth_m": 1.0,
//!   "unit_weight_above_tm3": 1.93, "unit_weight_below_tm3": 1.93,
//!   "friction_angle_deg": 31.4, "safety_factor": 3.0, "shape": "rectangular" }
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use footing_core::file_io::{load_sheet, save_sheet};
//! use std::path::Path;
//!
//! let path = Path::new("z1.json");
//! let mut sheet = load_sheet(path)?;
//! sheet.touch();
//! save_sheet(&sheet, path)?;
//! # Ok::<(), footing_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::Deserialize;

use crate::calculations::{FoundationInput, FoundationRecord};
use crate::errors::{CalcError, CalcResult};
use crate::sheet::{CalculationSheet, SheetMetadata, SCHEMA_VERSION};

/// On-disk sheet before input validation
#[derive(Deserialize)]
struct RawSheet {
    meta: SheetMetadata,
    input: FoundationRecord,
}

/// Save a sheet to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize the sheet to JSON
/// 2. Write to a temporary file (`<path>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_sheet(sheet: &CalculationSheet, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(sheet)?;
    write_atomic(path, json.as_bytes())?;
    log::info!("saved calculation sheet to {}", path.display());
    Ok(())
}

/// Write bytes to `path` through a synced temp file and a rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(contents).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Load a sheet from a file.
///
/// # Returns
///
/// * `Ok(CalculationSheet)` - Successfully loaded sheet
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::InvalidConfiguration)` - The stored input fails validation
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_sheet(path: &Path) -> CalcResult<CalculationSheet> {
    let contents = read_file(path)?;

    let raw: RawSheet = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid sheet in {}: {}", path.display(), e),
    })?;

    validate_version(&raw.meta.version)?;

    Ok(CalculationSheet {
        meta: raw.meta,
        input: FoundationInput::try_from(raw.input)?,
    })
}

/// Load a foundation input from either a full sheet or a bare input object.
pub fn load_input(path: &Path) -> CalcResult<FoundationInput> {
    let contents = read_file(path)?;

    let value: serde_json::Value = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    if value.get("meta").is_some() && value.get("input").is_some() {
        log::debug!("{} is a calculation sheet", path.display());
        return load_sheet(path).map(|sheet| sheet.input);
    }

    let record: FoundationRecord = serde_json::from_value(value).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid input in {}: {}", path.display(), e),
    })?;

    FoundationInput::try_from(record)
}

fn read_file(path: &Path) -> CalcResult<String> {
    fs::read_to_string(path).map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))
}

/// `<path>.tmp` next to the target
fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // On 0.x, a newer minor may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FootingShape;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("footing_test_{}_{}.json", name, std::process::id()))
    }

    fn reference_input() -> FoundationInput {
        FoundationInput::builder()
            .with_label("Z-1")
            .with_width(2.0)
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
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip");

        let sheet = CalculationSheet::new("Test Engineer", "TEST-001", reference_input());
        save_sheet(&sheet, &path).unwrap();

        let loaded = load_sheet(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.input, sheet.input);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic");
        let tmp_path = tmp_path_for(&path);

        let sheet = CalculationSheet::new("Test", "TEST", reference_input());
        save_sheet(&sheet, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_tmp_path_keeps_extension() {
        assert_eq!(
            tmp_path_for(Path::new("/jobs/z1.json")),
            Path::new("/jobs/z1.json.tmp")
        );
    }

    #[test]
    fn test_load_bare_input() {
        let path = temp_path("bare");
        fs::write(
            &path,
            r#"{
                "width_m": 2.0, "length_m": 2.0, "embedment_depth_m": 1.0,
                "unit_weight_above_tm3": 1.8, "unit_weight_below_tm3": 1.8,
                "friction_angle_deg": 30.0, "safety_factor": 3.0, "shape": "Square"
            }"#,
        )
        .unwrap();

        let input = load_input(&path).unwrap();
        assert_eq!(input.shape(), FootingShape::Square);
        assert_eq!(input.cohesion_tm2(), 0.0);
        assert_eq!(input.load_inclination_deg(), 0.0);
        assert_eq!(input.label(), "");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_input_from_sheet() {
        let path = temp_path("sheet_input");
        let sheet = CalculationSheet::new("Test", "TEST", reference_input());
        save_sheet(&sheet, &path).unwrap();

        let input = load_input(&path).unwrap();
        assert_eq!(input.label(), "Z-1");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_shape_is_invalid_configuration() {
        let path = temp_path("triangular");
        fs::write(
            &path,
            r#"{
                "width_m": 2.0, "length_m": 2.0, "embedment_depth_m": 1.0,
                "unit_weight_above_tm3": 1.8, "unit_weight_below_tm3": 1.8,
                "friction_angle_deg": 30.0, "safety_factor": 3.0, "shape": "triangular"
            }"#,
        )
        .unwrap();

        let err = load_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIGURATION");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_sheet_with_invalid_input() {
        let path = temp_path("bad_sheet");
        let sheet = CalculationSheet::new("Test", "TEST", reference_input());
        let json = serde_json::to_string(&sheet)
            .unwrap()
            .replace("\"width_m\":2.0", "\"width_m\":-2.0");
        fs::write(&path, json).unwrap();

        match load_sheet(&path) {
            Err(CalcError::InvalidConfiguration { field, .. }) => assert_eq!(field, "width_m"),
            other => panic!("expected InvalidConfiguration, got {:?}", other),
        }

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_input(&temp_path("does_not_exist")).unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_malformed_json() {
        let path = temp_path("malformed");
        fs::write(&path, "{ not json").unwrap();

        let err = load_input(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_newer_schema_rejected() {
        let path = temp_path("newer");
        let mut sheet = CalculationSheet::new("Test", "TEST", reference_input());
        sheet.meta.version = "0.2.0".to_string();
        save_sheet(&sheet, &path).unwrap();

        let err = load_sheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("").is_err());
        assert!(validate_version("v0.1").is_err());
    }
}
