//! # Unit Types
//!
//! Type-safe wrappers for the metric units used in bearing capacity work.
//! They are plain `f64` newtypes: cheap, and they serialize as bare numbers.
//!
//! ## Units
//!
//! - Length: meters (m)
//! - Unit weight: tonnes-force per cubic meter (t/m³)
//! - Pressure: tonnes-force per square meter (t/m²), kilograms-force per square
//!   centimeter (kg/cm²)
//! - Angle: degrees, radians
//!
//! The bearing capacity formula is evaluated in t/m² (unit weights in t/m³,
//! lengths in m, cohesion in t/m²) and reported in kg/cm². Since
//! 1 t/m² = 1000 kg / 10 000 cm², the conversion is a fixed division by 10.
//!
//! ## Example
//!
//! ```rust
//! use footing_core::units::{Degrees, KgPerSquareCm, Radians, TonnesPerSquareMeter};
//!
//! let q: KgPerSquareCm = TonnesPerSquareMeter(104.7).into();
//! assert!((q.0 - 10.47).abs() < 1e-12);
//!
//! let phi: Radians = Degrees(180.0).into();
//! assert!((phi.0 - std::f64::consts::PI).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul};

/// t/m² per kg/cm²
pub const TM2_PER_KGCM2: f64 = 10.0;

// ============================================================================
// Length
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl Div for Meters {
    type Output = f64;
    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

// ============================================================================
// Unit Weight
// ============================================================================

/// Unit weight in tonnes-force per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnesPerCubicMeter(pub f64);

/// γ · z gives the overburden pressure at depth z
impl Mul<Meters> for TonnesPerCubicMeter {
    type Output = TonnesPerSquareMeter;
    fn mul(self, rhs: Meters) -> TonnesPerSquareMeter {
        TonnesPerSquareMeter(self.0 * rhs.0)
    }
}

// ============================================================================
// Pressure
// ============================================================================

/// Pressure in tonnes-force per square meter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonnesPerSquareMeter(pub f64);

/// Pressure in kilograms-force per square centimeter
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KgPerSquareCm(pub f64);

impl From<TonnesPerSquareMeter> for KgPerSquareCm {
    fn from(p: TonnesPerSquareMeter) -> Self {
        KgPerSquareCm(p.0 / TM2_PER_KGCM2)
    }
}

impl From<KgPerSquareCm> for TonnesPerSquareMeter {
    fn from(p: KgPerSquareCm) -> Self {
        TonnesPerSquareMeter(p.0 * TM2_PER_KGCM2)
    }
}

impl Add for TonnesPerSquareMeter {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        TonnesPerSquareMeter(self.0 + rhs.0)
    }
}

impl Mul<f64> for TonnesPerSquareMeter {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        TonnesPerSquareMeter(self.0 * rhs)
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Self {
        Radians(d.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Self {
        Degrees(r.0.to_degrees())
    }
}

// ============================================================================
// Rounding
// ============================================================================

/// Round to a fixed number of decimal places.
///
/// Rounds the exact binary value of `value`, with exact ties going to the
/// even digit, so `1.535` (stored just below the tie) gives `1.53` and
/// `0.125` gives `0.12`. Negative `decimals` round to tens, hundreds, ...
///
/// ```rust
/// use footing_core::units::round_to;
/// assert_eq!(round_to(10.467086, 2), 10.47);
/// assert_eq!(round_to(3.49, 2), 3.49);
/// assert_eq!(round_to(1.535, 2), 1.53);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if decimals < 0 {
        let scale = 10f64.powi(-decimals);
        return round_to(value / scale, 0) * scale;
    }
    // std formatting rounds the exact value, ties to even
    format!("{:.*}", decimals as usize, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pressure_conversion() {
        let kg: KgPerSquareCm = TonnesPerSquareMeter(25.0).into();
        assert_eq!(kg.0, 2.5);
        let back: TonnesPerSquareMeter = kg.into();
        assert_eq!(back.0, 25.0);
    }

    #[test]
    fn test_overburden() {
        let q = TonnesPerCubicMeter(1.8) * Meters(1.5);
        assert!((q.0 - 2.7).abs() < 1e-12);
    }

    #[test]
    fn test_angle_conversion() {
        let r: Radians = Degrees(45.0).into();
        assert!((r.0 - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
        let d: Degrees = r.into();
        assert!((d.0 - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_meter_ratio() {
        assert_eq!(Meters(2.0) / Meters(4.0), 0.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(8.398063, 2), 8.4);
        assert_eq!(round_to(1.355, 1), 1.4);
        assert_eq!(round_to(-2.346, 2), -2.35);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_round_to_uses_exact_value() {
        // 1.535 is stored as 1.534999...; scaling first would round it up
        assert_eq!(round_to(1.535, 2), 1.53);
        assert_eq!(round_to(3.07 / 2.0, 2), 1.53);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.005, 2), 1.0);
    }

    #[test]
    fn test_round_to_ties_to_even() {
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(25.0, -1), 20.0);
        assert_eq!(round_to(1234.5678, -2), 1200.0);
    }

    #[test]
    fn test_round_to_non_finite_passthrough() {
        assert!(round_to(f64::NAN, 2).is_nan());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Meters(2.5)).unwrap();
        assert_eq!(json, "2.5");
    }
}
