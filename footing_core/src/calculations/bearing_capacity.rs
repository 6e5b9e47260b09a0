//! # Bearing Capacity Calculation
//!
//! Ultimate and allowable bearing capacity of a shallow footing with the
//! general bearing capacity equation:
//!
//! ```text
//! q_u,raw = c·Nc·Sc·dc·ic + Df·γ1·Nq·Sq·dq·iq + ½·γ2·B·Nγ·Sγ·dγ·iγ     [t/m²]
//! q_u     = round(q_u,raw / 10, 2)                                     [kg/cm²]
//! q_adm   = round(q_u / FS, 2)                                         [kg/cm²]
//! ```
//!
//! ## Assumptions
//!
//! - Homogeneous soil below the footing (one γ2, c, φ)
//! - Water table effects only through the unit weights supplied
//! - Centric load, possibly inclined β from the vertical
//!
//! ## Example
//!
//! ```rust
//! use footing_core::calculations::bearing_capacity::{compute, FoundationInput};
//! use footing_core::factors::FootingShape;
//!
//! let input = FoundationInput::builder()
//!     .with_label("Z-1")
//!     .with_width(2.0)
//!     .with_length(4.0)
//!     .with_embedment_depth(1.0)
//!     .with_unit_weights(1.93, 1.93)
//!     .with_friction_angle(31.40)
//!     .with_cohesion(0.0)
//!     .with_safety_factor(3.0)
//!     .with_shape(FootingShape::Rectangular)
//!     .build()
//!     .unwrap();
//!
//! let result = compute(&input).unwrap();
//! assert_eq!(result.ultimate_capacity_kgcm2, 10.47);
//! assert_eq!(result.allowable_capacity_kgcm2, 3.49);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::factors::inclination::inclination_beyond_friction;
use crate::factors::{
    BearingCapacityFactors, DepthFactors, FootingShape, InclinationFactors, ShapeFactors,
};
use crate::units::{
    round_to, Degrees, KgPerSquareCm, Meters, Radians, TonnesPerCubicMeter, TonnesPerSquareMeter,
};

/// Decimal places kept in the reported capacities
pub const CAPACITY_DECIMALS: i32 = 2;

/// Friction angles must stay below this bound (tan φ diverges at 90°)
pub const MAX_FRICTION_ANGLE_DEG: f64 = 90.0;

// ============================================================================
// Input
// ============================================================================

/// Plain serializable form of a foundation input, as found in input files.
///
/// Nothing is checked here; convert with `FoundationInput::try_from` to get
/// a validated input.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Z-1",
///   "width_m": 2.0,
///   "length_m": 4.0,
///   "embedment_depth_m": 1.0,
///   "unit_weight_above_tm3": 1.93,
///   "unit_weight_below_tm3": 1.93,
///   "friction_angle_deg": 31.4,
///   "cohesion_tm2": 0.0,
///   "safety_factor": 3.0,
///   "load_inclination_deg": 0.0,
///   "shape": "rectangular"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoundationRecord {
    /// User label (e.g., "Z-1", "Column C4 footing")
    #[serde(default)]
    pub label: String,
    /// Footing width B (m)
    pub width_m: f64,
    /// Footing length L (m)
    pub length_m: f64,
    /// Embedment depth Df below ground surface (m)
    pub embedment_depth_m: f64,
    /// Unit weight of the soil above the foundation level γ1 (t/m³)
    pub unit_weight_above_tm3: f64,
    /// Unit weight of the soil below the foundation level γ2 (t/m³)
    pub unit_weight_below_tm3: f64,
    /// Friction angle φ (degrees)
    pub friction_angle_deg: f64,
    /// Cohesion c (t/m²)
    #[serde(default)]
    pub cohesion_tm2: f64,
    /// Factor of safety FS
    pub safety_factor: f64,
    /// Load inclination β from the vertical (degrees)
    #[serde(default)]
    pub load_inclination_deg: f64,
    /// Shape name: "rectangular", "square" or "circular"
    pub shape: String,
}

/// Validated, immutable foundation input.
///
/// Built with [`FoundationInput::builder`] or converted from a
/// [`FoundationRecord`]; both paths run [`FoundationInput::validate`], so a
/// value of this type can always be computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FoundationRecord", into = "FoundationRecord")]
pub struct FoundationInput {
    label: String,
    width: Meters,
    length: Meters,
    embedment_depth: Meters,
    unit_weight_above: TonnesPerCubicMeter,
    unit_weight_below: TonnesPerCubicMeter,
    friction_angle: Degrees,
    cohesion: TonnesPerSquareMeter,
    safety_factor: f64,
    load_inclination: Degrees,
    shape: FootingShape,
}

impl FoundationInput {
    /// Start building an input. Cohesion and load inclination default to 0,
    /// the shape to rectangular; every other value must be set.
    pub fn builder() -> FoundationInputBuilder {
        FoundationInputBuilder::default()
    }

    /// Check every range and combination constraint.
    pub fn validate(&self) -> CalcResult<()> {
        positive("width_m", self.width.0, "Footing width must be positive")?;
        positive("length_m", self.length.0, "Footing length must be positive")?;
        non_negative(
            "embedment_depth_m",
            self.embedment_depth.0,
            "Embedment depth cannot be negative",
        )?;
        positive(
            "unit_weight_above_tm3",
            self.unit_weight_above.0,
            "Unit weight must be positive",
        )?;
        positive(
            "unit_weight_below_tm3",
            self.unit_weight_below.0,
            "Unit weight must be positive",
        )?;

        let phi = self.friction_angle.0;
        if !phi.is_finite() || !(0.0..MAX_FRICTION_ANGLE_DEG).contains(&phi) {
            return Err(CalcError::invalid_configuration(
                "friction_angle_deg",
                phi.to_string(),
                "Friction angle must be in [0, 90) degrees",
            ));
        }
        if !BearingCapacityFactors::from_friction_angle(phi).is_finite() {
            return Err(CalcError::invalid_configuration(
                "friction_angle_deg",
                phi.to_string(),
                "Bearing capacity factors overflow at this friction angle",
            ));
        }

        non_negative("cohesion_tm2", self.cohesion.0, "Cohesion cannot be negative")?;
        positive("safety_factor", self.safety_factor, "Safety factor must be positive")?;
        non_negative(
            "load_inclination_deg",
            self.load_inclination.0,
            "Load inclination cannot be negative",
        )?;

        if phi == 0.0 && self.load_inclination.0 > 0.0 {
            return Err(CalcError::invalid_configuration(
                "load_inclination_deg",
                self.load_inclination.0.to_string(),
                "An inclined load needs a friction angle above 0 (i_gamma divides by the friction angle)",
            ));
        }

        Ok(())
    }

    /// User label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Footing width B (m)
    pub fn width_m(&self) -> f64 {
        self.width.0
    }

    /// Footing length L (m)
    pub fn length_m(&self) -> f64 {
        self.length.0
    }

    /// Embedment depth Df (m)
    pub fn embedment_depth_m(&self) -> f64 {
        self.embedment_depth.0
    }

    /// Unit weight above the foundation level γ1 (t/m³)
    pub fn unit_weight_above_tm3(&self) -> f64 {
        self.unit_weight_above.0
    }

    /// Unit weight below the foundation level γ2 (t/m³)
    pub fn unit_weight_below_tm3(&self) -> f64 {
        self.unit_weight_below.0
    }

    /// Friction angle φ (degrees)
    pub fn friction_angle_deg(&self) -> f64 {
        self.friction_angle.0
    }

    /// Friction angle φ (radians)
    pub fn friction_angle_rad(&self) -> f64 {
        Radians::from(self.friction_angle).0
    }

    /// Cohesion c (t/m²)
    pub fn cohesion_tm2(&self) -> f64 {
        self.cohesion.0
    }

    /// Factor of safety
    pub fn safety_factor(&self) -> f64 {
        self.safety_factor
    }

    /// Load inclination β (degrees)
    pub fn load_inclination_deg(&self) -> f64 {
        self.load_inclination.0
    }

    /// Footing shape
    pub fn shape(&self) -> FootingShape {
        self.shape
    }

    /// Embedment ratio Df/B
    pub fn depth_ratio(&self) -> f64 {
        self.embedment_depth / self.width
    }

    /// Overburden pressure at the foundation level, q = γ1·Df (t/m²)
    pub fn overburden_tm2(&self) -> f64 {
        (self.unit_weight_above * self.embedment_depth).0
    }

    /// True when β ≥ φ, outside the intended range of iγ
    pub fn inclination_exceeds_friction(&self) -> bool {
        inclination_beyond_friction(self.load_inclination.0, self.friction_angle.0)
    }
}

impl TryFrom<FoundationRecord> for FoundationInput {
    type Error = CalcError;

    fn try_from(record: FoundationRecord) -> CalcResult<Self> {
        let shape: FootingShape = record.shape.parse()?;
        let input = FoundationInput {
            label: record.label,
            width: Meters(record.width_m),
            length: Meters(record.length_m),
            embedment_depth: Meters(record.embedment_depth_m),
            unit_weight_above: TonnesPerCubicMeter(record.unit_weight_above_tm3),
            unit_weight_below: TonnesPerCubicMeter(record.unit_weight_below_tm3),
            friction_angle: Degrees(record.friction_angle_deg),
            cohesion: TonnesPerSquareMeter(record.cohesion_tm2),
            safety_factor: record.safety_factor,
            load_inclination: Degrees(record.load_inclination_deg),
            shape,
        };
        input.validate()?;
        Ok(input)
    }
}

impl From<FoundationInput> for FoundationRecord {
    fn from(input: FoundationInput) -> Self {
        FoundationRecord {
            label: input.label,
            width_m: input.width.0,
            length_m: input.length.0,
            embedment_depth_m: input.embedment_depth.0,
            unit_weight_above_tm3: input.unit_weight_above.0,
            unit_weight_below_tm3: input.unit_weight_below.0,
            friction_angle_deg: input.friction_angle.0,
            cohesion_tm2: input.cohesion.0,
            safety_factor: input.safety_factor,
            load_inclination_deg: input.load_inclination.0,
            shape: input.shape.name().to_string(),
        }
    }
}

fn positive(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(field, value.to_string(), reason))
    }
}

fn non_negative(field: &str, value: f64, reason: &str) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_configuration(field, value.to_string(), reason))
    }
}

/// Builder for [`FoundationInput`].
#[derive(Debug, Clone, Default)]
pub struct FoundationInputBuilder {
    label: String,
    width_m: Option<f64>,
    length_m: Option<f64>,
    embedment_depth_m: Option<f64>,
    unit_weight_above_tm3: Option<f64>,
    unit_weight_below_tm3: Option<f64>,
    friction_angle_deg: Option<f64>,
    cohesion_tm2: f64,
    safety_factor: Option<f64>,
    load_inclination_deg: f64,
    shape: FootingShape,
}

impl FoundationInputBuilder {
    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the footing width B (m)
    pub fn with_width(mut self, width_m: f64) -> Self {
        self.width_m = Some(width_m);
        self
    }

    /// Set the footing length L (m)
    pub fn with_length(mut self, length_m: f64) -> Self {
        self.length_m = Some(length_m);
        self
    }

    /// Set the embedment depth Df (m)
    pub fn with_embedment_depth(mut self, embedment_depth_m: f64) -> Self {
        self.embedment_depth_m = Some(embedment_depth_m);
        self
    }

    /// Set γ1 (above the foundation level) and γ2 (below), t/m³
    pub fn with_unit_weights(mut self, above_tm3: f64, below_tm3: f64) -> Self {
        self.unit_weight_above_tm3 = Some(above_tm3);
        self.unit_weight_below_tm3 = Some(below_tm3);
        self
    }

    /// Set the friction angle φ (degrees)
    pub fn with_friction_angle(mut self, friction_angle_deg: f64) -> Self {
        self.friction_angle_deg = Some(friction_angle_deg);
        self
    }

    /// Set the cohesion c (t/m²)
    pub fn with_cohesion(mut self, cohesion_tm2: f64) -> Self {
        self.cohesion_tm2 = cohesion_tm2;
        self
    }

    /// Set the factor of safety
    pub fn with_safety_factor(mut self, safety_factor: f64) -> Self {
        self.safety_factor = Some(safety_factor);
        self
    }

    /// Set the load inclination β (degrees from vertical)
    pub fn with_load_inclination(mut self, load_inclination_deg: f64) -> Self {
        self.load_inclination_deg = load_inclination_deg;
        self
    }

    /// Set the footing shape
    pub fn with_shape(mut self, shape: FootingShape) -> Self {
        self.shape = shape;
        self
    }

    /// Validate and build the input.
    pub fn build(self) -> CalcResult<FoundationInput> {
        let input = FoundationInput {
            label: self.label,
            width: Meters(required("width_m", self.width_m)?),
            length: Meters(required("length_m", self.length_m)?),
            embedment_depth: Meters(required("embedment_depth_m", self.embedment_depth_m)?),
            unit_weight_above: TonnesPerCubicMeter(required(
                "unit_weight_above_tm3",
                self.unit_weight_above_tm3,
            )?),
            unit_weight_below: TonnesPerCubicMeter(required(
                "unit_weight_below_tm3",
                self.unit_weight_below_tm3,
            )?),
            friction_angle: Degrees(required("friction_angle_deg", self.friction_angle_deg)?),
            cohesion: TonnesPerSquareMeter(self.cohesion_tm2),
            safety_factor: required("safety_factor", self.safety_factor)?,
            load_inclination: Degrees(self.load_inclination_deg),
            shape: self.shape,
        };
        input.validate()?;
        Ok(input)
    }
}

fn required(field: &str, value: Option<f64>) -> CalcResult<f64> {
    value.ok_or_else(|| CalcError::invalid_configuration(field, "unset", "Value is required"))
}

// ============================================================================
// Result
// ============================================================================

/// Results of a bearing capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "bearing_factors": { "nc": 33.76, "nq": 21.61, "n_gamma": 27.60 },
///   "shape_factors": { "sc": 1.32, "sq": 1.31, "s_gamma": 0.8 },
///   "depth_factors": { "dc": 1.2, "dq": 1.14, "d_gamma": 1.0 },
///   "inclination_factors": { "ic": 1.0, "iq": 1.0, "i_gamma": 1.0 },
///   "cohesion_term_tm2": 0.0,
///   "surcharge_term_tm2": 62.05,
///   "self_weight_term_tm2": 42.62,
///   "ultimate_raw_tm2": 104.67,
///   "ultimate_capacity_kgcm2": 10.47,
///   "allowable_capacity_kgcm2": 3.49
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingCapacityResult {
    /// Nc, Nq, Nγ
    pub bearing_factors: BearingCapacityFactors,
    /// Sc, Sq, Sγ
    pub shape_factors: ShapeFactors,
    /// dc, dq, dγ
    pub depth_factors: DepthFactors,
    /// ic, iq, iγ
    pub inclination_factors: InclinationFactors,
    /// c·Nc·Sc·dc·ic (t/m²)
    pub cohesion_term_tm2: f64,
    /// q·Nq·Sq·dq·iq (t/m²)
    pub surcharge_term_tm2: f64,
    /// ½·γ2·B·Nγ·Sγ·dγ·iγ (t/m²)
    pub self_weight_term_tm2: f64,
    /// Unrounded ultimate pressure (t/m²)
    pub ultimate_raw_tm2: f64,
    /// Ultimate bearing capacity qu (kg/cm², 2 decimals)
    pub ultimate_capacity_kgcm2: f64,
    /// Allowable bearing capacity qadm (kg/cm², 2 decimals)
    pub allowable_capacity_kgcm2: f64,
}

impl BearingCapacityResult {
    /// Term contributing most to qu
    pub fn governing_term(&self) -> &'static str {
        let terms = [
            ("cohesion", self.cohesion_term_tm2),
            ("surcharge", self.surcharge_term_tm2),
            ("self-weight", self.self_weight_term_tm2),
        ];
        terms
            .iter()
            .fold(terms[0], |best, term| if term.1 > best.1 { *term } else { best })
            .0
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Compute the ultimate and allowable bearing capacity.
///
/// # Returns
///
/// * `Ok(BearingCapacityResult)` - All factor sets and both capacities
/// * `Err(CalcError::InvalidConfiguration)` - The input violates a range or
///   combination constraint; nothing is computed
pub fn compute(input: &FoundationInput) -> CalcResult<BearingCapacityResult> {
    input.validate()?;

    let phi_deg = input.friction_angle_deg();
    let phi_rad = input.friction_angle_rad();
    let width = input.width_m();

    let bearing_factors = BearingCapacityFactors::from_friction_angle(phi_deg);
    let shape_factors =
        ShapeFactors::compute(input.shape(), width, input.length_m(), &bearing_factors, phi_rad);
    let depth_factors = DepthFactors::compute(input.embedment_depth_m(), width, phi_rad);
    let inclination_factors = InclinationFactors::compute(input.load_inclination_deg(), phi_deg);

    let cohesion_term = input.cohesion_tm2()
        * bearing_factors.nc
        * shape_factors.sc
        * depth_factors.dc
        * inclination_factors.ic;

    let surcharge_term = input.embedment_depth_m()
        * input.unit_weight_above_tm3()
        * bearing_factors.nq
        * shape_factors.sq
        * depth_factors.dq
        * inclination_factors.iq;

    let self_weight_term = 0.5
        * input.unit_weight_below_tm3()
        * width
        * bearing_factors.n_gamma
        * shape_factors.s_gamma
        * depth_factors.d_gamma
        * inclination_factors.i_gamma;

    let ultimate_raw = TonnesPerSquareMeter(cohesion_term)
        + TonnesPerSquareMeter(surcharge_term)
        + TonnesPerSquareMeter(self_weight_term);

    if !ultimate_raw.0.is_finite() {
        return Err(CalcError::invalid_configuration(
            "friction_angle_deg",
            phi_deg.to_string(),
            "Ultimate bearing capacity overflows at this friction angle",
        ));
    }

    let ultimate = round_to(KgPerSquareCm::from(ultimate_raw).0, CAPACITY_DECIMALS);
    let allowable = round_to(ultimate / input.safety_factor(), CAPACITY_DECIMALS);

    log::debug!(
        "'{}': qu_raw = {:.4} t/m2 (c {:.4}, q {:.4}, gamma {:.4}) -> qu = {} kg/cm2, qadm = {} kg/cm2",
        input.label(),
        ultimate_raw.0,
        cohesion_term,
        surcharge_term,
        self_weight_term,
        ultimate,
        allowable
    );

    Ok(BearingCapacityResult {
        bearing_factors,
        shape_factors,
        depth_factors,
        inclination_factors,
        cohesion_term_tm2: cohesion_term,
        surcharge_term_tm2: surcharge_term,
        self_weight_term_tm2: self_weight_term,
        ultimate_raw_tm2: ultimate_raw.0,
        ultimate_capacity_kgcm2: ultimate,
        allowable_capacity_kgcm2: allowable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn reference_input() -> FoundationInput {
        FoundationInput::builder()
            .with_label("Reference")
            .with_width(2.0)
            .with_length(4.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.93, 1.93)
            .with_friction_angle(31.40)
            .with_cohesion(0.0)
            .with_safety_factor(3.0)
            .with_load_inclination(0.0)
            .with_shape(FootingShape::Rectangular)
            .build()
            .unwrap()
    }

    fn reference_record() -> FoundationRecord {
        FoundationRecord::from(reference_input())
    }

    #[test]
    fn test_reference_case() {
        let result = compute(&reference_input()).unwrap();

        // Nc 33.762, Nq 21.608, Nγ 27.601 at φ = 31.4°
        assert!((result.bearing_factors.nc - 33.762).abs() < 1e-3, "Nc = {}", result.bearing_factors.nc);
        assert!((result.bearing_factors.nq - 21.608).abs() < 1e-3, "Nq = {}", result.bearing_factors.nq);
        assert!((result.bearing_factors.n_gamma - 27.601).abs() < 1e-3);
        assert!((result.shape_factors.s_gamma - 0.8).abs() < 1e-12);
        assert!((result.depth_factors.dc - 1.2).abs() < 1e-12);

        // qu_raw = 104.671 t/m² → qu = 10.47 kg/cm², qadm = 10.47 / 3 = 3.49
        assert!((result.ultimate_raw_tm2 - 104.671).abs() < 1e-3, "raw = {}", result.ultimate_raw_tm2);
        assert_eq!(result.ultimate_capacity_kgcm2, 10.47);
        assert_eq!(result.allowable_capacity_kgcm2, 3.49);
        assert_eq!(result.cohesion_term_tm2, 0.0);
        assert_eq!(result.governing_term(), "surcharge");
    }

    #[test]
    fn test_square_footing() {
        let input = FoundationInput::builder()
            .with_width(2.0)
            .with_length(2.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.8, 1.8)
            .with_friction_angle(30.0)
            .with_safety_factor(3.0)
            .with_shape(FootingShape::Square)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();
        // qu_raw = 83.981 t/m²
        assert_eq!(result.ultimate_capacity_kgcm2, 8.4);
        assert_eq!(result.allowable_capacity_kgcm2, 2.8);
    }

    #[test]
    fn test_cohesive_soil_zero_friction_angle() {
        let input = FoundationInput::builder()
            .with_width(1.5)
            .with_length(1.5)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.8, 1.9)
            .with_friction_angle(0.0)
            .with_cohesion(5.0)
            .with_safety_factor(3.0)
            .with_shape(FootingShape::Square)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();

        assert_eq!(result.bearing_factors.nc, PI + 2.0);
        assert!(result.ultimate_raw_tm2.is_finite());
        assert_eq!(result.self_weight_term_tm2, 0.0);
        // qu_raw = 40.697 t/m²
        assert_eq!(result.ultimate_capacity_kgcm2, 4.07);
        assert_eq!(result.allowable_capacity_kgcm2, 1.36);
        assert_eq!(result.governing_term(), "cohesion");
    }

    #[test]
    fn test_inclined_load_deep_footing() {
        let input = FoundationInput::builder()
            .with_width(2.0)
            .with_length(3.0)
            .with_embedment_depth(3.0)
            .with_unit_weights(1.8, 1.9)
            .with_friction_angle(28.0)
            .with_cohesion(1.5)
            .with_safety_factor(2.5)
            .with_load_inclination(10.0)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();

        assert!((result.inclination_factors.ic - (80.0f64 / 90.0).powi(2)).abs() < 1e-12);
        assert!((result.inclination_factors.i_gamma - (18.0f64 / 28.0).powi(2)).abs() < 1e-12);
        // Df/B = 1.5 → arctan regime
        assert!((result.depth_factors.dc - (1.0 + 0.4 * 1.5f64.atan())).abs() < 1e-12);
        // qu_raw = 178.523 t/m²
        assert_eq!(result.ultimate_capacity_kgcm2, 17.85);
        assert_eq!(result.allowable_capacity_kgcm2, 7.14);
    }

    #[test]
    fn test_allowable_uses_rounded_ultimate() {
        let result = compute(&reference_input()).unwrap();
        let expected = round_to(result.ultimate_capacity_kgcm2 / 3.0, 2);
        assert_eq!(result.allowable_capacity_kgcm2, expected);
    }

    #[test]
    fn test_allowable_rounds_exact_value() {
        let input = FoundationInput::builder()
            .with_width(1.5)
            .with_length(1.5)
            .with_embedment_depth(0.0)
            .with_unit_weights(1.8, 1.8)
            .with_friction_angle(0.0)
            .with_cohesion(5.0)
            .with_safety_factor(2.0)
            .with_shape(FootingShape::Square)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();

        // qu_raw = 30.708 t/m²; 3.07 / 2 is stored just below 1.535
        assert_eq!(result.ultimate_capacity_kgcm2, 3.07);
        assert_eq!(result.allowable_capacity_kgcm2, 1.53);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let input = reference_input();
        let first = compute(&input).unwrap();
        let second = compute(&input).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.ultimate_raw_tm2.to_bits(), second.ultimate_raw_tm2.to_bits());
        assert_eq!(
            first.allowable_capacity_kgcm2.to_bits(),
            second.allowable_capacity_kgcm2.to_bits()
        );
    }

    #[test]
    fn test_unsupported_shape_rejected() {
        let mut record = reference_record();
        record.shape = "triangular".to_string();
        let err = FoundationInput::try_from(record).unwrap_err();
        match err {
            CalcError::InvalidConfiguration { field, value, .. } => {
                assert_eq!(field, "shape");
                assert_eq!(value, "triangular");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_record_with_cuadrado_shape() {
        let mut record = reference_record();
        record.shape = "CUADRADO".to_string();
        let input = FoundationInput::try_from(record).unwrap();
        assert_eq!(input.shape(), FootingShape::Square);
        assert_eq!(FoundationRecord::from(input).shape, "square");
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let cases: [(&str, fn(&mut FoundationRecord)); 11] = [
            ("width_m", |r| r.width_m = 0.0),
            ("length_m", |r| r.length_m = -4.0),
            ("embedment_depth_m", |r| r.embedment_depth_m = -0.5),
            ("unit_weight_above_tm3", |r| r.unit_weight_above_tm3 = 0.0),
            ("unit_weight_below_tm3", |r| r.unit_weight_below_tm3 = f64::NAN),
            ("friction_angle_deg", |r| r.friction_angle_deg = 90.0),
            ("friction_angle_deg", |r| r.friction_angle_deg = -1.0),
            ("cohesion_tm2", |r| r.cohesion_tm2 = -0.1),
            ("safety_factor", |r| r.safety_factor = 0.0),
            ("load_inclination_deg", |r| r.load_inclination_deg = -5.0),
            ("width_m", |r| r.width_m = f64::INFINITY),
        ];

        for (field, mutate) in cases {
            let mut record = reference_record();
            mutate(&mut record);
            let err = FoundationInput::try_from(record).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_CONFIGURATION");
            match err {
                CalcError::InvalidConfiguration { field: got, .. } => assert_eq!(got, field),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }

    #[test]
    fn test_zero_friction_with_inclination_rejected() {
        let result = FoundationInput::builder()
            .with_width(1.0)
            .with_length(1.0)
            .with_embedment_depth(0.5)
            .with_unit_weights(1.8, 1.8)
            .with_friction_angle(0.0)
            .with_cohesion(4.0)
            .with_safety_factor(3.0)
            .with_load_inclination(5.0)
            .build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("load_inclination_deg"), "{}", err);
    }

    #[test]
    fn test_friction_angle_overflowing_factors_rejected() {
        for phi in [89.8, 89.9, 89.99] {
            let mut record = reference_record();
            record.friction_angle_deg = phi;
            match FoundationInput::try_from(record) {
                Err(CalcError::InvalidConfiguration { field, .. }) => assert_eq!(field, "friction_angle_deg"),
                other => panic!("phi = {}: expected InvalidConfiguration, got {:?}", phi, other),
            }
        }
    }

    #[test]
    fn test_steep_friction_angle_stays_finite() {
        let mut record = reference_record();
        record.friction_angle_deg = 89.5;
        let input = FoundationInput::try_from(record).unwrap();
        let result = compute(&input).unwrap();

        assert!(result.bearing_factors.is_finite());
        assert!(result.shape_factors.sc.is_finite());
        assert!(result.ultimate_capacity_kgcm2.is_finite() && result.ultimate_capacity_kgcm2 > 0.0);
        assert!(result.allowable_capacity_kgcm2.is_finite());
    }

    #[test]
    fn test_missing_builder_value() {
        let err = FoundationInput::builder().with_width(2.0).build().unwrap_err();
        match err {
            CalcError::InvalidConfiguration { field, value, .. } => {
                assert_eq!(field, "length_m");
                assert_eq!(value, "unset");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_inclination_beyond_friction_is_computed() {
        let input = FoundationInput::builder()
            .with_width(2.0)
            .with_length(2.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.8, 1.8)
            .with_friction_angle(20.0)
            .with_safety_factor(3.0)
            .with_load_inclination(30.0)
            .with_shape(FootingShape::Circular)
            .build()
            .unwrap();
        assert!(input.inclination_exceeds_friction());
        let result = compute(&input).unwrap();
        assert!((result.inclination_factors.i_gamma - 0.25).abs() < 1e-12);
        assert!(result.ultimate_capacity_kgcm2 >= 0.0);
    }

    #[test]
    fn test_width_longer_than_length_allowed() {
        let input = FoundationInput::builder()
            .with_width(4.0)
            .with_length(2.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.8, 1.8)
            .with_friction_angle(30.0)
            .with_safety_factor(3.0)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();
        // B/L = 2 → Sγ = 1 - 0.8
        assert!((result.shape_factors.s_gamma - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_json_roundtrip_and_validation() {
        let input = reference_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("\"shape\": \"rectangular\""));
        assert!(json.contains("\"friction_angle_deg\": 31.4"));

        let roundtrip: FoundationInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, input);

        let bad = json.replace("\"rectangular\"", "\"triangular\"");
        assert!(serde_json::from_str::<FoundationInput>(&bad).is_err());
    }

    #[test]
    fn test_accessors() {
        let input = reference_input();
        assert_eq!(input.label(), "Reference");
        assert_eq!(input.depth_ratio(), 0.5);
        assert!((input.overburden_tm2() - 1.93).abs() < 1e-12);
        assert!((input.friction_angle_rad() - 31.4f64.to_radians()).abs() < 1e-15);
        assert!(!input.inclination_exceeds_friction());
    }
}
