//! # Equation Registry
//!
//! Central registry of every formula used by the bearing capacity engine.
//! Each equation carries metadata (formula, variables, reference, source
//! location) so reports can print an auditable "List of Equations".
//!
//! ## Usage
//!
//! ```rust
//! use footing_core::equations::registry::Equation;
//!
//! // Get metadata for the PDF appendix
//! let meta = Equation::BearingFactorNq.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// Original journal paper or report
    Publication {
        author: &'static str,
        year: u16,
    },
    /// Textbook compilation of the method
    Textbook {
        author: &'static str,
        title: &'static str,
        edition: u8,
    },
    /// Unit conversion or definition, no external source needed
    Definition,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Publication { author, year } => format!("{} ({})", author, year),
            CodeReference::Textbook { author, title, edition } => {
                format!("{}, {}, {}ed", author, title, edition)
            }
            CodeReference::Definition => "Definition".to_string(),
        }
    }

    /// Short form for inline references
    pub fn short_form(&self) -> &'static str {
        match self {
            CodeReference::Publication { author, .. } => author,
            CodeReference::Textbook { author, .. } => author,
            CodeReference::Definition => "Definition",
        }
    }
}

const DAS: CodeReference = CodeReference::Textbook {
    author: "Das",
    title: "Principles of Foundation Engineering",
    edition: 7,
};

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Nc, Nq, Nγ
    BearingCapacityFactors,
    /// Sc, Sq, Sγ
    ShapeFactors,
    /// dc, dq, dγ
    DepthFactors,
    /// ic, iq, iγ
    InclinationFactors,
    /// qu, qadm
    Capacity,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::BearingCapacityFactors => "Bearing Capacity Factors",
            EquationCategory::ShapeFactors => "Shape Factors",
            EquationCategory::DepthFactors => "Depth Factors",
            EquationCategory::InclinationFactors => "Inclination Factors",
            EquationCategory::Capacity => "Bearing Capacity",
        }
    }

    /// Sort order for reports (evaluation order of the engine)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::BearingCapacityFactors => 1,
            EquationCategory::ShapeFactors => 2,
            EquationCategory::DepthFactors => 3,
            EquationCategory::InclinationFactors => 4,
            EquationCategory::Capacity => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol in Typst math notation (e.g., "N_q", "gamma_1")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "m", "t/m³", "-")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// What this equation calculates
    pub description: &'static str,
    /// Formula in Typst math notation
    pub formula_typst: &'static str,
    /// Formula in plain text for markdown
    pub formula_plain: &'static str,
    /// Source reference
    pub reference: CodeReference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation is implemented
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the bearing capacity engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Bearing capacity factors
    // -------------------------------------------------------------------------
    /// Nq = e^(π tan φ) tan²(45° + φ/2)
    BearingFactorNq,
    /// Nc = (Nq − 1) cot φ, π + 2 at φ = 0
    BearingFactorNc,
    /// Nγ = 2 (Nq + 1) tan φ
    BearingFactorNGamma,

    // -------------------------------------------------------------------------
    // Shape factors
    // -------------------------------------------------------------------------
    /// Sc, Sq, Sγ scaled by B/L
    ShapeFactorsRectangular,
    /// Sc = 1 + Nq/Nc, Sq = 1 + tan φ, Sγ = 0.6
    ShapeFactorsSquareCircular,

    // -------------------------------------------------------------------------
    // Depth factors
    // -------------------------------------------------------------------------
    /// k = Df/B or arctan(Df/B)
    DepthParameter,
    /// dc, dq, dγ
    DepthFactors,

    // -------------------------------------------------------------------------
    // Inclination factors
    // -------------------------------------------------------------------------
    /// ic = iq = (1 − β/90)²
    InclinationFactorsCohesionSurcharge,
    /// iγ = (1 − β/φ)²
    InclinationFactorSelfWeight,

    // -------------------------------------------------------------------------
    // Capacity
    // -------------------------------------------------------------------------
    /// General bearing capacity equation
    UltimateBearingCapacity,
    /// t/m² to kg/cm² with 2-decimal rounding
    ReportedUltimateCapacity,
    /// qadm = qu / FS
    AllowableBearingCapacity,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::BearingFactorNq => EquationMetadata {
                name: "Bearing Capacity Factor Nq",
                description: "Surcharge factor from the Prandtl-Reissner log-spiral failure mechanism",
                formula_typst: r#"$N_q = e^(pi tan phi) tan^2(45 degree + phi / 2)$"#,
                formula_plain: "Nq = e^(pi*tan(phi)) * tan^2(45 + phi/2)",
                reference: CodeReference::Publication { author: "Reissner", year: 1924 },
                variables: vec![
                    Variable::new("N_q", "Surcharge bearing capacity factor", "-"),
                    Variable::new("phi", "Soil friction angle", "deg"),
                ],
                assumptions: vec!["General shear failure", "0 <= phi < 90 deg"],
                category: EquationCategory::BearingCapacityFactors,
                source_module: "factors/bearing.rs",
                source_function: "BearingCapacityFactors::from_friction_angle",
            },

            Equation::BearingFactorNc => EquationMetadata {
                name: "Bearing Capacity Factor Nc",
                description: "Cohesion factor; the cot(phi) singularity at phi = 0 is removable with limit pi + 2",
                formula_typst: r#"$N_c = (N_q - 1) cot phi$, $N_c (phi = 0) = pi + 2$"#,
                formula_plain: "Nc = (Nq - 1) / tan(phi), Nc = pi + 2 at phi = 0",
                reference: CodeReference::Publication { author: "Prandtl", year: 1921 },
                variables: vec![
                    Variable::new("N_c", "Cohesion bearing capacity factor", "-"),
                    Variable::new("N_q", "Surcharge bearing capacity factor", "-"),
                    Variable::new("phi", "Soil friction angle", "deg"),
                ],
                assumptions: vec!["General shear failure"],
                category: EquationCategory::BearingCapacityFactors,
                source_module: "factors/bearing.rs",
                source_function: "BearingCapacityFactors::from_friction_angle",
            },

            Equation::BearingFactorNGamma => EquationMetadata {
                name: "Bearing Capacity Factor Ngamma",
                description: "Self-weight factor of the soil below the foundation level",
                formula_typst: r#"$N_gamma = 2 (N_q + 1) tan phi$"#,
                formula_plain: "Ngamma = 2 * (Nq + 1) * tan(phi)",
                reference: CodeReference::Publication { author: "Vesic", year: 1973 },
                variables: vec![
                    Variable::new("N_gamma", "Self-weight bearing capacity factor", "-"),
                    Variable::new("N_q", "Surcharge bearing capacity factor", "-"),
                    Variable::new("phi", "Soil friction angle", "deg"),
                ],
                assumptions: vec!["Rough footing base"],
                category: EquationCategory::BearingCapacityFactors,
                source_module: "factors/bearing.rs",
                source_function: "BearingCapacityFactors::from_friction_angle",
            },

            Equation::ShapeFactorsRectangular => EquationMetadata {
                name: "Shape Factors (Rectangular)",
                description: "Shape corrections for a rectangular footing of width B and length L",
                formula_typst: r#"$S_c = 1 + (N_q / N_c)(B / L)$, $S_q = 1 + (B / L) tan phi$, $S_gamma = 1 - 0.4 (B / L)$"#,
                formula_plain: "Sc = 1 + (Nq/Nc)(B/L), Sq = 1 + (B/L)tan(phi), Sgamma = 1 - 0.4(B/L)",
                reference: CodeReference::Publication { author: "De Beer", year: 1970 },
                variables: vec![
                    Variable::new("B", "Footing width", "m"),
                    Variable::new("L", "Footing length", "m"),
                    Variable::new("S_c", "Cohesion shape factor", "-"),
                    Variable::new("S_q", "Surcharge shape factor", "-"),
                    Variable::new("S_gamma", "Self-weight shape factor", "-"),
                ],
                assumptions: vec!["B is the shorter side (not enforced)"],
                category: EquationCategory::ShapeFactors,
                source_module: "factors/shape.rs",
                source_function: "ShapeFactors::compute",
            },

            Equation::ShapeFactorsSquareCircular => EquationMetadata {
                name: "Shape Factors (Square / Circular)",
                description: "Shape corrections for square and circular footings",
                formula_typst: r#"$S_c = 1 + N_q / N_c$, $S_q = 1 + tan phi$, $S_gamma = 0.6$"#,
                formula_plain: "Sc = 1 + Nq/Nc, Sq = 1 + tan(phi), Sgamma = 0.6",
                reference: CodeReference::Publication { author: "De Beer", year: 1970 },
                variables: vec![
                    Variable::new("S_c", "Cohesion shape factor", "-"),
                    Variable::new("S_q", "Surcharge shape factor", "-"),
                    Variable::new("S_gamma", "Self-weight shape factor", "-"),
                ],
                assumptions: vec!["B = L (diameter for circular footings)"],
                category: EquationCategory::ShapeFactors,
                source_module: "factors/shape.rs",
                source_function: "ShapeFactors::compute",
            },

            Equation::DepthParameter => EquationMetadata {
                name: "Depth Parameter",
                description: "Embedment ratio term; switches to arctan above Df/B = 1 (k jumps from 1 to pi/4)",
                formula_typst: r#"$k = D_f / B$ for $D_f / B <= 1$, $k = arctan(D_f / B)$ for $D_f / B > 1$"#,
                formula_plain: "k = Df/B if Df/B <= 1, else k = arctan(Df/B) (rad)",
                reference: CodeReference::Publication { author: "Hansen", year: 1970 },
                variables: vec![
                    Variable::new("k", "Depth parameter", "-"),
                    Variable::new("D_f", "Embedment depth", "m"),
                    Variable::new("B", "Footing width", "m"),
                ],
                assumptions: vec!["arctan evaluated in radians"],
                category: EquationCategory::DepthFactors,
                source_module: "factors/depth.rs",
                source_function: "depth_parameter",
            },

            Equation::DepthFactors => EquationMetadata {
                name: "Depth Factors",
                description: "Depth corrections for the shear strength of the soil above the foundation level",
                formula_typst: r#"$d_c = 1 + 0.4 k$, $d_q = 1 + 2 tan phi (1 - sin phi)^2 k$, $d_gamma = 1$"#,
                formula_plain: "dc = 1 + 0.4k, dq = 1 + 2tan(phi)(1 - sin(phi))^2 k, dgamma = 1",
                reference: CodeReference::Publication { author: "Hansen", year: 1970 },
                variables: vec![
                    Variable::new("d_c", "Cohesion depth factor", "-"),
                    Variable::new("d_q", "Surcharge depth factor", "-"),
                    Variable::new("d_gamma", "Self-weight depth factor", "-"),
                    Variable::new("k", "Depth parameter", "-"),
                ],
                assumptions: vec!["Soil above the foundation level contributes shear strength"],
                category: EquationCategory::DepthFactors,
                source_module: "factors/depth.rs",
                source_function: "DepthFactors::compute",
            },

            Equation::InclinationFactorsCohesionSurcharge => EquationMetadata {
                name: "Inclination Factors ic, iq",
                description: "Reduction of the cohesion and surcharge terms for a load inclined from the vertical",
                formula_typst: r#"$i_c = i_q = (1 - beta / 90 degree)^2$"#,
                formula_plain: "ic = iq = (1 - beta/90)^2",
                reference: CodeReference::Publication { author: "Meyerhof", year: 1963 },
                variables: vec![
                    Variable::new("i_c", "Cohesion inclination factor", "-"),
                    Variable::new("i_q", "Surcharge inclination factor", "-"),
                    Variable::new("beta", "Load inclination from the vertical", "deg"),
                ],
                assumptions: vec!["Squared form stays >= 0 for beta > 90 deg (outside physical range)"],
                category: EquationCategory::InclinationFactors,
                source_module: "factors/inclination.rs",
                source_function: "InclinationFactors::compute",
            },

            Equation::InclinationFactorSelfWeight => EquationMetadata {
                name: "Inclination Factor igamma",
                description: "Reduction of the self-weight term for an inclined load",
                formula_typst: r#"$i_gamma = (1 - beta / phi)^2$"#,
                formula_plain: "igamma = (1 - beta/phi)^2",
                reference: CodeReference::Publication { author: "Meyerhof", year: 1963 },
                variables: vec![
                    Variable::new("i_gamma", "Self-weight inclination factor", "-"),
                    Variable::new("beta", "Load inclination from the vertical", "deg"),
                    Variable::new("phi", "Soil friction angle", "deg"),
                ],
                assumptions: vec![
                    "beta < phi intended; larger values are computed but flagged",
                    "phi = 0 only with a vertical load (igamma = 1)",
                ],
                category: EquationCategory::InclinationFactors,
                source_module: "factors/inclination.rs",
                source_function: "InclinationFactors::compute",
            },

            Equation::UltimateBearingCapacity => EquationMetadata {
                name: "General Bearing Capacity Equation",
                description: "Ultimate pressure as the sum of the cohesion, surcharge and self-weight terms",
                formula_typst: r#"$q_u = c N_c S_c d_c i_c + D_f gamma_1 N_q S_q d_q i_q + 1/2 gamma_2 B N_gamma S_gamma d_gamma i_gamma$"#,
                formula_plain: "qu = c Nc Sc dc ic + Df g1 Nq Sq dq iq + 0.5 g2 B Ngamma Sgamma dgamma igamma",
                reference: DAS,
                variables: vec![
                    Variable::new("q_u", "Ultimate bearing pressure", "t/m²"),
                    Variable::new("c", "Cohesion", "t/m²"),
                    Variable::new("D_f", "Embedment depth", "m"),
                    Variable::new("gamma_1", "Unit weight above the foundation level", "t/m³"),
                    Variable::new("gamma_2", "Unit weight below the foundation level", "t/m³"),
                    Variable::new("B", "Footing width", "m"),
                ],
                assumptions: vec!["Centric load", "Homogeneous soil below the footing"],
                category: EquationCategory::Capacity,
                source_module: "calculations/bearing_capacity.rs",
                source_function: "compute",
            },

            Equation::ReportedUltimateCapacity => EquationMetadata {
                name: "Reported Ultimate Capacity",
                description: "Conversion from t/m² to kg/cm² with 2-decimal rounding",
                formula_typst: r#"$q_u ["kg/cm"^2] = "round"(q_u ["t/m"^2] / 10, 2)$"#,
                formula_plain: "qu[kg/cm2] = round(qu[t/m2] / 10, 2)",
                reference: CodeReference::Definition,
                variables: vec![Variable::new("q_u", "Ultimate bearing capacity", "kg/cm²")],
                assumptions: vec!["Rounding half away from zero"],
                category: EquationCategory::Capacity,
                source_module: "units.rs",
                source_function: "round_to",
            },

            Equation::AllowableBearingCapacity => EquationMetadata {
                name: "Allowable Bearing Capacity",
                description: "Design pressure from the rounded ultimate capacity and the factor of safety",
                formula_typst: r#"$q_"adm" = "round"(q_u / "FS", 2)$"#,
                formula_plain: "qadm = round(qu / FS, 2)",
                reference: CodeReference::Definition,
                variables: vec![
                    Variable::new("q_\"adm\"", "Allowable bearing capacity", "kg/cm²"),
                    Variable::new("\"FS\"", "Factor of safety", "-"),
                ],
                assumptions: vec!["Uses the already rounded qu"],
                category: EquationCategory::Capacity,
                source_module: "calculations/bearing_capacity.rs",
                source_function: "compute",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories in report order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![
            BearingCapacityFactors,
            ShapeFactors,
            DepthFactors,
            InclinationFactors,
            Capacity,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::BearingFactorNq,
    Equation::BearingFactorNc,
    Equation::BearingFactorNGamma,
    Equation::ShapeFactorsRectangular,
    Equation::ShapeFactorsSquareCircular,
    Equation::DepthParameter,
    Equation::DepthFactors,
    Equation::InclinationFactorsCohesionSurcharge,
    Equation::InclinationFactorSelfWeight,
    Equation::UltimateBearingCapacity,
    Equation::ReportedUltimateCapacity,
    Equation::AllowableBearingCapacity,
];

// ============================================================================
// Typst Appendix Generation
// ============================================================================

/// Group equations by category in report order, dropping repeats.
pub fn group_by_category(equations: &[Equation]) -> Vec<(EquationCategory, Vec<Equation>)> {
    let mut groups: Vec<(EquationCategory, Vec<Equation>)> = Vec::new();
    for &equation in equations {
        let category = equation.metadata().category;
        match groups.iter_mut().find(|(cat, _)| *cat == category) {
            Some((_, members)) if members.contains(&equation) => {}
            Some((_, members)) => members.push(equation),
            None => groups.push((category, vec![equation])),
        }
    }
    groups.sort_by_key(|(cat, _)| cat.sort_order());
    groups
}

/// Generate Typst markup for the "List of Equations" appendix.
///
/// ```rust
/// use footing_core::equations::registry::{
///     bearing_capacity_equations, generate_static_equations_appendix_typst,
/// };
/// use footing_core::factors::FootingShape;
///
/// let typst = generate_static_equations_appendix_typst(&bearing_capacity_equations(FootingShape::Square));
/// assert!(typst.contains("Bearing Capacity Factor Nq"));
/// ```
pub fn generate_static_equations_appendix_typst(equations: &[Equation]) -> String {
    let mut output = String::new();

    output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Appendix: List of Equations]
  ]
]

#v(12pt)

#text(size: 10pt)[
  Equations used in this bearing capacity calculation, with their source.
]

#v(16pt)
"##);

    let by_category = group_by_category(equations);
    if by_category.is_empty() {
        output.push_str("#text(style: \"italic\")[No equations recorded for this calculation.]\n");
        return output;
    }

    for (category, equations) in by_category {
        output.push_str(&format!("\n== {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("=== {}\n\n", meta.name));
            output.push_str(&format!("#text(size: 10pt)[{}]\n\n", meta.description));
            output.push_str(&format!("*Formula:* {}\n\n", meta.formula_typst));
            output.push_str(&format!("*Reference:* {}\n\n", meta.reference.citation()));

            if !meta.variables.is_empty() {
                output.push_str("*Variables:*\n");
                output.push_str("#table(\n");
                output.push_str("  columns: (auto, 1fr, auto),\n");
                output.push_str("  inset: 6pt,\n");
                output.push_str("  stroke: 0.5pt,\n");
                output.push_str("  align: (left, left, left),\n");
                output.push_str("  table.header([*Symbol*], [*Description*], [*Units*]),\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "  [${}$], [{}], [{}],\n",
                        escape_typst_math(var.symbol),
                        var.description,
                        var.units
                    ));
                }
                output.push_str(")\n\n");
            }

            if !meta.assumptions.is_empty() {
                output.push_str("*Assumptions:*\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("#v(8pt)\n");
            output.push_str("#line(length: 100%, stroke: 0.25pt + gray)\n");
            output.push_str("#v(8pt)\n\n");
        }
    }

    output
}

/// Equations applied by one bearing capacity calculation of the given shape.
pub fn bearing_capacity_equations(shape: crate::factors::FootingShape) -> Vec<Equation> {
    use crate::factors::FootingShape;

    let shape_equation = match shape {
        FootingShape::Rectangular => Equation::ShapeFactorsRectangular,
        FootingShape::Square | FootingShape::Circular => Equation::ShapeFactorsSquareCircular,
    };

    vec![
        Equation::BearingFactorNq,
        Equation::BearingFactorNc,
        Equation::BearingFactorNGamma,
        shape_equation,
        Equation::DepthParameter,
        Equation::DepthFactors,
        Equation::InclinationFactorsCohesionSurcharge,
        Equation::InclinationFactorSelfWeight,
        Equation::UltimateBearingCapacity,
        Equation::ReportedUltimateCapacity,
        Equation::AllowableBearingCapacity,
    ]
}

/// Escape backslashes for Typst math mode; underscores stay as subscripts
fn escape_typst_math(s: &str) -> String {
    s.replace('\\', "\\\\")
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate the EQUATIONS.md reference document.
///
/// ```rust
/// use footing_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Footing Equations Reference"));
/// assert!(markdown.contains("Shape Factors"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Footing Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists every formula used by the bearing capacity engine, with
its source, implementation location and assumptions.

## Units

| Quantity | Unit |
|----------|------|
| Lengths (B, L, Df) | m |
| Unit weights (gamma_1, gamma_2) | t/m³ |
| Cohesion, raw pressure | t/m² |
| Reported capacities (qu, qadm) | kg/cm² |
| Angles (phi, beta) | degrees |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!(
                        "| {} | {} | {} |\n",
                        var.symbol.replace('"', ""),
                        var.description,
                        var.units
                    ));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FootingShape;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 12);

        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_typst.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.formula_plain.is_empty(), "Equation {:?} has no plain formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_module.is_empty(), "Equation {:?} missing source_module", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} missing source_function", eq);
        }

        let nc = Equation::BearingFactorNc.metadata();
        assert!(nc.formula_plain.contains("pi + 2"), "Nc limit missing");

        let shape = Equation::ShapeFactorsSquareCircular.metadata();
        assert!(shape.formula_plain.contains("Sgamma = 0.6"));
    }

    #[test]
    fn test_code_reference_citation() {
        let paper = CodeReference::Publication { author: "Vesic", year: 1973 };
        assert_eq!(paper.citation(), "Vesic (1973)");
        assert_eq!(paper.short_form(), "Vesic");
        assert_eq!(DAS.citation(), "Das, Principles of Foundation Engineering, 7ed");
        assert_eq!(CodeReference::Definition.short_form(), "Definition");
    }

    #[test]
    fn test_every_category_populated() {
        for category in Equation::all_categories() {
            assert!(
                !Equation::in_category(category).is_empty(),
                "Category {:?} has no equations",
                category
            );
        }
    }

    #[test]
    fn test_group_by_category_sorted_and_deduplicated() {
        let groups = group_by_category(&[
            Equation::AllowableBearingCapacity,
            Equation::InclinationFactorSelfWeight,
            Equation::BearingFactorNc,
            Equation::BearingFactorNq,
            Equation::BearingFactorNc,
        ]);

        let categories: Vec<_> = groups.iter().map(|(cat, _)| *cat).collect();
        assert_eq!(
            categories,
            vec![
                EquationCategory::BearingCapacityFactors,
                EquationCategory::InclinationFactors,
                EquationCategory::Capacity,
            ]
        );
        assert_eq!(groups[0].1, vec![Equation::BearingFactorNc, Equation::BearingFactorNq]);
    }

    #[test]
    fn test_equations_for_shape() {
        let rect = bearing_capacity_equations(FootingShape::Rectangular);
        assert!(rect.contains(&Equation::ShapeFactorsRectangular));
        assert!(!rect.contains(&Equation::ShapeFactorsSquareCircular));

        let circle = bearing_capacity_equations(FootingShape::Circular);
        assert!(circle.contains(&Equation::ShapeFactorsSquareCircular));
        assert_eq!(circle.len(), 11);
    }

    #[test]
    fn test_generate_appendix_typst() {
        let typst = generate_static_equations_appendix_typst(&bearing_capacity_equations(FootingShape::Square));
        assert!(typst.contains("Appendix: List of Equations"));
        assert!(typst.contains("General Bearing Capacity Equation"));
        assert!(typst.contains("De Beer (1970)"));
        assert!(typst.contains("== Depth Factors"));
        assert!(typst.contains("Shape Factors (Square / Circular)"));
        assert!(!typst.contains("Shape Factors (Rectangular)"));
    }

    #[test]
    fn test_generate_appendix_empty() {
        let typst = generate_static_equations_appendix_typst(&[]);
        assert!(typst.contains("No equations recorded"));
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();

        assert!(markdown.contains("# Footing Equations Reference"));
        assert!(markdown.contains("Auto-generated from source code"));
        assert!(markdown.contains("## Units"));
        for category in Equation::all_categories() {
            assert!(
                markdown.contains(&format!("## {}", category.display_name())),
                "Missing category {:?}",
                category
            );
        }
        assert!(markdown.contains("`Ngamma = 2 * (Nq + 1) * tan(phi)`"));
        assert!(markdown.contains("factors/depth.rs"));
        assert!(markdown.contains("**Total Equations:** 12"));
        assert!(markdown.contains("**Categories:** 5"));
        // Typst quoting does not leak into markdown tables
        assert!(markdown.contains("| q_adm |"));
    }
}
