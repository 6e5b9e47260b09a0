//! # Result Presentation
//!
//! Turns a [`BearingCapacityResult`] into something a person reads: an
//! ordered list of named values, a standalone HTML page, or an aligned text
//! table for terminals. Nothing here computes; it only formats.
//!
//! ```rust
//! use footing_core::calculations::{compute, FoundationInput};
//! use footing_core::report::{named_values, render_html_table};
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
//! let result = compute(&input).unwrap();
//!
//! let values = named_values(&result);
//! assert_eq!(values[0].0, "Nc");
//! assert_eq!(values[13], ("qadm(kg/cm2)", 3.49));
//!
//! let html = render_html_table(&result);
//! assert!(html.contains("<h1>Results</h1>"));
//! ```

use std::fmt::Write;

use crate::calculations::{BearingCapacityResult, FoundationInput};
use crate::factors::FactorSet;

/// Column label of the ultimate capacity
pub const QU_LABEL: &str = "qu(kg/cm2)";
/// Column label of the allowable capacity
pub const QADM_LABEL: &str = "qadm(kg/cm2)";

/// Display precision of the HTML table
const HTML_DECIMALS: usize = 2;

/// Symbol/value pairs in report order: Nc, Nq, Nγ, Sc, Sq, Sγ, dc, dq, dγ,
/// ic, iq, iγ, qu, qadm.
pub fn named_values(result: &BearingCapacityResult) -> Vec<(&'static str, f64)> {
    let mut values = Vec::with_capacity(14);
    values.extend(result.bearing_factors.named());
    values.extend(result.shape_factors.named());
    values.extend(result.depth_factors.named());
    values.extend(result.inclination_factors.named());
    values.push((QU_LABEL, result.ultimate_capacity_kgcm2));
    values.push((QADM_LABEL, result.allowable_capacity_kgcm2));
    values
}

/// Render a standalone HTML page titled "Results" holding a one-row table of
/// [`named_values`].
pub fn render_html_table(result: &BearingCapacityResult) -> String {
    let values = named_values(result);

    let mut header = String::new();
    let mut row = String::new();
    for (symbol, value) in &values {
        let _ = writeln!(header, "        <th>{}</th>", symbol);
        let _ = writeln!(row, "        <td>{:.*}</td>", HTML_DECIMALS, value);
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Results</title>
  <style>
    table {{
      margin-left: auto;
      margin-right: auto;
      border-collapse: collapse;
    }}
    th, td {{
      padding: 8px;
      border: 1px solid black;
      text-align: center;
    }}
    thead th {{
      background-color: gray;
      color: white;
    }}
    tbody tr:nth-child(even) {{
      background-color: #f2f2f2;
    }}
    tbody tr:nth-child(odd) {{
      background-color: white;
    }}
    h1 {{
      text-align: center;
    }}
  </style>
</head>
<body>
  <h1>Results</h1>
  <table>
    <thead>
      <tr>
{header}      </tr>
    </thead>
    <tbody>
      <tr>
{row}      </tr>
    </tbody>
  </table>
</body>
</html>
"#
    )
}

/// Render an aligned plain-text summary of the input and the result.
pub fn render_text_table(input: &FoundationInput, result: &BearingCapacityResult) -> String {
    let mut out = String::new();

    let title = if input.label().is_empty() {
        "BEARING CAPACITY".to_string()
    } else {
        format!("BEARING CAPACITY - {}", input.label())
    };
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));

    let _ = writeln!(out, "Input:");
    let rows: [(&str, String); 10] = [
        ("Shape", input.shape().display_name().to_string()),
        ("B x L", format!("{:.2} x {:.2} m", input.width_m(), input.length_m())),
        ("Df", format!("{:.2} m", input.embedment_depth_m())),
        ("γ1", format!("{:.2} t/m3", input.unit_weight_above_tm3())),
        ("γ2", format!("{:.2} t/m3", input.unit_weight_below_tm3())),
        ("φ", format!("{:.2}°", input.friction_angle_deg())),
        ("c", format!("{:.2} t/m2", input.cohesion_tm2())),
        ("β", format!("{:.2}°", input.load_inclination_deg())),
        ("FS", format!("{:.2}", input.safety_factor())),
        ("Df/B", format!("{:.3}", input.depth_ratio())),
    ];
    for (name, value) in &rows {
        let _ = writeln!(out, "  {:<6} {}", name, value);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Factors:");
    let _ = writeln!(out, "  {:<12} {:>10} {:>10} {:>10}", "", "c", "q", "γ");
    let families: [(&str, [(&str, f64); 3]); 4] = [
        ("Bearing", result.bearing_factors.named()),
        ("Shape", result.shape_factors.named()),
        ("Depth", result.depth_factors.named()),
        ("Inclination", result.inclination_factors.named()),
    ];
    for (family, values) in &families {
        let _ = writeln!(
            out,
            "  {:<12} {:>10.3} {:>10.3} {:>10.3}",
            family, values[0].1, values[1].1, values[2].1
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Capacity:");
    let _ = writeln!(out, "  {:<14} {:>10.2} t/m2", "cohesion", result.cohesion_term_tm2);
    let _ = writeln!(out, "  {:<14} {:>10.2} t/m2", "surcharge", result.surcharge_term_tm2);
    let _ = writeln!(out, "  {:<14} {:>10.2} t/m2", "self-weight", result.self_weight_term_tm2);
    let _ = writeln!(out, "  {:<14} {:>10.2} kg/cm2", "qu", result.ultimate_capacity_kgcm2);
    let _ = writeln!(out, "  {:<14} {:>10.2} kg/cm2", "qadm", result.allowable_capacity_kgcm2);
    let _ = writeln!(out, "  Governing term: {}", result.governing_term());

    if input.inclination_exceeds_friction() {
        let _ = writeln!(
            out,
            "  WARNING: load inclination reaches the friction angle; iγ is outside its range"
        );
    }

    out
}
