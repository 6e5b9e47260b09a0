//! # PDF Generation Module
//!
//! Generates bearing capacity reports as PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected by `{{PLACEHOLDER}}` replacement before compilation
//! - Fonts come from `typst-assets`, so no system fonts are needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use footing_core::calculations::{compute, FoundationInput};
//! use footing_core::pdf::render_bearing_pdf;
//!
//! let input = FoundationInput::builder()
//!     .with_label("Z-1")
//!     .with_width(2.0)
//!     .with_length(4.0)
//!     .with_embedment_depth(1.0)
//!     .with_unit_weights(1.93, 1.93)
//!     .with_friction_angle(31.4)
//!     .with_safety_factor(3.0)
//!     .build()
//!     .unwrap();
//!
//! let result = compute(&input).unwrap();
//! let pdf_bytes = render_bearing_pdf(&input, &result, "Jane Engineer", "26-014").unwrap();
//! std::fs::write("bearing_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::{BearingCapacityResult, FoundationInput};
use crate::equations::registry::{bearing_capacity_equations, generate_static_equations_appendix_typst};
use crate::errors::{CalcError, CalcResult};
use crate::factors::factor_ref;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus, New Computer Modern, DejaVu)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for a bearing capacity report
const BEARING_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2.5cm, bottom: 2.5cm, left: 2.5cm, right: 2.5cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Footing Bearing Capacity]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Shallow Foundation Bearing Capacity]
    #v(4pt)
    #text(size: 14pt)[{{LABEL}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Project Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Engineer:], [{{ENGINEER}}],
      [Job ID:], [{{JOB_ID}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Method*
    #v(4pt)
    General bearing capacity equation \
    Shape: {{REF_SHAPE}} \
    Depth: {{REF_DEPTH}} \
    Inclination: {{REF_INCLINATION}}
  ]
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Input Parameters

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Parameter*], [*Value*], [*Unit*]),
  [Shape], [{{SHAPE}}], [],
  [Width (B)], [{{WIDTH}}], [m],
  [Length (L)], [{{LENGTH}}], [m],
  [Embedment depth (D#sub[f])], [{{DEPTH}}], [m],
  [Unit weight above foundation level (γ#sub[1])], [{{GAMMA_1}}], [t/m#super[3]],
  [Unit weight below foundation level (γ#sub[2])], [{{GAMMA_2}}], [t/m#super[3]],
  [Friction angle (φ)], [{{PHI}}], [°],
  [Cohesion (c)], [{{COHESION}}], [t/m#super[2]],
  [Load inclination (β)], [{{BETA}}], [°],
  [Factor of safety (FS)], [{{FS}}], [],
)

#v(12pt)

== Correction Factors

#table(
  columns: (1fr, auto, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, right, right),
  table.header([*Family*], [*Cohesion*], [*Surcharge*], [*Self-weight*]),
  [Bearing capacity (N)], [{{NC}}], [{{NQ}}], [{{NG}}],
  [Shape (S)], [{{SC}}], [{{SQ}}], [{{SG}}],
  [Depth (d)], [{{DC}}], [{{DQ}}], [{{DG}}],
  [Inclination (i)], [{{IC}}], [{{IQ}}], [{{IG}}],
)

{{INCLINATION_NOTE}}

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Bearing Capacity

$ q_u = c N_c S_c d_c i_c + D_f gamma_1 N_q S_q d_q i_q + 1/2 gamma_2 B N_gamma S_gamma d_gamma i_gamma $

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Term*], [*Value*], [*Unit*]),
  [Cohesion], [{{TERM_C}}], [t/m#super[2]],
  [Surcharge], [{{TERM_Q}}], [t/m#super[2]],
  [Self-weight], [{{TERM_G}}], [t/m#super[2]],
  [*Total*], [*{{QU_RAW}}*], [t/m#super[2]],
)

#v(16pt)

#align(center)[
  #block(width: auto, fill: rgb("#d4edda"), inset: 16pt, radius: 4pt)[
    #text(size: 14pt, weight: "bold")[q#sub[u] = {{QU}} kg/cm#super[2]]
    #v(4pt)
    #text(size: 14pt, weight: "bold")[q#sub[adm] = {{QADM}} kg/cm#super[2]]
    #v(4pt)
    #text(size: 10pt)[Governing term: {{GOVERNING}}]
  ]
]

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by Footing \
  Calculations should be verified by a licensed geotechnical engineer.
]

{{APPENDIX}}
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render a bearing capacity calculation to PDF.
///
/// # Arguments
///
/// * `input` - The foundation input
/// * `result` - The calculation results
/// * `engineer` - Engineer name for the report
/// * `job_id` - Job/project ID
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError::Internal)` - If Typst compilation or PDF export fails
pub fn render_bearing_pdf(
    input: &FoundationInput,
    result: &BearingCapacityResult,
    engineer: &str,
    job_id: &str,
) -> CalcResult<Vec<u8>> {
    let source = build_bearing_source(input, result, engineer, job_id);
    compile_pdf(source)
}

/// Fill the report template for one calculation.
fn build_bearing_source(
    input: &FoundationInput,
    result: &BearingCapacityResult,
    engineer: &str,
    job_id: &str,
) -> String {
    let label = if input.label().is_empty() { "Footing" } else { input.label() };

    let inclination_note = if input.inclination_exceeds_friction() {
        "#text(fill: rgb(\"#b00020\"))[*Warning:* the load inclination reaches the friction angle; \
         i#sub[γ] is outside the range of its formula.]"
    } else {
        ""
    };

    let (b, s, d, i) = (
        &result.bearing_factors,
        &result.shape_factors,
        &result.depth_factors,
        &result.inclination_factors,
    );

    BEARING_TEMPLATE
        .replace("{{LABEL}}", &escape_typst(label))
        .replace("{{ENGINEER}}", &escape_typst(engineer))
        .replace("{{JOB_ID}}", &escape_typst(job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{REF_SHAPE}}", factor_ref::SHAPE)
        .replace("{{REF_DEPTH}}", factor_ref::DEPTH)
        .replace("{{REF_INCLINATION}}", &escape_typst(factor_ref::INCLINATION))
        .replace("{{SHAPE}}", input.shape().display_name())
        .replace("{{WIDTH}}", &format!("{:.2}", input.width_m()))
        .replace("{{LENGTH}}", &format!("{:.2}", input.length_m()))
        .replace("{{DEPTH}}", &format!("{:.2}", input.embedment_depth_m()))
        .replace("{{GAMMA_1}}", &format!("{:.2}", input.unit_weight_above_tm3()))
        .replace("{{GAMMA_2}}", &format!("{:.2}", input.unit_weight_below_tm3()))
        .replace("{{PHI}}", &format!("{:.2}", input.friction_angle_deg()))
        .replace("{{COHESION}}", &format!("{:.2}", input.cohesion_tm2()))
        .replace("{{BETA}}", &format!("{:.2}", input.load_inclination_deg()))
        .replace("{{FS}}", &format!("{:.2}", input.safety_factor()))
        .replace("{{NC}}", &format!("{:.3}", b.nc))
        .replace("{{NQ}}", &format!("{:.3}", b.nq))
        .replace("{{NG}}", &format!("{:.3}", b.n_gamma))
        .replace("{{SC}}", &format!("{:.3}", s.sc))
        .replace("{{SQ}}", &format!("{:.3}", s.sq))
        .replace("{{SG}}", &format!("{:.3}", s.s_gamma))
        .replace("{{DC}}", &format!("{:.3}", d.dc))
        .replace("{{DQ}}", &format!("{:.3}", d.dq))
        .replace("{{DG}}", &format!("{:.3}", d.d_gamma))
        .replace("{{IC}}", &format!("{:.3}", i.ic))
        .replace("{{IQ}}", &format!("{:.3}", i.iq))
        .replace("{{IG}}", &format!("{:.3}", i.i_gamma))
        .replace("{{INCLINATION_NOTE}}", inclination_note)
        .replace("{{TERM_C}}", &format!("{:.2}", result.cohesion_term_tm2))
        .replace("{{TERM_Q}}", &format!("{:.2}", result.surcharge_term_tm2))
        .replace("{{TERM_G}}", &format!("{:.2}", result.self_weight_term_tm2))
        .replace("{{QU_RAW}}", &format!("{:.2}", result.ultimate_raw_tm2))
        .replace("{{QU}}", &format!("{:.2}", result.ultimate_capacity_kgcm2))
        .replace("{{QADM}}", &format!("{:.2}", result.allowable_capacity_kgcm2))
        .replace("{{GOVERNING}}", result.governing_term())
        .replace(
            "{{APPENDIX}}",
            &generate_static_equations_appendix_typst(&bearing_capacity_equations(input.shape())),
        )
}

/// Compile Typst source to PDF bytes.
fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::internal(format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::internal(format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::compute;
    use crate::factors::FootingShape;

    fn reference() -> (FoundationInput, BearingCapacityResult) {
        let input = FoundationInput::builder()
            .with_label("Z-1 Test Footing")
            .with_width(2.0)
            .with_length(4.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.93, 1.93)
            .with_friction_angle(31.4)
            .with_safety_factor(3.0)
            .with_shape(FootingShape::Rectangular)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();
        (input, result)
    }

    #[test]
    fn test_template_placeholders_filled() {
        let (input, result) = reference();
        let source = build_bearing_source(&input, &result, "Test Engineer", "TEST-001");

        assert!(!source.contains("{{"), "unfilled placeholder in template");
        assert!(source.contains("Z-1 Test Footing"));
        assert!(source.contains("[Width (B)], [2.00], [m]"));
        assert!(source.contains("kg/cm#super[2]"));
        assert!(source.contains("= 10.47 kg/cm"));
        assert!(source.contains("= 3.49 kg/cm"));
        assert!(source.contains("Appendix: List of Equations"));
        assert!(source.contains("Shape Factors (Rectangular)"));
        assert!(!source.contains("*Warning:*"));
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("Job #12 @site"), "Job \\#12 \\@site");
        assert_eq!(escape_typst("a_b*c"), "a\\_b\\*c");
        assert_eq!(escape_typst("Z-1"), "Z-1");
        assert_eq!(escape_typst("Z-1 [north]"), "Z-1 \\[north\\]");
    }

    #[test]
    fn test_pdf_generation_with_bracketed_text() {
        let input = FoundationInput::builder()
            .with_label("Z-1 [north]")
            .with_width(2.0)
            .with_length(4.0)
            .with_embedment_depth(1.0)
            .with_unit_weights(1.93, 1.93)
            .with_friction_angle(31.4)
            .with_safety_factor(3.0)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();

        let source = build_bearing_source(&input, &result, "J. Doe [PE]", "26-014]");
        assert!(source.contains("Z-1 \\[north\\]"));

        let pdf = render_bearing_pdf(&input, &result, "J. Doe [PE]", "26-014]");
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }

    #[test]
    fn test_pdf_generation() {
        let (input, result) = reference();
        let pdf = render_bearing_pdf(&input, &result, "Test Engineer", "TEST-001");

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_compile_error_is_internal() {
        let err = compile_pdf("#let x = ".to_string()).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
