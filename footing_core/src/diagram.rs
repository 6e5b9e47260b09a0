//! # Footing Diagram
//!
//! SVG elevation of the footing with its soil parameters and capacities.
//!
//! The drawing is laid out in meters and mapped to pixels at a fixed scale.
//! The visible window is x ∈ [−1, B + 1], y ∈ [−1, 4], with y = 0 at the
//! foundation level and y = Df at the natural ground surface ("NT").
//!
//! ```rust
//! use footing_core::calculations::{compute, FoundationInput};
//! use footing_core::diagram::render_footing_svg;
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
//! let svg = render_footing_svg(&input, &result);
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains("qu = 10.47 kg/cm2"));
//! ```

use std::fmt::Write;

use crate::calculations::{BearingCapacityResult, FoundationInput};

/// Pixels per meter
const SCALE: f64 = 100.0;
/// Margin around the plot area for the title and axis labels (px)
const MARGIN: f64 = 50.0;

/// Footing slab thickness (m)
const SLAB_THICKNESS: f64 = 0.5;
/// Column width (m)
const COLUMN_WIDTH: f64 = 0.25;
/// Column height above the slab (m)
const COLUMN_HEIGHT: f64 = 2.0;

const Y_MIN: f64 = -1.0;
const Y_MAX: f64 = 4.0;

/// Maps drawing coordinates (m, y up) to SVG pixels (y down).
struct Frame {
    x_min: f64,
    x_max: f64,
}

impl Frame {
    fn for_width(width_m: f64) -> Self {
        Frame {
            x_min: -1.0,
            x_max: width_m + 1.0,
        }
    }

    fn px(&self, x: f64) -> f64 {
        MARGIN + (x - self.x_min) * SCALE
    }

    fn py(&self, y: f64) -> f64 {
        MARGIN + (Y_MAX - y) * SCALE
    }

    fn plot_width(&self) -> f64 {
        (self.x_max - self.x_min) * SCALE
    }

    fn plot_height(&self) -> f64 {
        (Y_MAX - Y_MIN) * SCALE
    }

    fn canvas(&self) -> (f64, f64) {
        (self.plot_width() + 2.0 * MARGIN, self.plot_height() + 2.0 * MARGIN)
    }
}

/// Render the footing diagram as a standalone SVG document.
pub fn render_footing_svg(input: &FoundationInput, result: &BearingCapacityResult) -> String {
    let width = input.width_m();
    let depth = input.embedment_depth_m();
    let frame = Frame::for_width(width);
    let (canvas_w, canvas_h) = frame.canvas();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif" font-size="12">"#,
        w = canvas_w,
        h = canvas_h
    );
    let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="white"/>"#);
    let _ = writeln!(
        svg,
        r#"  <clipPath id="plot"><rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"/></clipPath>"#,
        MARGIN,
        MARGIN,
        frame.plot_width(),
        frame.plot_height()
    );

    write_grid(&mut svg, &frame);

    let _ = writeln!(svg, r#"  <g clip-path="url(#plot)">"#);

    // Footing slab and column
    let _ = writeln!(
        svg,
        r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="gray" stroke="black" stroke-width="1"/>"#,
        frame.px(0.0),
        frame.py(SLAB_THICKNESS),
        width * SCALE,
        SLAB_THICKNESS * SCALE
    );
    let column_x = width / 2.0 - COLUMN_WIDTH / 2.0;
    let _ = writeln!(
        svg,
        r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="gray" stroke="black" stroke-width="1"/>"#,
        frame.px(column_x),
        frame.py(SLAB_THICKNESS + COLUMN_HEIGHT),
        COLUMN_WIDTH * SCALE,
        COLUMN_HEIGHT * SCALE
    );

    // Ground surface and foundation level
    let line_end = width + 2.0;
    let _ = writeln!(
        svg,
        r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="blue" stroke-width="1.5"/>"#,
        frame.px(-1.0),
        frame.py(depth),
        frame.px(line_end),
        frame.py(depth)
    );
    let _ = writeln!(
        svg,
        r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="red" stroke-width="1.5" stroke-dasharray="6 4"/>"#,
        frame.px(-1.0),
        frame.py(0.0),
        frame.px(line_end),
        frame.py(0.0)
    );

    // Soil annotations
    text(&mut svg, &frame, width, depth * 0.7, "start", &format!("γ1 = {} t/m3", input.unit_weight_above_tm3()));
    text(&mut svg, &frame, width, depth + 0.1, "start", "NT");
    text(&mut svg, &frame, -0.5, depth / 2.0, "start", &format!("Df = {} m", depth));
    text(&mut svg, &frame, width / 2.0, -0.2, "middle", &format!("γ2 = {} t/m3", input.unit_weight_below_tm3()));
    text(&mut svg, &frame, width / 2.0, -0.4, "middle", &format!("c = {} t/m2", input.cohesion_tm2()));
    text(&mut svg, &frame, width / 2.0, -0.6, "middle", &format!("φ = {}°", input.friction_angle_deg()));

    // Capacities
    boxed_text(&mut svg, &frame, width / 2.0, 3.6, &format!("qu = {} kg/cm2", result.ultimate_capacity_kgcm2));
    boxed_text(&mut svg, &frame, width / 2.0, 3.1, &format!("qadm = {} kg/cm2", result.allowable_capacity_kgcm2));

    let _ = writeln!(svg, "  </g>");

    // Frame, title and axis labels
    let _ = writeln!(
        svg,
        r#"  <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black" stroke-width="1"/>"#,
        MARGIN,
        MARGIN,
        frame.plot_width(),
        frame.plot_height()
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="16">Footing</text>"#,
        canvas_w / 2.0,
        MARGIN / 2.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="{:.1}" y="{:.1}" text-anchor="middle">Width (m)</text>"#,
        canvas_w / 2.0,
        canvas_h - 10.0
    );
    let _ = writeln!(
        svg,
        r#"  <text x="15" y="{:.1}" text-anchor="middle" transform="rotate(-90 15 {:.1})">Height (m)</text>"#,
        canvas_h / 2.0,
        canvas_h / 2.0
    );

    svg.push_str("</svg>\n");
    svg
}

/// Grid lines and tick labels at whole meters
fn write_grid(svg: &mut String, frame: &Frame) {
    let _ = writeln!(svg, r#"  <g stroke="lightgray" stroke-width="0.5">"#);
    let mut x = frame.x_min.ceil();
    while x <= frame.x_max {
        let _ = writeln!(
            svg,
            r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
            frame.px(x),
            frame.py(Y_MIN),
            frame.px(x),
            frame.py(Y_MAX)
        );
        x += 1.0;
    }
    let mut y = Y_MIN;
    while y <= Y_MAX {
        let _ = writeln!(
            svg,
            r#"    <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}"/>"#,
            frame.px(frame.x_min),
            frame.py(y),
            frame.px(frame.x_max),
            frame.py(y)
        );
        y += 1.0;
    }
    let _ = writeln!(svg, "  </g>");

    let _ = writeln!(svg, r#"  <g font-size="10" fill="dimgray">"#);
    let mut x = frame.x_min.ceil();
    while x <= frame.x_max {
        let _ = writeln!(
            svg,
            r#"    <text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            frame.px(x),
            frame.py(Y_MIN) + 14.0,
            x
        );
        x += 1.0;
    }
    let mut y = Y_MIN;
    while y <= Y_MAX {
        let _ = writeln!(
            svg,
            r#"    <text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
            MARGIN - 4.0,
            frame.py(y) + 4.0,
            y
        );
        y += 1.0;
    }
    let _ = writeln!(svg, "  </g>");
}

fn text(svg: &mut String, frame: &Frame, x: f64, y: f64, anchor: &str, content: &str) {
    let _ = writeln!(
        svg,
        r#"    <text x="{:.1}" y="{:.1}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
        frame.px(x),
        frame.py(y),
        anchor,
        escape_xml(content)
    );
}

/// Centered label inside a translucent green rounded box
fn boxed_text(svg: &mut String, frame: &Frame, x: f64, y: f64, content: &str) {
    // Rough text width at 14 px
    let box_w = content.chars().count() as f64 * 8.0 + 16.0;
    let box_h = 24.0;
    let (cx, cy) = (frame.px(x), frame.py(y));
    let _ = writeln!(
        svg,
        r#"    <rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="6" fill="green" fill-opacity="0.5" stroke="black" stroke-width="1.3"/>"#,
        cx - box_w / 2.0,
        cy - box_h / 2.0,
        box_w,
        box_h
    );
    let _ = writeln!(
        svg,
        r#"    <text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" font-size="14" fill="blue">{}</text>"#,
        cx,
        cy,
        escape_xml(content)
    );
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::compute;
    use crate::factors::FootingShape;

    fn diagram(width: f64, depth: f64) -> String {
        let input = FoundationInput::builder()
            .with_width(width)
            .with_length(4.0)
            .with_embedment_depth(depth)
            .with_unit_weights(1.93, 1.93)
            .with_friction_angle(31.4)
            .with_safety_factor(3.0)
            .with_shape(FootingShape::Rectangular)
            .build()
            .unwrap();
        let result = compute(&input).unwrap();
        render_footing_svg(&input, &result)
    }

    #[test]
    fn test_svg_document() {
        let svg = diagram(2.0, 1.0);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        // (2 + 2) m wide, 5 m tall, plus margins
        assert!(svg.contains(r#"viewBox="0 0 500 600""#));
        assert!(svg.contains(">Footing</text>"));
    }

    #[test]
    fn test_annotations() {
        let svg = diagram(2.0, 1.0);
        assert!(svg.contains("γ1 = 1.93 t/m3"));
        assert!(svg.contains("γ2 = 1.93 t/m3"));
        assert!(svg.contains("Df = 1 m"));
        assert!(svg.contains("c = 0 t/m2"));
        assert!(svg.contains("φ = 31.4°"));
        assert!(svg.contains(">NT<"));
        assert!(svg.contains("qu = 10.47 kg/cm2"));
        assert!(svg.contains("qadm = 3.49 kg/cm2"));
    }

    #[test]
    fn test_footing_and_levels_positions() {
        let svg = diagram(2.0, 1.0);
        // Slab: x = 0 -> 150 px, top at y = 0.5 -> 400 px
        assert!(svg.contains(r#"<rect x="150.0" y="400.0" width="200.0" height="50.0" fill="gray""#));
        // Column centered on the slab
        assert!(svg.contains(r#"<rect x="237.5" y="200.0" width="25.0" height="200.0" fill="gray""#));
        // Ground line at Df = 1 m, foundation level at 0
        assert!(svg.contains(r#"y1="350.0" x2="550.0" y2="350.0" stroke="blue""#));
        assert!(svg.contains(r#"y1="450.0" x2="550.0" y2="450.0" stroke="red""#));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_ground_line_follows_depth() {
        let svg = diagram(2.0, 2.5);
        // y = 2.5 -> 50 + 1.5 * 100
        assert!(svg.contains(r#"y2="200.0" stroke="blue""#));
    }

    #[test]
    fn test_canvas_grows_with_width() {
        let svg = diagram(3.0, 1.0);
        assert!(svg.contains(r#"viewBox="0 0 600 600""#));
    }
}
