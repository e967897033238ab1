//! Bloch-sphere rendering.
//!
//! Spheres are drawn in an orthographic projection seen from azimuth -60°
//! and elevation 30°.

use std::f64::consts::TAU;

use crate::bloch::BlochPlot;

use super::svg::{Anchor, Stroke, SvgDocument};

const PANEL_WIDTH: f64 = 500.0;
const HEIGHT: f64 = 640.0;
const RADIUS: f64 = 180.0;
const COLORBAR_WIDTH: f64 = 130.0;
const AZIMUTH_DEG: f64 = -60.0;
const ELEVATION_DEG: f64 = 30.0;
const WIRE: &str = "#808080";

/// Screen offsets `(right, up)` of a point on or inside the unit sphere.
fn project([x, y, z]: [f64; 3]) -> (f64, f64) {
    let (sa, ca) = AZIMUTH_DEG.to_radians().sin_cos();
    let (se, ce) = ELEVATION_DEG.to_radians().sin_cos();
    let right = -x * sa + y * ca;
    let up = -x * ca * se - y * sa * se + z * ce;
    (right, up)
}

fn to_pixel(center: (f64, f64), v: [f64; 3]) -> (f64, f64) {
    let (r, u) = project(v);
    (center.0 + RADIUS * r, center.1 - RADIUS * u)
}

fn great_circle(center: (f64, f64), point: impl Fn(f64) -> [f64; 3]) -> Vec<(f64, f64)> {
    (0..=72)
        .map(|i| to_pixel(center, point(TAU * f64::from(i) / 72.0)))
        .collect()
}

/// Render `plot`: one sphere per qubit titled `q_i`, every vector drawn in
/// its class colour, and a discrete colour bar listing the classes.
pub fn render(plot: &BlochPlot) -> String {
    let panels = plot.num_qubits().max(1);
    let width = PANEL_WIDTH * panels as f64 + COLORBAR_WIDTH;
    let mut doc = SvgDocument::new(width, HEIGHT);

    let colors = plot.class_colors();
    for (i, color) in colors.iter().enumerate() {
        doc.arrow_marker(&format!("bloch-arrow-{i}"), color, 1.0);
    }

    for (qubit, points) in plot.panels.iter().enumerate() {
        let center = (PANEL_WIDTH * (qubit as f64 + 0.5), HEIGHT / 2.0 + 30.0);

        doc.circle(center, RADIUS, "#f2f2f2", 0.5);
        doc.ellipse(center, (RADIUS, RADIUS), Stroke::solid(WIRE, 1.0));
        let wire = Stroke::solid(WIRE, 0.8).with_opacity(0.6);
        doc.polyline(&great_circle(center, |t| [t.cos(), t.sin(), 0.0]), wire);
        doc.polyline(&great_circle(center, |t| [t.cos(), 0.0, t.sin()]), wire.dashed("3 3"));
        doc.polyline(&great_circle(center, |t| [0.0, t.cos(), t.sin()]), wire.dashed("3 3"));
        for axis in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]] {
            let neg = axis.map(|c: f64| -c);
            doc.line(to_pixel(center, neg), to_pixel(center, axis), wire);
        }
        let label = |v: [f64; 3]| {
            let (px, py) = to_pixel(center, v);
            (px, py + 6.0)
        };
        doc.text(label([1.25, 0.0, 0.0]), "x", 16.0, Anchor::Middle);
        doc.text(label([0.0, 1.2, 0.0]), "y", 16.0, Anchor::Middle);
        doc.text(label([0.0, 0.0, 1.15]), "|0\u{27e9}", 16.0, Anchor::Middle);
        doc.text(label([0.0, 0.0, -1.2]), "|1\u{27e9}", 16.0, Anchor::Middle);

        for point in points {
            let class_index = plot.classes.binary_search(&point.class).unwrap_or_default();
            let tip = to_pixel(center, point.vector);
            doc.arrow(
                center,
                tip,
                Stroke::solid(&point.color, 2.0),
                &format!("bloch-arrow-{class_index}"),
            );
        }

        doc.raw_text(
            (center.0, 48.0),
            &format!(r#"q<tspan baseline-shift="sub" font-size="16">{qubit}</tspan>"#),
            24.0,
            Anchor::Middle,
            None,
        );
    }

    render_colorbar(&mut doc, plot, &colors, width - COLORBAR_WIDTH + 30.0);
    doc.finish()
}

fn render_colorbar(doc: &mut SvgDocument, plot: &BlochPlot, colors: &[&str], left: f64) {
    if colors.is_empty() {
        return;
    }
    let bar_height = HEIGHT * 0.5;
    let top = (HEIGHT - bar_height) / 2.0;
    let cell = bar_height / colors.len() as f64;
    let bar_width = 22.0;
    // Lowest class at the bottom.
    for (i, (color, class)) in colors.iter().zip(&plot.classes).enumerate() {
        let y = top + bar_height - cell * (i as f64 + 1.0);
        doc.rect((left, y), (bar_width, cell), color, None);
        doc.line(
            (left + bar_width, y + cell / 2.0),
            (left + bar_width + 5.0, y + cell / 2.0),
            Stroke::solid("#000000", 1.0),
        );
        doc.text((left + bar_width + 9.0, y + cell / 2.0 + 5.0), &class.to_string(), 14.0, Anchor::Start);
    }
    doc.rect((left, top), (bar_width, bar_height), "none", Some(Stroke::solid("#000000", 1.0)));
}
