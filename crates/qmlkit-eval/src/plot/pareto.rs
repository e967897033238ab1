//! Pareto plot rendering.

use crate::pareto::{LABEL_FONT_SIZE, ParetoPlot};

use super::svg::{Anchor, Stroke, SvgDocument, escape};
use super::{TAB10, format_tick, nice_step, ticks};

const GRID: &str = "#b0b0b0";
const AXIS: &str = "#000000";
const FRONT_COLOR: &str = TAB10[0];
const POINT_RADIUS: f64 = 4.5;

/// Render `plot`: grid and axes, faint off-front scatter, the dashed front
/// line with opaque markers, a legend, and the repelled labels.
pub fn render(plot: &ParetoPlot) -> String {
    let frame = plot.frame();
    let (left, top, right, bottom) = frame.plot_bounds();
    let mut doc = SvgDocument::new(frame.width, frame.height);
    doc.arrow_marker("label-arrow", AXIS, 0.25);

    let x_ticks = ticks(0.0, plot.x_max, nice_step(plot.x_max, 10));
    let y_ticks = ticks(0.0, 1.0, 0.1);
    let grid = Stroke::solid(GRID, 0.8).with_opacity(0.5);
    for &x in &x_ticks {
        let (px, _) = frame.to_pixel(x, 0.0);
        doc.line((px, top), (px, bottom), grid);
        doc.line((px, bottom), (px, bottom + 5.0), Stroke::solid(AXIS, 1.0));
        doc.text((px, bottom + 22.0), &format_tick(x), 13.0, Anchor::Middle);
    }
    for &y in &y_ticks {
        let (_, py) = frame.to_pixel(0.0, y);
        doc.line((left, py), (right, py), grid);
        doc.line((left - 5.0, py), (left, py), Stroke::solid(AXIS, 1.0));
        doc.text((left - 9.0, py + 4.5), &format_tick(y), 13.0, Anchor::End);
    }
    doc.rect((left, top), (right - left, bottom - top), "none", Some(Stroke::solid(AXIS, 1.0)));

    doc.text(((left + right) / 2.0, top - 25.0), &plot.title, 18.0, Anchor::Middle);
    doc.text(((left + right) / 2.0, frame.height - 25.0), &plot.x_label, 15.0, Anchor::Middle);
    doc.raw_text(
        (28.0, (top + bottom) / 2.0),
        &escape(&plot.y_label),
        15.0,
        Anchor::Middle,
        Some(-90.0),
    );

    for p in plot.points.iter().filter(|p| !p.on_front) {
        doc.circle(frame.to_pixel(p.x, p.y), POINT_RADIUS, FRONT_COLOR, 0.25);
    }
    let front: Vec<(f64, f64)> = plot.front().map(|p| frame.to_pixel(p.x, p.y)).collect();
    doc.polyline(&front, Stroke::solid(FRONT_COLOR, 1.8).dashed("7 4"));
    for &pos in &front {
        doc.circle(pos, POINT_RADIUS, FRONT_COLOR, 1.0);
    }

    for label in &plot.labels {
        let anchor = frame.to_pixel(label.anchor.0, label.anchor.1);
        if label.displaced {
            doc.arrow(label.center, anchor, Stroke::solid(AXIS, 1.0).with_opacity(0.25), "label-arrow");
        }
        doc.text(
            (label.center.0, label.center.1 + LABEL_FONT_SIZE * 0.35),
            &label.text,
            LABEL_FONT_SIZE,
            Anchor::Middle,
        );
    }

    let legend = (right - 170.0, top + 14.0);
    doc.rect(legend, (156.0, 34.0), "#ffffff", Some(Stroke::solid(GRID, 1.0)));
    doc.line(
        (legend.0 + 12.0, legend.1 + 17.0),
        (legend.0 + 44.0, legend.1 + 17.0),
        Stroke::solid(FRONT_COLOR, 1.8).dashed("7 4"),
    );
    doc.text((legend.0 + 54.0, legend.1 + 22.0), "Pareto Front", 14.0, Anchor::Start);

    doc.finish()
}
