//! Pareto fronts over result tables.
//!
//! A row is on the front when no row with a smaller-or-equal `x` reaches its
//! `y`: after sorting by `x` ascending and `y` descending, a row's `y` must
//! strictly exceed every earlier row's `y`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{EvalError, EvalResult};
use crate::plot::Frame;

/// One table row, keyed by column name.
pub type Row = Map<String, Value>;

/// Running maximum before the first row.
const FRONT_FLOOR: f64 = -1.0;

/// A plotted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoPoint {
    /// Horizontal value.
    pub x: f64,
    /// Vertical value.
    pub y: f64,
    /// Whether the row is on the front.
    pub on_front: bool,
    /// The source row.
    pub row: Row,
}

/// Where a front label ended up after overlap removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    /// Label text.
    pub text: String,
    /// The labelled point, in data coordinates.
    pub anchor: (f64, f64),
    /// Text box centre, in pixels.
    pub center: (f64, f64),
    /// Text box size, in pixels.
    pub size: (f64, f64),
    /// Whether the label was pushed away from its start position, in which
    /// case an arrow leads back to the point.
    pub displaced: bool,
}

/// A Pareto plot ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoPlot {
    /// Plot title.
    pub title: String,
    /// Horizontal column.
    pub x_label: String,
    /// Vertical column.
    pub y_label: String,
    /// Rows with numeric `x` and `y`, sorted by `x` ascending, `y` descending.
    pub points: Vec<ParetoPoint>,
    /// Labels of the front points.
    pub labels: Vec<LabelPlacement>,
    /// Upper end of the horizontal axis.
    pub x_max: f64,
}

impl ParetoPlot {
    /// Points on the front, in plotting order.
    pub fn front(&self) -> impl Iterator<Item = &ParetoPoint> {
        self.points.iter().filter(|p| p.on_front)
    }

    /// Pixel frame the plot is laid out in.
    pub fn frame(&self) -> Frame {
        Frame::pareto((0.0, self.x_max), (0.0, 1.0))
    }

    /// Render as an SVG document.
    pub fn to_svg(&self) -> String {
        crate::plot::pareto::render(self)
    }
}

/// Mark the front of points already sorted by `x` ascending, `y` descending.
pub fn pareto_front(points: &[(f64, f64)]) -> Vec<bool> {
    let mut best = FRONT_FLOOR;
    points
        .iter()
        .map(|&(_, y)| {
            let on_front = y > best;
            best = best.max(y);
            on_front
        })
        .collect()
}

/// Build a Pareto plot of column `y` against column `x`.
///
/// Rows where either value is missing or not a number are dropped. Front
/// points are annotated with `label(row)`.
pub fn pareto_plot(
    rows: &[Row],
    x: &str,
    y: &str,
    label: impl Fn(&Row) -> String,
    title: &str,
) -> EvalResult<ParetoPlot> {
    let mut points: Vec<ParetoPoint> = rows
        .iter()
        .filter_map(|row| {
            let px = row.get(x).and_then(Value::as_f64)?;
            let py = row.get(y).and_then(Value::as_f64)?;
            Some(ParetoPoint {
                x: px,
                y: py,
                on_front: false,
                row: row.clone(),
            })
        })
        .collect();
    if points.is_empty() {
        return Err(EvalError::NoData {
            x: x.to_string(),
            y: y.to_string(),
        });
    }

    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(b.y.total_cmp(&a.y)));
    let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
    for (point, on_front) in points.iter_mut().zip(pareto_front(&coords)) {
        point.on_front = on_front;
    }

    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let x_max = if max_x > 0.0 { max_x * 1.1 } else { 1.0 };
    let frame = Frame::pareto((0.0, x_max), (0.0, 1.0));

    let front: Vec<&ParetoPoint> = points.iter().filter(|p| p.on_front).collect();
    let texts: Vec<(String, (f64, f64))> = front.iter().map(|p| (label(&p.row), (p.x, p.y))).collect();
    let obstacles: Vec<(f64, f64)> = points.iter().map(|p| frame.to_pixel(p.x, p.y)).collect();
    let labels = place_labels(&texts, &obstacles, &frame);

    debug!(
        rows = rows.len(),
        plotted = points.len(),
        front = labels.len(),
        "built Pareto plot"
    );

    Ok(ParetoPlot {
        title: title.to_string(),
        x_label: x.to_string(),
        y_label: y.to_string(),
        points,
        labels,
        x_max,
    })
}

/// Label font size in pixels.
pub(crate) const LABEL_FONT_SIZE: f64 = 13.0;
const MARKER_RADIUS: f64 = 5.0;
const MAX_ITERATIONS: usize = 200;

#[derive(Debug, Clone, Copy)]
struct TextBox {
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
}

impl TextBox {
    fn overlap(&self, other: &TextBox) -> Option<(f64, f64)> {
        let ox = (self.w + other.w) / 2.0 - (self.cx - other.cx).abs();
        let oy = (self.h + other.h) / 2.0 - (self.cy - other.cy).abs();
        (ox > 0.0 && oy > 0.0).then_some((ox, oy))
    }
}

/// Start each label to the upper right of its point, then push overlapping
/// labels apart and away from markers until nothing overlaps or the
/// iteration limit is hit.
fn place_labels(texts: &[(String, (f64, f64))], obstacles: &[(f64, f64)], frame: &Frame) -> Vec<LabelPlacement> {
    let mut boxes: Vec<TextBox> = texts
        .iter()
        .map(|(text, (x, y))| {
            let (px, py) = frame.to_pixel(*x, *y);
            let w = 0.6 * LABEL_FONT_SIZE * text.chars().count() as f64;
            let h = 1.2 * LABEL_FONT_SIZE;
            TextBox {
                cx: px + MARKER_RADIUS + 2.0 + w / 2.0,
                cy: py - MARKER_RADIUS - 2.0 - h / 2.0,
                w,
                h,
            }
        })
        .collect();
    let start = boxes.clone();

    for _ in 0..MAX_ITERATIONS {
        let mut moved = false;

        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                let Some((ox, oy)) = boxes[i].overlap(&boxes[j]) else {
                    continue;
                };
                moved = true;
                if ox < oy {
                    let dir = if boxes[i].cx <= boxes[j].cx { -1.0 } else { 1.0 };
                    let shift = ox / 2.0 + 0.5;
                    boxes[i].cx += dir * shift;
                    boxes[j].cx -= dir * shift;
                } else {
                    let dir = if boxes[i].cy <= boxes[j].cy { -1.0 } else { 1.0 };
                    let shift = oy / 2.0 + 0.5;
                    boxes[i].cy += dir * shift;
                    boxes[j].cy -= dir * shift;
                }
            }
        }

        for b in &mut boxes {
            for &(px, py) in obstacles {
                let marker = TextBox {
                    cx: px,
                    cy: py,
                    w: 2.0 * MARKER_RADIUS,
                    h: 2.0 * MARKER_RADIUS,
                };
                let Some((ox, oy)) = b.overlap(&marker) else {
                    continue;
                };
                moved = true;
                if ox < oy {
                    b.cx += if b.cx >= px { ox + 0.5 } else { -(ox + 0.5) };
                } else {
                    b.cy += if b.cy >= py { oy + 0.5 } else { -(oy + 0.5) };
                }
            }
            let (left, top, right, bottom) = frame.plot_bounds();
            b.cx = b.cx.clamp(left + b.w / 2.0, (right - b.w / 2.0).max(left + b.w / 2.0));
            b.cy = b.cy.clamp(top + b.h / 2.0, (bottom - b.h / 2.0).max(top + b.h / 2.0));
        }

        if !moved {
            break;
        }
    }

    texts
        .iter()
        .zip(boxes.iter().zip(&start))
        .map(|((text, anchor), (b, s))| LabelPlacement {
            text: text.clone(),
            anchor: *anchor,
            center: (b.cx, b.cy),
            size: (b.w, b.h),
            displaced: (b.cx - s.cx).hypot(b.cy - s.cy) > 1.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: &[(Value, Value)]) -> Vec<Row> {
        values
            .iter()
            .enumerate()
            .map(|(i, (x, y))| {
                let mut row = Row::new();
                row.insert("id".into(), json!(i));
                row.insert("num_layers".into(), x.clone());
                row.insert("score".into(), y.clone());
                row
            })
            .collect()
    }

    #[test]
    fn test_front_marking() {
        let points = [(1.0, 0.5), (2.0, 0.9), (2.0, 0.3), (3.0, 0.9), (4.0, 0.95)];
        assert_eq!(pareto_front(&points), vec![true, true, false, false, true]);
        assert_eq!(pareto_front(&[(0.0, -1.0)]), vec![false]);
    }

    #[test]
    fn test_plot_sorts_and_drops() {
        let table = rows(&[
            (json!(3), json!(0.9)),
            (json!(2), json!(0.3)),
            (json!(1), json!(0.5)),
            (json!(2), Value::Null),
            (json!(4), json!(0.95)),
            (json!("n/a"), json!(0.99)),
            (json!(2), json!(0.9)),
        ]);
        let plot = pareto_plot(&table, "num_layers", "score", |r| format!("#{}", r["id"]), "Layers").unwrap();

        let order: Vec<(f64, f64)> = plot.points.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(order, vec![(1.0, 0.5), (2.0, 0.9), (2.0, 0.3), (3.0, 0.9), (4.0, 0.95)]);
        let flags: Vec<bool> = plot.points.iter().map(|p| p.on_front).collect();
        assert_eq!(flags, vec![true, true, false, false, true]);

        let texts: Vec<&str> = plot.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["#2", "#6", "#4"]);
        assert!((plot.x_max - 4.4).abs() < 1e-12);
    }

    #[test]
    fn test_labels_do_not_overlap() {
        let table = rows(&[
            (json!(1.0), json!(0.500)),
            (json!(1.01), json!(0.501)),
            (json!(1.02), json!(0.502)),
        ]);
        let plot = pareto_plot(&table, "num_layers", "score", |_| "a long label".into(), "t").unwrap();
        assert_eq!(plot.labels.len(), 3);
        for (i, a) in plot.labels.iter().enumerate() {
            for b in &plot.labels[i + 1..] {
                let ox = (a.size.0 + b.size.0) / 2.0 - (a.center.0 - b.center.0).abs();
                let oy = (a.size.1 + b.size.1) / 2.0 - (a.center.1 - b.center.1).abs();
                assert!(ox <= 1e-9 || oy <= 1e-9, "{a:?} overlaps {b:?}");
            }
        }
        assert!(plot.labels.iter().any(|l| l.displaced));
    }

    #[test]
    fn test_empty_table() {
        let table = rows(&[(Value::Null, json!(0.5))]);
        assert!(matches!(
            pareto_plot(&table, "num_layers", "score", |_| String::new(), "t"),
            Err(EvalError::NoData { .. })
        ));
    }
}
