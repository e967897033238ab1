//! SVG rendering for the Pareto and Bloch-sphere plots.

pub mod bloch;
pub mod pareto;
pub mod svg;

pub use svg::SvgDocument;

/// The matplotlib `tab10` palette.
pub const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Colour of class `index` out of `num_classes`, spread over the palette as
/// a discrete colour bar does: the first class takes the first colour, the
/// last class the last one.
pub fn class_color(index: usize, num_classes: usize) -> &'static str {
    let n = TAB10.len();
    let slot = match num_classes {
        0 | 1 => (n - 1) / 2,
        k if k > n => index % n,
        k => index * (n - 1) / (k - 1),
    };
    TAB10[slot.min(n - 1)]
}

/// Maps data coordinates into a pixel rectangle of a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Plot area margins: left, top, right, bottom.
    pub margins: (f64, f64, f64, f64),
    /// Horizontal data range.
    pub x_range: (f64, f64),
    /// Vertical data range.
    pub y_range: (f64, f64),
}

impl Frame {
    /// The 16 x 10 inch frame (at 100 dpi) used by the Pareto plot.
    pub fn pareto(x_range: (f64, f64), y_range: (f64, f64)) -> Self {
        Self {
            width: 1600.0,
            height: 1000.0,
            margins: (90.0, 70.0, 40.0, 80.0),
            x_range,
            y_range,
        }
    }

    /// Plot area as `(left, top, right, bottom)` pixels.
    pub fn plot_bounds(&self) -> (f64, f64, f64, f64) {
        let (l, t, r, b) = self.margins;
        (l, t, self.width - r, self.height - b)
    }

    /// Pixel position of a data point; `y` grows downwards on screen.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let (left, top, right, bottom) = self.plot_bounds();
        let fx = normalize(x, self.x_range);
        let fy = normalize(y, self.y_range);
        (left + fx * (right - left), bottom - fy * (bottom - top))
    }
}

fn normalize(v: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo { (v - lo) / (hi - lo) } else { 0.5 }
}

/// Evenly spaced tick values from `lo` to `hi` inclusive.
pub(crate) fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || hi < lo {
        return vec![];
    }
    let count = ((hi - lo) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| lo + i as f64 * step).collect()
}

/// A "nice" tick step giving roughly `target` intervals over `span`.
pub(crate) fn nice_step(span: f64, target: usize) -> f64 {
    if span <= 0.0 || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Compact tick label: `0.1`, `2`, `12.5`.
pub(crate) fn format_tick(v: f64) -> String {
    let rounded = (v * 1e6).round() / 1e6;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        let s = format!("{rounded:.6}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_colors() {
        assert_eq!(class_color(0, 2), TAB10[0]);
        assert_eq!(class_color(1, 2), TAB10[9]);
        assert_eq!(class_color(1, 3), TAB10[4]);
        assert_eq!(class_color(0, 1), TAB10[4]);
        assert_eq!(class_color(11, 12), TAB10[1]);
    }

    #[test]
    fn test_frame_mapping() {
        let frame = Frame::pareto((0.0, 2.0), (0.0, 1.0));
        let (l, t, r, b) = frame.plot_bounds();
        assert_eq!(frame.to_pixel(0.0, 0.0), (l, b));
        assert_eq!(frame.to_pixel(2.0, 1.0), (r, t));
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks(0.0, 1.0, 0.1).len(), 11);
        assert!((nice_step(4.4, 10) - 0.5).abs() < 1e-12);
        assert_eq!(format_tick(0.30000000000000004), "0.3");
        assert_eq!(format_tick(2.0), "2");
    }
}
