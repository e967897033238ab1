//! Minimal SVG document builder.

use std::fmt::Write;

/// Stroke styling for lines and outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke<'a> {
    /// Colour.
    pub color: &'a str,
    /// Width in pixels.
    pub width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Dash pattern, e.g. `"6 4"`.
    pub dash: Option<&'a str>,
}

impl<'a> Stroke<'a> {
    /// A solid, opaque stroke.
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self {
            color,
            width,
            opacity: 1.0,
            dash: None,
        }
    }

    /// Same stroke with a dash pattern.
    #[must_use]
    pub fn dashed(mut self, pattern: &'a str) -> Self {
        self.dash = Some(pattern);
        self
    }

    /// Same stroke with an opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    fn attributes(&self) -> String {
        let mut attrs = format!(
            r#"stroke="{}" stroke-width="{:.2}" stroke-opacity="{:.2}" fill="none""#,
            self.color, self.width, self.opacity
        );
        if let Some(dash) = self.dash {
            let _ = write!(attrs, r#" stroke-dasharray="{dash}""#);
        }
        attrs
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Left aligned.
    Start,
    /// Centred.
    Middle,
    /// Right aligned.
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// An SVG document under construction.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    width: f64,
    height: f64,
    defs: String,
    body: String,
}

impl SvgDocument {
    /// A blank white canvas.
    pub fn new(width: f64, height: f64) -> Self {
        let mut doc = Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
        };
        doc.rect((0.0, 0.0), (width, height), "#ffffff", None);
        doc
    }

    /// Register an arrowhead marker usable as `marker-end="url(#id)"`.
    pub fn arrow_marker(&mut self, id: &str, color: &str, opacity: f64) {
        let _ = write!(
            self.defs,
            r#"<marker id="{id}" viewBox="0 0 10 10" refX="10" refY="5" markerWidth="8" markerHeight="8" orient="auto-start-reverse"><path d="M 0 0 L 10 5 L 0 10 z" fill="{color}" fill-opacity="{opacity:.2}"/></marker>"#
        );
    }

    /// Straight line.
    pub fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke<'_>) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {}/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            stroke.attributes()
        );
    }

    /// Line ending in a registered marker.
    pub fn arrow(&mut self, from: (f64, f64), to: (f64, f64), stroke: Stroke<'_>, marker: &str) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" {} marker-end="url(#{marker})"/>"#,
            from.0,
            from.1,
            to.0,
            to.1,
            stroke.attributes()
        );
    }

    /// Open polyline through `points`.
    pub fn polyline(&mut self, points: &[(f64, f64)], stroke: Stroke<'_>) {
        if points.is_empty() {
            return;
        }
        let coords: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
        let _ = writeln!(
            self.body,
            r#"<polyline points="{}" {}/>"#,
            coords.join(" "),
            stroke.attributes()
        );
    }

    /// Filled circle.
    pub fn circle(&mut self, center: (f64, f64), radius: f64, fill: &str, opacity: f64) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{radius:.2}" fill="{fill}" fill-opacity="{opacity:.2}"/>"#,
            center.0, center.1
        );
    }

    /// Unfilled ellipse.
    pub fn ellipse(&mut self, center: (f64, f64), radii: (f64, f64), stroke: Stroke<'_>) {
        let _ = writeln!(
            self.body,
            r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" {}/>"#,
            center.0,
            center.1,
            radii.0,
            radii.1,
            stroke.attributes()
        );
    }

    /// Rectangle with optional outline.
    pub fn rect(&mut self, origin: (f64, f64), size: (f64, f64), fill: &str, stroke: Option<Stroke<'_>>) {
        let outline = stroke.map(|s| s.attributes().replace(r#" fill="none""#, "")).unwrap_or_default();
        let _ = writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{fill}" {outline}/>"#,
            origin.0, origin.1, size.0, size.1
        );
    }

    /// Text at `pos`; `markup` may contain `<tspan>` elements and must be
    /// escaped by the caller.
    pub fn raw_text(&mut self, pos: (f64, f64), markup: &str, size: f64, anchor: Anchor, rotate: Option<f64>) {
        let transform = rotate
            .map(|deg| format!(r#" transform="rotate({deg:.1} {:.2} {:.2})""#, pos.0, pos.1))
            .unwrap_or_default();
        let _ = writeln!(
            self.body,
            r#"<text x="{:.2}" y="{:.2}" font-family="DejaVu Sans, Arial, sans-serif" font-size="{size:.1}" text-anchor="{}"{transform}>{markup}</text>"#,
            pos.0,
            pos.1,
            anchor.as_str()
        );
    }

    /// Plain text at `pos`.
    pub fn text(&mut self, pos: (f64, f64), content: &str, size: f64, anchor: Anchor) {
        self.raw_text(pos, &escape(content), size, anchor, None);
    }

    /// Finish the document.
    pub fn finish(self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        out.push('\n');
        if !self.defs.is_empty() {
            let _ = writeln!(out, "<defs>{}</defs>", self.defs);
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// Escape XML special characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
