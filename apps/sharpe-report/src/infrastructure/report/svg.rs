//! Minimal SVG building blocks for the dashboard charts.

use chrono::{Datelike, NaiveDate};

pub const WIDTH: f64 = 576.0;
pub const HEIGHT: f64 = 288.0;
pub const PADDING: f64 = 40.0;
pub const AXIS_COLOR: &str = "#000";
pub const GRID_COLOR: &str = "#dddddd";
pub const GUIDE_COLOR: &str = "#8c8c8c";

/// Series colors, cycled by instrument index.
const PALETTE: [&str; 6] = [
    "#348dc1", "#ff9933", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

/// Color for the `index`-th instrument.
pub fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

pub fn svg_header() -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#
    )
}

pub const fn svg_footer() -> &'static str {
    "</svg>"
}

/// Escape text for use inside SVG/HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Value range covering every finite input, widened when flat.
pub fn extent(values: impl IntoIterator<Item = f64>, include_zero: bool) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }

    if include_zero {
        min_v = min_v.min(0.0);
        max_v = max_v.max(0.0);
    }

    if !min_v.is_finite() || !max_v.is_finite() {
        return None;
    }

    if (max_v - min_v).abs() < f64::EPSILON {
        let adjust = if min_v == 0.0 { 1.0 } else { min_v.abs() * 0.1 }; // widen flat ranges
        min_v -= adjust;
        max_v += adjust;
    }

    Some((min_v, max_v))
}

/// Map a value onto the vertical axis (larger values are higher).
pub fn scale_y(value: f64, (min_v, max_v): (f64, f64)) -> f64 {
    if (max_v - min_v).abs() < f64::EPSILON {
        return HEIGHT / 2.0;
    }
    let inner = HEIGHT - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner
}

/// Map a value onto the horizontal axis.
pub fn scale_x(value: f64, (min_v, max_v): (f64, f64)) -> f64 {
    if (max_v - min_v).abs() < f64::EPSILON {
        return WIDTH / 2.0;
    }
    let inner = WIDTH - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + norm * inner
}

/// Evenly spaced x positions for `len` categorical or dated points.
#[allow(clippy::cast_precision_loss)]
pub fn x_positions(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![WIDTH / 2.0],
        _ => {
            let inner = WIDTH - 2.0 * PADDING;
            let step = inner / (len - 1) as f64;
            (0..len).map(|i| PADDING + step * i as f64).collect()
        }
    }
}

pub fn polyline(points: &[(f64, f64)], stroke: &str) -> String {
    if points.is_empty() {
        return String::new();
    }

    let coords = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(r#"<polyline fill="none" stroke="{stroke}" stroke-width="1.5" points="{coords}" />"#)
}

/// Horizontal line across the plot area, optionally labelled at the right edge.
pub fn horizontal_guide(svg: &mut String, y: f64, color: &str, dash: bool, label: Option<&str>) {
    let dash = if dash { "4 3" } else { "0" };
    svg.push_str(&format!(
        r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1" stroke-dasharray="{dash}" />"#,
        x1 = PADDING,
        x2 = WIDTH - PADDING,
    ));
    if let Some(label) = label {
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end" fill="{color}" font-size="9">{label}</text>"#,
            x = WIDTH - PADDING,
            y = y - 4.0,
            label = escape(label),
        ));
    }
}

/// Left axis with min/mid/max tick labels.
pub fn y_axis(svg: &mut String, range: (f64, f64), label_for: impl Fn(f64) -> String) {
    svg.push_str(&format!(
        r#"<line x1="{PADDING:.2}" y1="{PADDING:.2}" x2="{PADDING:.2}" y2="{y2:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
        y2 = HEIGHT - PADDING,
    ));
    let (min_v, max_v) = range;
    for value in [min_v, (min_v + max_v) / 2.0, max_v] {
        let y = scale_y(value, range);
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = PADDING - 4.0,
            y = y + 3.0,
            label = escape(&label_for(value)),
        ));
    }
}

/// Bottom axis with one label per year (first month seen in each year).
pub fn time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64]) {
    if dates.is_empty() || xs.is_empty() {
        return;
    }

    let axis_y = HEIGHT - PADDING;
    svg.push_str(&format!(
        r#"<line x1="{x1:.2}" y1="{axis_y:.2}" x2="{x2:.2}" y2="{axis_y:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"#,
        x1 = PADDING,
        x2 = WIDTH - PADDING,
    ));

    let mut last_year: Option<i32> = None;
    for (date, x) in dates.iter().zip(xs) {
        if last_year == Some(date.year()) {
            continue;
        }
        last_year = Some(date.year());

        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{PADDING:.2}" x2="{x:.2}" y2="{axis_y:.2}" stroke="{GRID_COLOR}" stroke-width="0.5" />"#
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = axis_y + 14.0,
            label = date.format("%Y-%m"),
        ));
    }
}

/// Legend in the top-left corner of the plot area.
pub fn legend(svg: &mut String, entries: &[(String, &str)]) {
    let x = PADDING + 10.0;
    let mut y = PADDING + 4.0;
    for (label, color) in entries {
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="1.5" />"#,
            ly = y - 4.0,
            x2 = x + 20.0,
        ));
        svg.push_str(&format!(
            r##"<text x="{tx:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            tx = x + 26.0,
            label = escape(label),
        ));
        y += 14.0;
    }
}
