//! Nearest-point lookup in pixel space for hover tooltips.

use crate::data::projection::PlottedSeries;
use crate::data::x_formatter::{format_y, XFormatter};

/// Default hover radius squared: 10 px.
pub const HOVER_RADIUS_SQ: f64 = 100.0;

/// Index of the point nearest to `query` by squared Euclidean distance, or
/// `None` when there are no points or the nearest one is farther than
/// `max_dist_sq`. Ties go to the lowest index. Non-finite positions are
/// ignored.
///
/// ```
/// # use tradeview::data::hit_test::nearest_point;
/// let pts = [[0.0, 0.0], [100.0, 100.0]];
/// assert_eq!(nearest_point([1.0, 1.0], &pts, 100.0), Some(0));
/// assert_eq!(nearest_point([500.0, 500.0], &pts, 100.0), None);
/// ```
pub fn nearest_point(query: [f64; 2], points: &[[f64; 2]], max_dist_sq: f64) -> Option<usize> {
    let mut best_i = None;
    let mut best_d2 = f64::INFINITY;
    for (i, p) in points.iter().enumerate() {
        let dx = p[0] - query[0];
        let dy = p[1] - query[1];
        let d2 = dx * dx + dy * dy;
        if !d2.is_finite() {
            continue;
        }
        if d2 < best_d2 {
            best_d2 = d2;
            best_i = Some(i);
        }
    }
    best_i.filter(|_| best_d2 <= max_dist_sq)
}

/// Text the plot shows next to a hovered point.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverLabel {
    /// Position in the series.
    pub index: usize,
    /// Underlying record table row.
    pub row: usize,
    pub x: f64,
    pub y: f64,
    pub x_label: String,
    pub y_label: String,
}

impl HoverLabel {
    pub fn text(&self, x_name: &str, y_name: &str) -> String {
        format!("{}: {}\n{}: {}", x_name, self.x_label, y_name, self.y_label)
    }
}

/// Label for point `index` of `series`; `None` when out of range.
pub fn hover_label(series: &PlottedSeries, index: usize) -> Option<HoverLabel> {
    let p = series.points.get(index)?;
    Some(HoverLabel {
        index,
        row: p.row,
        x: p.x,
        y: p.y,
        x_label: XFormatter::new(series.x_kind).format_hover(p.x),
        y_label: format_y(p.y),
    })
}

/// Hit-test `series` with a caller-supplied data→pixel transform.
pub fn hit_test_series(
    series: &PlottedSeries,
    query_px: [f64; 2],
    to_pixel: impl Fn(f64, f64) -> [f64; 2],
    max_dist_sq: f64,
) -> Option<HoverLabel> {
    let pixels: Vec<[f64; 2]> = series.points.iter().map(|p| to_pixel(p.x, p.y)).collect();
    nearest_point(query_px, &pixels, max_dist_sq).and_then(|i| hover_label(series, i))
}
