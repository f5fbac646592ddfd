//! Axis value formatters: trade numbers, timestamps and plain decimals.
//!
//! [`XFormatter`] renders x values for tick labels and hover readouts based on
//! the [`AxisKind`] of the current series. Timestamps are stored as UTC
//! seconds (see [`timestamp_to_secs`](crate::data::projection::timestamp_to_secs))
//! and rendered back without any timezone shift, so labels show exactly what
//! the file contained.

use chrono::DateTime;

use crate::data::projection::AxisKind;
use crate::data::table::TIMESTAMP_FORMAT;

const SECS_PER_DAY: f64 = 86_400.0;

/// Render UTC seconds as `YYYY-MM-DD HH:MM:SS`. Out-of-range values fall back
/// to the UNIX epoch.
///
/// ```
/// # use tradeview::data::x_formatter::format_timestamp;
/// assert_eq!(format_timestamp(86_400.0), "1970-01-02 00:00:00");
/// ```
pub fn format_timestamp(secs: f64) -> String {
    format_secs(secs, TIMESTAMP_FORMAT)
}

fn format_secs(secs: f64, fmt: &str) -> String {
    let secs = if secs.is_finite() { secs } else { 0.0 };
    let whole = secs.floor() as i64;
    let nanos = (((secs - whole as f64) * 1e9).round() as u32).min(999_999_999);
    DateTime::from_timestamp(whole, nanos)
        .or_else(|| DateTime::from_timestamp(0, 0))
        .map(|dt| dt.naive_utc().format(fmt).to_string())
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// DecimalFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// A plain decimal number formatter with optional fixed decimal places.
///
/// If `decimal_places` is `None`, the number of places is taken from the
/// `dec_pl` argument passed at format time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecimalFormatter {
    pub decimal_places: Option<usize>,
    /// Optional unit suffix appended after the number (e.g. `"USD"`).
    pub unit: Option<String>,
}

impl DecimalFormatter {
    pub fn format(&self, value: f64, dec_pl: usize) -> String {
        let places = self.decimal_places.unwrap_or(dec_pl);
        let s = format!("{:.*}", places, value);
        match &self.unit {
            Some(u) => format!("{} {}", s, u),
            None => s,
        }
    }
}

/// Shortest of integer or two-decimal rendering.
fn compact_decimal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// XFormatter
// ─────────────────────────────────────────────────────────────────────────────

/// Formats x values according to the axis kind of the plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XFormatter {
    pub kind: AxisKind,
}

impl XFormatter {
    pub fn new(kind: AxisKind) -> Self {
        Self { kind }
    }

    /// Full-precision label for a hovered point.
    ///
    /// ```
    /// # use tradeview::data::projection::AxisKind;
    /// # use tradeview::data::x_formatter::XFormatter;
    /// assert_eq!(XFormatter::new(AxisKind::Index).format_hover(7.0), "7");
    /// ```
    pub fn format_hover(&self, x: f64) -> String {
        match self.kind {
            AxisKind::Index => format!("{}", x.round() as i64),
            AxisKind::Time => format_timestamp(x),
            AxisKind::Value => compact_decimal(x),
        }
    }

    /// Tick label given the visible span `(min, max)`. Index axes only label
    /// whole numbers; time axes drop the date for spans under a day and the
    /// time for spans over a year.
    pub fn format_tick(&self, x: f64, range: (f64, f64)) -> String {
        let span = (range.1 - range.0).abs();
        match self.kind {
            AxisKind::Index => {
                if (x - x.round()).abs() < 1e-6 && x >= 0.0 {
                    format!("{}", x.round() as i64)
                } else {
                    String::new()
                }
            }
            AxisKind::Time => {
                let fmt = if span < SECS_PER_DAY {
                    "%H:%M:%S"
                } else if span < 365.0 * SECS_PER_DAY {
                    "%m-%d %H:%M"
                } else {
                    "%Y-%m-%d"
                };
                format_secs(x, fmt)
            }
            AxisKind::Value => {
                if span >= 10.0 {
                    compact_decimal(x.round())
                } else {
                    compact_decimal(x)
                }
            }
        }
    }
}

/// Two-decimal y readout used by hover labels.
pub fn format_y(y: f64) -> String {
    DecimalFormatter::default().format(y, 2)
}
