//! Plot projection: selected rows → ordered `(x, y, row)` points.
//!
//! Per-row problems never abort a projection. A row with a missing x value or
//! a non-numeric cell is left out, and all such rows are reported once through
//! [`ProjectionIssues`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::data::table::{RecordTable, Value};

/// What the x axis shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum XAxisMode {
    /// Trade number: 0, 1, 2, … over the plotted rows.
    #[default]
    Sequential,
    /// Values of a numeric or timestamp column.
    Field(String),
}

impl XAxisMode {
    pub fn label(&self) -> &str {
        match self {
            XAxisMode::Sequential => "Trade #",
            XAxisMode::Field(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    #[default]
    Individual,
    /// Running prefix sum in row order.
    Cumulative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlotStyle {
    #[default]
    Line,
    Histogram,
}

/// How x values should be read back for labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Sequential trade number.
    Index,
    /// UTC seconds since the UNIX epoch.
    Time,
    Value,
}

/// Everything the user chose about the plot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSettings {
    pub x_axis: XAxisMode,
    pub value_columns: Vec<String>,
    pub aggregation: Aggregation,
    pub style: PlotStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub x: f64,
    pub y: f64,
    /// Underlying record table index.
    pub row: usize,
}

/// Aggregated per-row and per-column problems of one projection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectionIssues {
    /// Referenced columns that the table does not have.
    pub missing_columns: Vec<String>,
    /// Rows left out because the x field was empty.
    pub missing_x: Vec<usize>,
    /// Rows left out because a cell that must be numeric was not.
    pub non_numeric: Vec<usize>,
}

impl ProjectionIssues {
    pub fn is_clean(&self) -> bool {
        self.missing_columns.is_empty() && self.missing_x.is_empty() && self.non_numeric.is_empty()
    }

    pub fn excluded_rows(&self) -> usize {
        self.missing_x.len() + self.non_numeric.len()
    }

    /// One user-facing message for everything that went wrong, or `None`.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        if !self.missing_columns.is_empty() {
            parts.push(format!("missing column(s): {}", self.missing_columns.join(", ")));
        }
        if !self.missing_x.is_empty() {
            parts.push(format!("{} row(s) without an x value", self.missing_x.len()));
        }
        if !self.non_numeric.is_empty() {
            parts.push(format!(
                "{} row(s) with non-numeric values (first: row {})",
                self.non_numeric.len(),
                self.non_numeric[0] + 1
            ));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!("Plot skipped data: {}", parts.join("; ")))
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub points: Vec<SeriesPoint>,
    pub x_kind: AxisKind,
    pub name: String,
    pub issues: ProjectionIssues,
}

impl PlottedSeries {
    pub fn xy(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|p| [p.x, p.y]).collect()
    }
}

/// Result of a projection. "Nothing selected" is its own state, distinct
/// from a selection that produced no points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Projection {
    #[default]
    NothingSelected,
    Series(PlottedSeries),
}

impl Projection {
    pub fn series(&self) -> Option<&PlottedSeries> {
        match self {
            Projection::Series(s) => Some(s),
            Projection::NothingSelected => None,
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        self.series().map(|s| s.points.as_slice()).unwrap_or(&[])
    }
}

/// Seconds since the UNIX epoch, treating the naive timestamp as UTC.
pub fn timestamp_to_secs(ts: &NaiveDateTime) -> f64 {
    let utc = ts.and_utc();
    utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9
}

/// Project `plot_index_set` onto points according to `settings`. The output
/// keeps the order of `plot_index_set`.
pub fn project(table: &RecordTable, plot_index_set: &[usize], settings: &PlotSettings) -> Projection {
    if settings.value_columns.is_empty() {
        return Projection::NothingSelected;
    }
    let mut issues = ProjectionIssues::default();

    let value_cols: Vec<usize> = settings
        .value_columns
        .iter()
        .filter_map(|name| {
            let col = table.column_index(name);
            if col.is_none() {
                issues.missing_columns.push(name.clone());
            }
            col
        })
        .collect();

    let x_col = match &settings.x_axis {
        XAxisMode::Sequential => None,
        XAxisMode::Field(name) => match table.column_index(name) {
            Some(c) => Some(c),
            None => {
                issues.missing_columns.push(name.clone());
                return finish(Vec::new(), AxisKind::Value, settings, issues);
            }
        },
    };
    if value_cols.is_empty() {
        return finish(Vec::new(), AxisKind::Value, settings, issues);
    }

    let mut saw_time = false;
    let mut points = Vec::with_capacity(plot_index_set.len());
    for &row in plot_index_set {
        let x = match x_col {
            None => points.len() as f64,
            Some(c) => match table.cell(row, c) {
                Some(Value::Number(n)) => *n,
                Some(Value::Timestamp(ts)) => {
                    saw_time = true;
                    timestamp_to_secs(ts)
                }
                Some(Value::Text(_)) => {
                    issues.non_numeric.push(row);
                    continue;
                }
                Some(Value::Missing) | None => {
                    issues.missing_x.push(row);
                    continue;
                }
            },
        };
        match row_sum(table, row, &value_cols) {
            Some(y) => points.push(SeriesPoint { x, y, row }),
            None => issues.non_numeric.push(row),
        }
    }

    if settings.aggregation == Aggregation::Cumulative {
        let mut acc = 0.0;
        for p in &mut points {
            acc += p.y;
            p.y = acc;
        }
    }

    let x_kind = match x_col {
        None => AxisKind::Index,
        Some(_) if saw_time => AxisKind::Time,
        Some(_) => AxisKind::Value,
    };
    finish(points, x_kind, settings, issues)
}

/// Sum of the row's value cells with missing as zero; `None` on a non-numeric cell.
fn row_sum(table: &RecordTable, row: usize, cols: &[usize]) -> Option<f64> {
    cols.iter().try_fold(0.0, |acc, &c| match table.cell(row, c) {
        Some(Value::Number(n)) => Some(acc + n),
        Some(Value::Missing) | None => Some(acc),
        Some(Value::Text(_)) | Some(Value::Timestamp(_)) => None,
    })
}

fn finish(
    points: Vec<SeriesPoint>,
    x_kind: AxisKind,
    settings: &PlotSettings,
    issues: ProjectionIssues,
) -> Projection {
    if let Some(msg) = issues.summary() {
        log::warn!("{}", msg);
    }
    let mut name = settings.value_columns.join(" + ");
    if settings.aggregation == Aggregation::Cumulative {
        name = format!("Cumulative {}", name);
    }
    Projection::Series(PlottedSeries {
        points,
        x_kind,
        name,
        issues,
    })
}
