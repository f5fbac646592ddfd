//! The viewer session and its explicit recompute pipeline.
//!
//! [`TradeSession`] owns the record table, the row selection, the table view
//! and the plot settings. Mutators only record state; the host UI calls
//! [`TradeSession::recompute`] afterwards, which runs
//! presentation order → plot index set → projection in that order.

use std::path::{Path, PathBuf};

use crate::config::ViewerSettings;
use crate::data::filter::FilterState;
use crate::data::hit_test::{hit_test_series, HoverLabel};
use crate::data::projection::{project, PlotSettings, Projection, XAxisMode};
use crate::data::selection::{PlotOrder, RowSelection};
use crate::data::table::{ColumnKind, RecordTable};
use crate::data::view::TableView;
use crate::error::{LoadError, SelectionError};

pub struct TradeSession {
    pub settings: ViewerSettings,
    table: RecordTable,
    source: Option<PathBuf>,
    selection: RowSelection,
    view: TableView,
    plot: PlotSettings,
    presentation_order: Vec<usize>,
    plot_index_set: Vec<usize>,
    projection: Projection,
    hover: Option<HoverLabel>,
    status: Option<String>,
    dirty: bool,
}

impl Default for TradeSession {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl TradeSession {
    pub fn new(settings: ViewerSettings) -> Self {
        let mut selection = RowSelection::new(0, settings.columns.clone());
        selection.order = settings.plot_order;
        selection.set_filter(FilterState {
            comment_scope: settings.comment_scope,
            ..FilterState::default()
        });
        let plot = PlotSettings {
            aggregation: settings.aggregation,
            style: settings.plot_style,
            ..PlotSettings::default()
        };
        Self {
            settings,
            table: RecordTable::default(),
            source: None,
            selection,
            view: TableView::default(),
            plot,
            presentation_order: Vec::new(),
            plot_index_set: Vec::new(),
            projection: Projection::NothingSelected,
            hover: None,
            status: None,
            dirty: false,
        }
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Load a file and recompute. On failure the current table is kept and
    /// the error becomes the status message.
    pub fn load_path(&mut self, path: &Path) -> Result<(), LoadError> {
        match RecordTable::load(path, &self.settings.csv) {
            Ok(table) => {
                self.replace_table(table, Some(path.to_path_buf()));
                self.recompute();
                Ok(())
            }
            Err(e) => {
                log::error!("failed to load {:?}: {}", path, e);
                self.status = Some(format!("Load failed: {}", e));
                Err(e)
            }
        }
    }

    /// Install a new table. Flags reset to all-included, the sort is cleared,
    /// value columns default to the well-known money columns that hold
    /// numbers, an x field the new table lacks falls back to sequential, and
    /// a direction filter is dropped when the new table has no direction
    /// column.
    pub fn replace_table(&mut self, table: RecordTable, source: Option<PathBuf>) {
        self.selection.reset(table.row_count());
        self.view = TableView::default();
        self.plot.value_columns = self
            .settings
            .columns
            .default_value_columns()
            .iter()
            .filter(|c| {
                table.column_index(c).is_some_and(|i| {
                    matches!(table.column_kind(i), ColumnKind::Numeric | ColumnKind::Empty)
                })
            })
            .map(|c| c.to_string())
            .collect();
        if self.selection.filter().direction_active()
            && !table.has_column(&self.selection.columns().direction)
        {
            log::info!(
                "no '{}' column in new table, clearing direction filter",
                self.selection.columns().direction
            );
            let mut filter = self.selection.filter().clone();
            filter.direction.clear();
            self.selection.set_filter(filter);
        }
        if let XAxisMode::Field(name) = &self.plot.x_axis {
            if !table.has_column(name) {
                self.plot.x_axis = XAxisMode::Sequential;
            }
        }
        self.table = table;
        self.source = source;
        self.hover = None;
        self.status = None;
        self.dirty = true;
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn selection(&self) -> &RowSelection {
        &self.selection
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn plot(&self) -> &PlotSettings {
        &self.plot
    }

    pub fn presentation_order(&self) -> &[usize] {
        &self.presentation_order
    }

    pub fn plot_index_set(&self) -> &[usize] {
        &self.plot_index_set
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn hover(&self) -> Option<&HoverLabel> {
        self.hover.as_ref()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Whether state changed since the last [`recompute`](Self::recompute).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ── Mutators (call `recompute` afterwards) ───────────────────────────────

    pub fn set_flag(&mut self, row: usize, value: bool) -> Result<(), SelectionError> {
        self.selection.set_flag(row, value)?;
        self.dirty = true;
        Ok(())
    }

    pub fn toggle_flag(&mut self, row: usize) -> Result<bool, SelectionError> {
        let v = self.selection.toggle_flag(row)?;
        self.dirty = true;
        Ok(v)
    }

    pub fn set_all_flags(&mut self, value: bool) {
        self.selection.set_all_flags(value);
        self.dirty = true;
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        if &filter != self.selection.filter() {
            self.selection.set_filter(filter);
            self.dirty = true;
        }
    }

    pub fn set_plot(&mut self, plot: PlotSettings) {
        if plot != self.plot {
            self.plot = plot;
            self.dirty = true;
        }
    }

    pub fn set_plot_order(&mut self, order: PlotOrder) {
        if order != self.selection.order {
            self.selection.order = order;
            self.dirty = true;
        }
    }

    pub fn cycle_sort(&mut self, column: usize) {
        self.view.cycle_sort(column);
        self.dirty = true;
    }

    // ── Pipeline ─────────────────────────────────────────────────────────────

    /// Rebuild presentation order, plot index set and projection from the
    /// current state. The hover annotation is dropped since it referred to
    /// the previous series.
    pub fn recompute(&mut self) {
        self.presentation_order = self
            .view
            .presentation_order(&self.table, self.selection.predicate());
        self.plot_index_set = self
            .selection
            .compute_plot_index_set(&self.table, &self.presentation_order);
        self.projection = project(&self.table, &self.plot_index_set, &self.plot);
        self.hover = None;
        if let Some(series) = self.projection.series() {
            if let Some(msg) = series.issues.summary() {
                self.status = Some(msg);
            } else if self.status.as_deref().is_some_and(|s| s.starts_with("Plot skipped")) {
                self.status = None;
            }
        }
        self.dirty = false;
        log::debug!(
            "recompute: {} shown, {} plotted, {} points",
            self.presentation_order.len(),
            self.plot_index_set.len(),
            self.projection.points().len()
        );
    }

    /// Hit-test the last built series. `to_pixel` maps data coordinates to
    /// pixels under the plot's current zoom and pan.
    pub fn update_hover(
        &mut self,
        query_px: [f64; 2],
        to_pixel: impl Fn(f64, f64) -> [f64; 2],
    ) -> Option<&HoverLabel> {
        let max_d2 = self.settings.hover_radius_sq();
        self.hover = self
            .projection
            .series()
            .and_then(|s| hit_test_series(s, query_px, to_pixel, max_d2));
        self.hover.as_ref()
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }

    // ── Options offered to the UI ────────────────────────────────────────────

    /// Sequential plus every numeric or timestamp column.
    pub fn x_axis_options(&self) -> Vec<XAxisMode> {
        std::iter::once(XAxisMode::Sequential)
            .chain(
                self.table
                    .columns_of_kind(&[ColumnKind::Numeric, ColumnKind::Timestamp])
                    .into_iter()
                    .map(XAxisMode::Field),
            )
            .collect()
    }

    /// Columns that can be summed into y.
    pub fn value_column_options(&self) -> Vec<String> {
        self.table
            .columns_of_kind(&[ColumnKind::Numeric, ColumnKind::Empty])
    }

    pub fn direction_available(&self) -> bool {
        self.table.has_column(&self.settings.columns.direction)
    }

    pub fn comment_available(&self) -> bool {
        self.table.has_column(&self.settings.columns.comment)
    }

    /// `(shown, included, total)` row counts for the status bar.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.presentation_order.len(),
            self.selection.included_count(),
            self.table.row_count(),
        )
    }
}
