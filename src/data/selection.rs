//! Row selection model: per-row inclusion flags plus the active filter.
//!
//! A row is *plottable* when its flag is set, it passes the filter predicate,
//! and the presentation layer currently shows it. Recomputation is demand
//! driven: callers re-run [`RowSelection::compute_plot_index_set`] after every
//! state change.

use crate::config::ColumnNames;
use crate::data::filter::{FilterState, Predicate};
use crate::data::table::RecordTable;
use crate::error::SelectionError;

/// Order of the plot index set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PlotOrder {
    /// Ascending underlying row index, independent of the table sort.
    #[default]
    Underlying,
    /// The order rows appear in the table.
    Presentation,
}

#[derive(Debug, Clone)]
pub struct RowSelection {
    flags: Vec<bool>,
    filter: FilterState,
    predicate: Predicate,
    columns: ColumnNames,
    pub order: PlotOrder,
}

impl RowSelection {
    pub fn new(row_count: usize, columns: ColumnNames) -> Self {
        Self {
            flags: vec![true; row_count],
            filter: FilterState::default(),
            predicate: Predicate::Always,
            columns,
            order: PlotOrder::default(),
        }
    }

    /// Forget all flags after the table was replaced. The filter survives.
    pub fn reset(&mut self, row_count: usize) {
        self.flags = vec![true; row_count];
    }

    pub fn row_count(&self) -> usize {
        self.flags.len()
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn flag(&self, row: usize) -> Option<bool> {
        self.flags.get(row).copied()
    }

    pub fn included_count(&self) -> usize {
        self.flags.iter().filter(|f| **f).count()
    }

    pub fn set_flag(&mut self, row: usize, value: bool) -> Result<(), SelectionError> {
        let len = self.flags.len();
        let flag = self
            .flags
            .get_mut(row)
            .ok_or(SelectionError::RowOutOfRange { row, len })?;
        *flag = value;
        Ok(())
    }

    pub fn toggle_flag(&mut self, row: usize) -> Result<bool, SelectionError> {
        let value = !self
            .flag(row)
            .ok_or(SelectionError::RowOutOfRange { row, len: self.flags.len() })?;
        self.set_flag(row, value)?;
        Ok(value)
    }

    pub fn set_all_flags(&mut self, value: bool) {
        self.flags.iter_mut().for_each(|f| *f = value);
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Replace the filter parameters and recompile the predicate.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.predicate = filter.to_predicate(&self.columns);
        log::debug!("filter predicate now {:?}", self.predicate);
        self.filter = filter;
    }

    /// Flag and filter half of the plottable contract; membership in the
    /// presentation order is checked by the caller.
    pub fn is_row_included(&self, table: &RecordTable, row: usize) -> bool {
        self.flag(row).unwrap_or(false)
            && row < table.row_count()
            && self.predicate.matches(table, row)
    }

    pub fn is_row_plottable(
        &self,
        table: &RecordTable,
        row: usize,
        presentation_order: &[usize],
    ) -> bool {
        self.is_row_included(table, row) && presentation_order.contains(&row)
    }

    /// Rows of `presentation_order` that are flagged and pass the filter.
    /// Out-of-range and repeated entries are skipped.
    pub fn compute_plot_index_set(
        &self,
        table: &RecordTable,
        presentation_order: &[usize],
    ) -> Vec<usize> {
        let mut seen = vec![false; self.flags.len()];
        let mut out = Vec::with_capacity(presentation_order.len());
        for &row in presentation_order {
            if row >= seen.len() || seen[row] {
                continue;
            }
            seen[row] = true;
            if self.is_row_included(table, row) {
                out.push(row);
            }
        }
        if self.order == PlotOrder::Underlying {
            out.sort_unstable();
        }
        out
    }
}
