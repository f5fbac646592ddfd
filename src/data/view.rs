//! Sort state of the table panel and the presentation order it produces.

use std::cmp::Ordering;

use crate::data::filter::Predicate;
use crate::data::table::{RecordTable, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub column: usize,
    pub descending: bool,
}

/// Presentation state owned by the table panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    pub sort: Option<SortKey>,
}

impl TableView {
    /// Header click: unsorted → ascending → descending → unsorted. Clicking a
    /// different column starts again at ascending.
    pub fn cycle_sort(&mut self, column: usize) {
        self.sort = match self.sort.take() {
            Some(SortKey {
                column: c,
                descending: false,
            }) if c == column => Some(SortKey {
                column,
                descending: true,
            }),
            Some(SortKey {
                column: c,
                descending: true,
            }) if c == column => None,
            _ => Some(SortKey {
                column,
                descending: false,
            }),
        };
    }

    /// Rows passing `filter`, in display order. The sort is stable, so equal
    /// keys keep table order; missing cells go last in either direction.
    pub fn presentation_order(&self, table: &RecordTable, filter: &Predicate) -> Vec<usize> {
        let mut order: Vec<usize> = (0..table.row_count())
            .filter(|&r| filter.matches(table, r))
            .collect();
        if let Some(key) = &self.sort {
            if key.column < table.column_count() {
                order.sort_by(|&a, &b| {
                    let va = table.cell(a, key.column).unwrap_or(&Value::Missing);
                    let vb = table.cell(b, key.column).unwrap_or(&Value::Missing);
                    compare_cells(va, vb, key.descending)
                });
            }
        }
        order
    }
}

fn compare_cells(a: &Value, b: &Value, descending: bool) -> Ordering {
    let ord = match (a, b) {
        (Value::Missing, Value::Missing) => return Ordering::Equal,
        (Value::Missing, _) => return Ordering::Greater,
        (_, Value::Missing) => return Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x.total_cmp(y),
        (Value::Timestamp(x), Value::Timestamp(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        // Mixed kinds: numbers < timestamps < text.
        _ => rank(a).cmp(&rank(b)),
    };
    if descending {
        ord.reverse()
    } else {
        ord
    }
}

fn rank(v: &Value) -> u8 {
    match v {
        Value::Number(_) => 0,
        Value::Timestamp(_) => 1,
        Value::Text(_) => 2,
        Value::Missing => 3,
    }
}
