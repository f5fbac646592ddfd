//! Row filter predicates.
//!
//! Filters are declarative: the user-facing [`FilterState`] compiles into a
//! [`Predicate`] tree that is evaluated per row. New filter kinds are new
//! variants; the row iteration in [`crate::data::selection`] never changes.

use serde::{Deserialize, Serialize};

use crate::config::ColumnNames;
use crate::data::table::RecordTable;

/// Direction filter value that disables the direction clause.
pub const DIRECTION_BOTH: &str = "Both";

/// Where a text-contains filter looks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextScope {
    Column(String),
    AnyColumn,
}

/// A per-row boolean test. All string comparisons ignore case.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Always,
    /// Cell text contains `needle`. A missing column or a missing cell fails.
    TextContains { scope: TextScope, needle: String },
    /// Cell text equals `value`. A missing column or a missing cell fails.
    ExactMatch { column: String, value: String },
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn matches(&self, table: &RecordTable, row: usize) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::TextContains { scope, needle } => {
                let needle = needle.to_lowercase();
                match scope {
                    TextScope::Column(column) => table
                        .value(row, column)
                        .filter(|v| !v.is_missing())
                        .is_some_and(|v| v.to_string().to_lowercase().contains(&needle)),
                    TextScope::AnyColumn => table.row(row).is_some_and(|cells| {
                        cells
                            .iter()
                            .filter(|v| !v.is_missing())
                            .any(|v| v.to_string().to_lowercase().contains(&needle))
                    }),
                }
            }
            Predicate::ExactMatch { column, value } => table
                .value(row, column)
                .filter(|v| !v.is_missing())
                .is_some_and(|v| v.to_string().to_lowercase() == value.to_lowercase()),
            Predicate::All(parts) => parts.iter().all(|p| p.matches(table, row)),
        }
    }

    /// Conjunction that drops `Always` and flattens nested `All`s.
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = Vec::new();
        for p in [self, other] {
            match p {
                Predicate::Always => {}
                Predicate::All(inner) => parts.extend(inner),
                p => parts.push(p),
            }
        }
        match parts.len() {
            0 => Predicate::Always,
            1 => parts.remove(0),
            _ => Predicate::All(parts),
        }
    }

    /// Whether evaluation reads `column` (by name, case-insensitive).
    pub fn references(&self, column: &str) -> bool {
        match self {
            Predicate::Always => false,
            Predicate::TextContains { scope, .. } => match scope {
                TextScope::Column(c) => c.eq_ignore_ascii_case(column),
                TextScope::AnyColumn => true,
            },
            Predicate::ExactMatch { column: c, .. } => c.eq_ignore_ascii_case(column),
            Predicate::All(parts) => parts.iter().any(|p| p.references(column)),
        }
    }
}

/// Whether the comment filter scans the comment column or every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CommentScope {
    #[default]
    CommentColumn,
    AnyColumn,
}

/// The filter parameters the user controls.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    /// Required trade direction; empty or [`DIRECTION_BOTH`] disables the clause.
    pub direction: String,
    pub comment_text: String,
    pub comment_enabled: bool,
    pub comment_scope: CommentScope,
    /// Further predicates ANDed with the built-in clauses.
    pub extra: Vec<Predicate>,
}

impl FilterState {
    pub fn direction_active(&self) -> bool {
        let d = self.direction.trim();
        !d.is_empty() && !d.eq_ignore_ascii_case(DIRECTION_BOTH)
    }

    pub fn comment_active(&self) -> bool {
        self.comment_enabled && !self.comment_text.trim().is_empty()
    }

    /// Compile into a predicate against the configured column names.
    pub fn to_predicate(&self, columns: &ColumnNames) -> Predicate {
        let mut pred = Predicate::Always;
        if self.direction_active() {
            pred = pred.and(Predicate::ExactMatch {
                column: columns.direction.clone(),
                value: self.direction.trim().to_string(),
            });
        }
        if self.comment_active() {
            let scope = match self.comment_scope {
                CommentScope::CommentColumn => TextScope::Column(columns.comment.clone()),
                CommentScope::AnyColumn => TextScope::AnyColumn,
            };
            pred = pred.and(Predicate::TextContains {
                scope,
                needle: self.comment_text.trim().to_string(),
            });
        }
        self.extra
            .iter()
            .cloned()
            .fold(pred, |acc, p| acc.and(p))
    }
}
