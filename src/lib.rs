//! TradeView crate root: re-exports and module wiring.
//!
//! A trade-log viewer built on egui/eframe. A CSV export of closed trades is
//! shown as a sortable table with per-row inclusion checkboxes, filtered by
//! direction and comment, and projected onto a line or histogram plot with
//! hover tooltips.
//!
//! - `data`: GUI-independent core (table, filters, selection, projection, hit-testing)
//! - `panels`: egui panels operating on a [`TradeSession`]
//! - `app`: the eframe application and [`run_tradeview`]
//! - `config`: YAML settings and startup configuration
//! - `error`: error types

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod panels;

pub use app::{run_tradeview, TradeViewApp};
pub use config::{ColumnNames, TradeViewConfig, ViewerSettings};
pub use data::session::TradeSession;
pub use error::{ConfigError, LoadError, SelectionError};
