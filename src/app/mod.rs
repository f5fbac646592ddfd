//! The TradeView window.
//!
//! | Sub-module         | Responsibility |
//! | ------------------ | -------------- |
//! | [`tradeview_app`]  | [`TradeViewApp`] state, file loading, hotkeys and the per-frame update |
//! | [`layout`]         | Menu bar, side panel, table/plot split and status bar |
//! | [`screenshot`]     | Viewport capture to PNG |
//! | [`run`]            | [`run_tradeview()`] entry point |

mod layout;
mod run;
pub mod screenshot;
mod tradeview_app;

pub use run::run_tradeview;
pub use tradeview_app::TradeViewApp;
