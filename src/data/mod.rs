//! GUI-independent core: record table, filtering, row selection, plot
//! projection and hover hit-testing, tied together by [`session::TradeSession`].

pub mod filter;
pub mod hit_test;
pub mod hotkeys;
pub mod projection;
pub mod selection;
pub mod session;
pub mod table;
pub mod view;
pub mod x_formatter;
