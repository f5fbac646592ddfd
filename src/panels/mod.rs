pub mod filter_ui;
pub mod panel_trait;
pub mod plot_ui;
pub mod series_ui;
pub mod table_ui;

pub use filter_ui::FilterPanel;
pub use panel_trait::{Panel, PanelState};
pub use plot_ui::PlotPanel;
pub use series_ui::SeriesPanel;
pub use table_ui::TablePanel;
