use eframe::egui;
use egui::Ui;
use egui_phosphor::regular as icons;

use super::panel_trait::{Panel, PanelState};
use crate::data::projection::{Aggregation, PlotStyle};
use crate::data::selection::PlotOrder;
use crate::data::session::TradeSession;

/// X-axis, value columns and plot style.
pub struct SeriesPanel {
    pub state: PanelState,
}

impl Default for SeriesPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Series", icons::CHART_LINE),
        }
    }
}

impl Panel for SeriesPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut TradeSession) {
        let mut plot = session.plot().clone();
        let x_options = session.x_axis_options();
        let value_options = session.value_column_options();

        ui.strong("X axis");
        egui::ComboBox::from_id_salt("x_axis_field")
            .selected_text(plot.x_axis.label().to_string())
            .show_ui(ui, |ui| {
                for opt in x_options {
                    let label = opt.label().to_string();
                    ui.selectable_value(&mut plot.x_axis, opt, label);
                }
            });

        ui.add_space(8.0);
        ui.strong("Values (summed)");
        if value_options.is_empty() {
            ui.weak("No numeric columns");
        }
        for name in &value_options {
            let mut on = plot.value_columns.iter().any(|c| c == name);
            if ui.checkbox(&mut on, name.as_str()).changed() {
                if on {
                    plot.value_columns.push(name.clone());
                } else {
                    plot.value_columns.retain(|c| c != name);
                }
            }
        }

        ui.add_space(8.0);
        ui.strong("Style");
        let mut cumulative = plot.aggregation == Aggregation::Cumulative;
        if ui.checkbox(&mut cumulative, "Cumulative").changed() {
            plot.aggregation = if cumulative {
                Aggregation::Cumulative
            } else {
                Aggregation::Individual
            };
        }
        ui.horizontal(|ui| {
            ui.radio_value(
                &mut plot.style,
                PlotStyle::Line,
                format!("{} Line", icons::CHART_LINE),
            );
            ui.radio_value(
                &mut plot.style,
                PlotStyle::Histogram,
                format!("{} Histogram", icons::CHART_BAR),
            );
        });

        let mut order = session.selection().order;
        ui.horizontal(|ui| {
            ui.label("Point order:");
            ui.radio_value(&mut order, PlotOrder::Underlying, "File")
                .on_hover_text("Rows in the order they appear in the file");
            ui.radio_value(&mut order, PlotOrder::Presentation, "Table")
                .on_hover_text("Rows in the current table sort order");
        });

        session.set_plot(plot);
        session.set_plot_order(order);
    }
}
