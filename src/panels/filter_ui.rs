use eframe::egui;
use egui::Ui;
use egui_phosphor::regular as icons;

use super::panel_trait::{Panel, PanelState};
use crate::data::filter::{CommentScope, DIRECTION_BOTH};
use crate::data::session::TradeSession;

/// Direction and comment filters. Controls whose column is absent from the
/// loaded table are disabled.
pub struct FilterPanel {
    pub state: PanelState,
}

impl Default for FilterPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Filters", icons::FUNNEL),
        }
    }
}

impl Panel for FilterPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut TradeSession) {
        let mut filter = session.selection().filter().clone();
        let columns = session.settings.columns.clone();
        let directions = session.settings.directions.clone();

        ui.strong("Direction");
        let direction_ok = session.direction_available();
        ui.add_enabled_ui(direction_ok || filter.direction_active(), |ui| {
            let selected = if filter.direction_active() {
                filter.direction.clone()
            } else {
                DIRECTION_BOTH.to_string()
            };
            egui::ComboBox::from_id_salt("direction_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut filter.direction, String::new(), DIRECTION_BOTH);
                    for d in &directions {
                        ui.selectable_value(&mut filter.direction, d.clone(), d.as_str());
                    }
                });
        })
        .response
        .on_disabled_hover_text(format!("No '{}' column in this file", columns.direction));
        if filter.direction_active() && !direction_ok {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!("No '{}' column: every row is filtered out", columns.direction),
            );
        }

        ui.add_space(8.0);
        ui.strong("Comment");
        ui.horizontal(|ui| {
            ui.checkbox(&mut filter.comment_enabled, "")
                .on_hover_text("Enable the comment filter");
            ui.add_enabled(
                filter.comment_enabled,
                egui::TextEdit::singleline(&mut filter.comment_text).hint_text("contains…"),
            );
        });
        ui.horizontal(|ui| {
            let comment_ok = session.comment_available();
            ui.add_enabled_ui(comment_ok, |ui| {
                ui.radio_value(
                    &mut filter.comment_scope,
                    CommentScope::CommentColumn,
                    format!("'{}' column", columns.comment),
                );
            });
            ui.radio_value(&mut filter.comment_scope, CommentScope::AnyColumn, "Any column");
        });
        if filter.comment_active()
            && filter.comment_scope == CommentScope::CommentColumn
            && !session.comment_available()
        {
            ui.colored_label(
                ui.visuals().warn_fg_color,
                format!("No '{}' column: every row is filtered out", columns.comment),
            );
        }

        session.set_filter(filter);
    }
}
