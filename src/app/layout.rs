//! Window layout: menu bar, controls sidebar, plot over table, status bar.

use eframe::egui;
use egui_phosphor::regular as icons;

use crate::data::table::TextEncoding;
use crate::panels::Panel;

use super::TradeViewApp;

impl TradeViewApp {
    pub(super) fn render_layout(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.render_menu_bar(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        if self.filter_panel.state.visible || self.series_panel.state.visible {
            egui::SidePanel::left("controls_sidebar")
                .resizable(true)
                .default_width(260.0)
                .min_width(180.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        if self.filter_panel.state.visible {
                            ui.heading(self.filter_panel.title_and_icon());
                            self.filter_panel.render_panel(ui, &mut self.session);
                            ui.separator();
                        }
                        if self.series_panel.state.visible {
                            ui.heading(self.series_panel.title_and_icon());
                            self.series_panel.render_panel(ui, &mut self.session);
                        }
                    });
                });
        }

        if self.table_panel.state.visible {
            egui::TopBottomPanel::bottom("table_area")
                .resizable(true)
                .default_height(320.0)
                .min_height(120.0)
                .show(ctx, |ui| {
                    self.table_panel.render_panel(ui, &mut self.session);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.plot_panel.state.visible {
                self.plot_panel.render_panel(ui, &mut self.session);
            }
        });
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .button(format!("{} Open…", icons::FOLDER_OPEN))
                    .clicked()
                {
                    ui.close();
                    self.open_dialog();
                }
                let has_source = self.session.source().is_some();
                if ui
                    .add_enabled(has_source, egui::Button::new("Reload"))
                    .clicked()
                {
                    ui.close();
                    self.reload();
                }
                ui.menu_button("Encoding", |ui| {
                    for enc in TextEncoding::ALL {
                        ui.radio_value(&mut self.session.settings.csv.encoding, *enc, enc.label());
                    }
                });
                ui.separator();
                if ui
                    .button(format!("{} Save PNG", icons::CAMERA))
                    .clicked()
                {
                    ui.close();
                    Self::request_screenshot(&ctx);
                }
                if ui.button("Save settings").clicked() {
                    ui.close();
                    self.save_settings();
                }
            });

            ui.menu_button("View", |ui| {
                self.plot_panel.render_menu(ui, &mut self.session);
                self.table_panel.render_menu(ui, &mut self.session);
                self.filter_panel.render_menu(ui, &mut self.session);
                self.series_panel.render_menu(ui, &mut self.session);
                ui.separator();
                if ui
                    .button(format!("{} Fit view", icons::ARROWS_OUT))
                    .clicked()
                {
                    ui.close();
                    self.plot_panel.request_fit();
                }
            });
        });
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.session.source() {
                Some(p) => ui.label(p.display().to_string()),
                None => ui.weak("No file"),
            };
            ui.separator();
            let (shown, included, total) = self.session.counts();
            ui.label(format!(
                "{} rows · {} shown · {} included · {} plotted",
                total,
                shown,
                included,
                self.session.plot_index_set().len()
            ));
            if let Some(msg) = self.session.status() {
                ui.separator();
                ui.colored_label(ui.visuals().warn_fg_color, msg);
            }
        });
    }
}
