//! Native window entry point.

use eframe::egui;

use crate::config::TradeViewConfig;

use super::TradeViewApp;

/// Open the viewer in a native window. Blocks until the window is closed.
pub fn run_tradeview(mut cfg: TradeViewConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut opts = cfg
        .native_options
        .take()
        .unwrap_or_else(eframe::NativeOptions::default);

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1400.0, 900.0))
            .with_drag_and_drop(true);
    }

    let app = TradeViewApp::new(cfg);
    eframe::run_native(
        &title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
