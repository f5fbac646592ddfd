//! Standalone application state implementing [`eframe::App`].

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::config::TradeViewConfig;
use crate::data::hotkeys::{detect_hotkey_actions, HotkeyName};
use crate::data::projection::{Aggregation, PlotStyle};
use crate::data::session::TradeSession;
use crate::panels::{FilterPanel, PlotPanel, SeriesPanel, TablePanel};

use super::screenshot;

pub struct TradeViewApp {
    pub session: TradeSession,
    pub(super) table_panel: TablePanel,
    pub(super) filter_panel: FilterPanel,
    pub(super) series_panel: SeriesPanel,
    pub(super) plot_panel: PlotPanel,
    pub(super) title: String,
    /// Window title needs to be refreshed after a load.
    title_dirty: bool,
    /// Path given on the command line, loaded on the first frame.
    pending_open: Option<PathBuf>,
}

impl TradeViewApp {
    pub fn new(cfg: TradeViewConfig) -> Self {
        Self {
            session: TradeSession::new(cfg.settings),
            table_panel: TablePanel::default(),
            filter_panel: FilterPanel::default(),
            series_panel: SeriesPanel::default(),
            plot_panel: PlotPanel::default(),
            title: cfg.title,
            title_dirty: false,
            pending_open: cfg.initial_file,
        }
    }

    /// Load `path` into the session; failures end up in the status bar.
    pub fn open_path(&mut self, path: &Path) {
        if self.session.load_path(path).is_ok() {
            self.plot_panel.request_fit();
            self.title_dirty = true;
        }
    }

    pub(super) fn open_dialog(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv", "txt", "tsv"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.open_path(&path);
        }
    }

    pub(super) fn reload(&mut self) {
        if let Some(path) = self.session.source().map(Path::to_path_buf) {
            self.open_path(&path);
        }
    }

    pub(super) fn save_settings(&mut self) {
        let result = crate::config::ViewerSettings::default_path()
            .and_then(|p| self.session.settings.save_to_path(&p).map(|_| p));
        match result {
            Ok(p) => self.session.set_status(format!("Settings saved to {}", p.display())),
            Err(e) => {
                log::error!("failed to save settings: {}", e);
                self.session.set_status(format!("Saving settings failed: {}", e));
            }
        }
    }

    pub(super) fn request_screenshot(ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(Default::default()));
    }

    pub(super) fn apply_hotkey(&mut self, ctx: &egui::Context, action: HotkeyName) {
        log::debug!("hotkey {:?}", action);
        match action {
            HotkeyName::OpenFile => self.open_dialog(),
            HotkeyName::ToggleCumulative => {
                let mut plot = self.session.plot().clone();
                plot.aggregation = match plot.aggregation {
                    Aggregation::Individual => Aggregation::Cumulative,
                    Aggregation::Cumulative => Aggregation::Individual,
                };
                self.session.set_plot(plot);
                self.plot_panel.request_fit();
            }
            HotkeyName::ToggleHistogram => {
                let mut plot = self.session.plot().clone();
                plot.style = match plot.style {
                    PlotStyle::Line => PlotStyle::Histogram,
                    PlotStyle::Histogram => PlotStyle::Line,
                };
                self.session.set_plot(plot);
            }
            HotkeyName::IncludeAll => self.session.set_all_flags(true),
            HotkeyName::IncludeNone => self.session.set_all_flags(false),
            HotkeyName::FitView => self.plot_panel.request_fit(),
            HotkeyName::SavePng => Self::request_screenshot(ctx),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.iter().find_map(|f| f.path.clone()));
        if let Some(path) = dropped {
            log::info!("file dropped: {:?}", path);
            self.open_path(&path);
        }
    }

    fn refresh_title(&mut self, ctx: &egui::Context) {
        if !self.title_dirty {
            return;
        }
        self.title_dirty = false;
        let title = match self.session.source().and_then(|p| p.file_name()) {
            Some(name) => format!("{} - {}", self.title, name.to_string_lossy()),
            None => self.title.clone(),
        };
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
    }
}

impl eframe::App for TradeViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(path) = self.pending_open.take() {
            self.open_path(&path);
        }
        self.handle_dropped_files(ctx);
        for action in detect_hotkey_actions(&self.session.settings.hotkeys, ctx) {
            self.apply_hotkey(ctx, action);
        }
        if let Some(img) = screenshot::take_screenshot_event(ctx) {
            if let Some(msg) = screenshot::prompt_and_save(&img) {
                self.session.set_status(msg);
            }
        }
        if self.session.is_dirty() {
            self.session.recompute();
        }

        self.render_layout(ctx);

        // Panels only record changes; rebuild once and redraw with fresh data.
        if self.session.is_dirty() {
            self.session.recompute();
            ctx.request_repaint();
        }
        self.refresh_title(ctx);
    }
}
