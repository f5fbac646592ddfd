use eframe::egui;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;
use egui_table::{HeaderRow as EgHeaderRow, Table, TableDelegate};

use super::panel_trait::{Panel, PanelState};
use crate::data::session::TradeSession;
use crate::data::table::{RecordTable, Value};
use crate::data::view::SortKey;

// Feature-gated debug logging for table column widths.
// Enable with: cargo run --features table_debug
#[cfg(feature = "table_debug")]
macro_rules! table_debug { ($($arg:tt)*) => { log::debug!($($arg)*); } }

#[cfg(not(feature = "table_debug"))]
macro_rules! table_debug {
    ($($arg:tt)*) => {{ /* no-op */ }};
}

const CHECK_COL_W: f32 = 32.0;
const INDEX_COL_W: f32 = 52.0;
const MIN_DATA_COL_W: f32 = 90.0;
const MAX_DATA_COL_W: f32 = 220.0;

/// Sortable record table with a per-row inclusion checkbox.
pub struct TablePanel {
    pub state: PanelState,
}

impl Default for TablePanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Table", icons::TABLE),
        }
    }
}

struct RecordsDelegate<'a> {
    table: &'a RecordTable,
    order: &'a [usize],
    flags: &'a [bool],
    sort: Option<&'a SortKey>,
    hovered_row: Option<usize>,
    toggles: Vec<(usize, bool)>,
    sort_request: Option<usize>,
}

impl RecordsDelegate<'_> {
    fn sort_marker(&self, data_col: usize) -> &'static str {
        match self.sort {
            Some(k) if k.column == data_col && k.descending => icons::CARET_DOWN,
            Some(k) if k.column == data_col => icons::CARET_UP,
            _ => "",
        }
    }
}

impl TableDelegate for RecordsDelegate<'_> {
    fn header_cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::HeaderCellInfo) {
        let col = cell.col_range.start;
        ui.add_space(4.0);
        match col {
            0 => {
                ui.strong(icons::CHECK_SQUARE);
            }
            1 => {
                ui.strong("#");
            }
            c => {
                let data_col = c - 2;
                let name = self.table.columns().get(data_col).cloned().unwrap_or_default();
                let text = format!("{} {}", name, self.sort_marker(data_col));
                let resp = ui
                    .add(
                        egui::Label::new(RichText::new(text).strong())
                            .truncate()
                            .sense(egui::Sense::click()),
                    )
                    .on_hover_text("Click to sort");
                if resp.clicked() {
                    self.sort_request = Some(data_col);
                }
            }
        }
    }

    fn cell_ui(&mut self, ui: &mut egui::Ui, cell: &egui_table::CellInfo) {
        let pos = cell.row_nr as usize;
        let Some(&row) = self.order.get(pos) else {
            return;
        };
        if self.hovered_row == Some(row) {
            ui.painter().rect_filled(
                ui.max_rect(),
                0.0,
                Color32::from_rgba_unmultiplied(255, 210, 0, 40),
            );
        }
        ui.add_space(4.0);
        match cell.col_nr {
            0 => {
                let mut included = self.flags.get(row).copied().unwrap_or(false);
                if ui.checkbox(&mut included, "").changed() {
                    self.toggles.push((row, included));
                }
            }
            1 => {
                ui.weak(format!("{}", row + 1));
            }
            c => {
                let value = self.table.cell(row, c - 2).unwrap_or(&Value::Missing);
                let text = match value {
                    Value::Missing => RichText::new("—").weak(),
                    Value::Number(n) if *n < 0.0 => {
                        RichText::new(value.to_string()).color(Color32::LIGHT_RED)
                    }
                    _ => RichText::new(value.to_string()),
                };
                ui.add(egui::Label::new(text).truncate().show_tooltip_when_elided(true));
            }
        }
    }
}

impl Panel for TablePanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut TradeSession) {
        let (shown, included, total) = session.counts();
        ui.horizontal(|ui| {
            ui.label(format!("{} shown · {} included · {} total", shown, included, total));
            ui.separator();
            if ui
                .button(format!("{} All", icons::CHECK_SQUARE))
                .on_hover_text("Include every row in the plot")
                .clicked()
            {
                session.set_all_flags(true);
            }
            if ui
                .button(format!("{} None", icons::SQUARE))
                .on_hover_text("Exclude every row from the plot")
                .clicked()
            {
                session.set_all_flags(false);
            }
        });
        ui.separator();

        if session.table().column_count() == 0 {
            ui.centered_and_justified(|ui| {
                ui.weak("Open a CSV trade log (File → Open or drop a file here).");
            });
            return;
        }

        let avail_w = ui.available_width();
        let n_data = session.table().column_count();
        let data_w = ((avail_w - CHECK_COL_W - INDEX_COL_W) / n_data as f32)
            .clamp(MIN_DATA_COL_W, MAX_DATA_COL_W);
        table_debug!("[table_ui] avail_w={:.1} data_w={:.1}", avail_w, data_w);
        let mut cols = vec![
            egui_table::Column::new(CHECK_COL_W),
            egui_table::Column::new(INDEX_COL_W),
        ];
        cols.extend((0..n_data).map(|_| egui_table::Column::new(data_w)));

        let hovered_row = session.hover().map(|h| h.row);
        let (toggles, sort_request) = {
            let mut delegate = RecordsDelegate {
                table: session.table(),
                order: session.presentation_order(),
                flags: session.selection().flags(),
                sort: session.view().sort.as_ref(),
                hovered_row,
                toggles: Vec::new(),
                sort_request: None,
            };
            let remaining_h = ui.available_height();
            let (rect, _resp) =
                ui.allocate_exact_size(egui::vec2(avail_w, remaining_h), egui::Sense::hover());
            let ui_builder = egui::UiBuilder::new()
                .max_rect(rect)
                .layout(egui::Layout::left_to_right(egui::Align::Min));
            let mut table_ui = ui.new_child(ui_builder);
            Table::new()
                .id_salt("records_table")
                .num_rows(delegate.order.len() as u64)
                .columns(cols)
                .headers(vec![EgHeaderRow::new(24.0)])
                .show(&mut table_ui, &mut delegate);
            (delegate.toggles, delegate.sort_request)
        };

        for (row, value) in toggles {
            if let Err(e) = session.set_flag(row, value) {
                log::warn!("{}", e);
            }
        }
        if let Some(col) = sort_request {
            session.cycle_sort(col);
        }
    }
}
