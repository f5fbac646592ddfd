use eframe::egui;
use egui::{Color32, Ui};
use egui_phosphor::regular as icons;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, Points, Text};

use super::panel_trait::{Panel, PanelState};
use crate::data::projection::{PlotStyle, PlottedSeries, Projection};
use crate::data::session::TradeSession;
use crate::data::x_formatter::{DecimalFormatter, XFormatter};

const SERIES_COLOR: Color32 = Color32::from_rgb(80, 160, 255);
const HOVER_COLOR: Color32 = Color32::from_rgb(255, 200, 0);

/// The trade plot. Draws the session's last projection and feeds pointer
/// positions back into the session's hit-tester.
pub struct PlotPanel {
    pub state: PanelState,
    /// Reset zoom and pan to the data on the next frame.
    pub fit_request: bool,
}

impl Default for PlotPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Plot", icons::CHART_LINE),
            fit_request: true,
        }
    }
}

impl PlotPanel {
    pub fn request_fit(&mut self) {
        self.fit_request = true;
    }
}

/// Bar width for a histogram: 80% of the smallest x gap, or 0.8 when fewer
/// than two distinct x values exist.
pub fn histogram_bar_width(series: &PlottedSeries) -> f64 {
    let mut xs: Vec<f64> = series
        .points
        .iter()
        .map(|p| p.x)
        .filter(|x| x.is_finite())
        .collect();
    xs.sort_by(|a, b| a.total_cmp(b));
    let min_gap = xs
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|g| *g > 0.0)
        .fold(f64::INFINITY, f64::min);
    if min_gap.is_finite() {
        min_gap * 0.8
    } else {
        0.8
    }
}

impl Panel for PlotPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &mut TradeSession) {
        let series = match session.projection() {
            Projection::NothingSelected => {
                ui.centered_and_justified(|ui| {
                    ui.weak("Nothing selected: tick at least one value column.");
                });
                return;
            }
            Projection::Series(s) => s.clone(),
        };

        if series.points.is_empty() {
            ui.weak("No plottable rows.");
        }

        let x_fmt = XFormatter::new(series.x_kind);
        let y_fmt = DecimalFormatter {
            decimal_places: None,
            unit: session.settings.y_unit.clone(),
        };
        let x_name = session.plot().x_axis.label().to_string();
        let y_name = series.name.clone();
        let style = session.plot().style;
        let hover = session.hover().cloned();

        let mut plot = Plot::new("trade_plot")
            .legend(Legend::default())
            .allow_scroll(true)
            .allow_boxed_zoom(true)
            .x_axis_label(x_name.clone())
            .y_axis_label(y_name.clone())
            .x_axis_formatter(move |mark, range| {
                x_fmt.format_tick(mark.value, (*range.start(), *range.end()))
            })
            .y_axis_formatter(move |mark, _range| y_fmt.format(mark.value, 2));
        if self.fit_request {
            plot = plot.reset();
            self.fit_request = false;
        }

        let xy = series.xy();
        let plot_resp = plot.show(ui, |plot_ui| {
            match style {
                PlotStyle::Line => {
                    plot_ui.line(Line::new(y_name.clone(), xy.clone()).color(SERIES_COLOR));
                    plot_ui.points(
                        Points::new(format!("{} points", y_name), xy.clone())
                            .color(SERIES_COLOR)
                            .radius(2.5),
                    );
                }
                PlotStyle::Histogram => {
                    let width = histogram_bar_width(&series);
                    let bars: Vec<Bar> = series
                        .points
                        .iter()
                        .map(|p| Bar::new(p.x, p.y).width(width))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(y_name.clone(), bars).color(SERIES_COLOR));
                }
            }
            if let Some(h) = &hover {
                plot_ui.points(
                    Points::new("hovered", vec![[h.x, h.y]])
                        .color(HOVER_COLOR)
                        .radius(6.0),
                );
                plot_ui.text(
                    Text::new(
                        "hover_label",
                        PlotPoint::new(h.x, h.y),
                        egui::RichText::new(h.text(&x_name, &y_name))
                            .color(HOVER_COLOR)
                            .monospace(),
                    )
                    .anchor(egui::Align2::LEFT_BOTTOM),
                );
            }
        });

        // Hit-test against the series drawn this frame, using the final transform.
        let before = session.hover().map(|h| h.index);
        match plot_resp.response.hover_pos() {
            Some(pos) => {
                let transform = plot_resp.transform;
                session.update_hover([pos.x as f64, pos.y as f64], |x, y| {
                    let p = transform.position_from_point(&PlotPoint::new(x, y));
                    [p.x as f64, p.y as f64]
                });
            }
            None => session.clear_hover(),
        }
        if session.hover().map(|h| h.index) != before {
            ui.ctx().request_repaint();
        }
    }
}
