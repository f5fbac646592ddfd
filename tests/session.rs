use std::io::Write;

use tradeview::config::ViewerSettings;
use tradeview::data::filter::FilterState;
use tradeview::data::projection::{Aggregation, Projection, XAxisMode};
use tradeview::data::selection::PlotOrder;
use tradeview::data::session::TradeSession;
use tradeview::data::table::RecordTable;

fn trades() -> RecordTable {
    RecordTable::from_text_rows(
        &["Direction", "Close Time", "Profit", "Swap", "Comment", "Note"],
        &[
            &["Long", "2024-01-02 10:00:00", "10", "-1", "breakout", "x"],
            &["Short", "2024-01-02 11:00:00", "-5", "0", "", "y"],
            &["Long", "2024-01-02 12:00:00", "3", "", "news", "z"],
        ],
    )
}

fn session() -> TradeSession {
    let mut s = TradeSession::default();
    s.replace_table(trades(), None);
    s.recompute();
    s
}

#[test]
fn replace_table_picks_default_value_columns() {
    let s = session();
    assert_eq!(s.plot().value_columns, vec!["Profit".to_string(), "Swap".to_string()]);
    let ys: Vec<f64> = s.projection().points().iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![9.0, -5.0, 3.0]);
    assert_eq!(s.counts(), (3, 3, 3));
}

#[test]
fn direction_then_flag_pipeline() {
    let mut s = TradeSession::default();
    s.replace_table(
        RecordTable::from_text_rows(&["Direction", "Profit"], &[&["Long", "10"], &["Short", "-5"]]),
        None,
    );
    s.set_filter(FilterState {
        direction: "Long".into(),
        ..FilterState::default()
    });
    s.recompute();
    assert_eq!(s.plot_index_set(), &[0]);
    s.set_flag(0, false).unwrap();
    assert!(s.is_dirty());
    s.recompute();
    assert!(s.plot_index_set().is_empty());
    assert!(!s.is_dirty());
}

#[test]
fn mutations_wait_for_recompute() {
    let mut s = session();
    s.set_all_flags(false);
    assert_eq!(s.plot_index_set(), &[0, 1, 2]);
    s.recompute();
    assert!(s.plot_index_set().is_empty());
    assert!(matches!(s.projection(), Projection::Series(p) if p.points.is_empty()));
}

#[test]
fn out_of_range_flag_keeps_state_clean() {
    let mut s = session();
    assert!(s.set_flag(3, false).is_err());
    assert!(s.toggle_flag(7).is_err());
    assert!(!s.is_dirty());
}

#[test]
fn sorting_changes_presentation_but_not_plot_by_default() {
    let mut s = session();
    s.cycle_sort(2); // Profit ascending
    s.recompute();
    assert_eq!(s.presentation_order(), &[1, 2, 0]);
    assert_eq!(s.plot_index_set(), &[0, 1, 2]);

    s.set_plot_order(PlotOrder::Presentation);
    s.recompute();
    assert_eq!(s.plot_index_set(), &[1, 2, 0]);
}

#[test]
fn unchanged_settings_do_not_mark_dirty() {
    let mut s = session();
    let plot = s.plot().clone();
    s.set_plot(plot);
    s.set_filter(s.selection().filter().clone());
    s.set_plot_order(PlotOrder::Underlying);
    assert!(!s.is_dirty());
}

#[test]
fn cumulative_over_time_axis() {
    let mut s = session();
    let mut plot = s.plot().clone();
    plot.x_axis = XAxisMode::Field("Close Time".into());
    plot.value_columns = vec!["Profit".into()];
    plot.aggregation = Aggregation::Cumulative;
    s.set_plot(plot);
    s.recompute();
    let ys: Vec<f64> = s.projection().points().iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![10.0, 5.0, 8.0]);
}

#[test]
fn nothing_selected_when_no_value_columns() {
    let mut s = session();
    let mut plot = s.plot().clone();
    plot.value_columns.clear();
    s.set_plot(plot);
    s.recompute();
    assert_eq!(s.projection(), &Projection::NothingSelected);
}

#[test]
fn projection_issues_become_status() {
    let mut s = session();
    let mut plot = s.plot().clone();
    plot.value_columns = vec!["Profit".into(), "Note".into()];
    s.set_plot(plot);
    s.recompute();
    assert!(s.status().unwrap().starts_with("Plot skipped data"));

    let mut plot = s.plot().clone();
    plot.value_columns = vec!["Profit".into()];
    s.set_plot(plot);
    s.recompute();
    assert_eq!(s.status(), None);
}

#[test]
fn options_offered_to_the_ui() {
    let s = session();
    assert_eq!(
        s.x_axis_options(),
        vec![
            XAxisMode::Sequential,
            XAxisMode::Field("Close Time".into()),
            XAxisMode::Field("Profit".into()),
            XAxisMode::Field("Swap".into()),
        ]
    );
    assert_eq!(s.value_column_options(), vec!["Profit".to_string(), "Swap".to_string()]);
    assert!(s.direction_available());
    assert!(s.comment_available());
}

#[test]
fn x_field_missing_from_new_table_falls_back_to_sequential() {
    let mut s = session();
    let mut plot = s.plot().clone();
    plot.x_axis = XAxisMode::Field("Close Time".into());
    s.set_plot(plot);
    s.replace_table(RecordTable::from_text_rows(&["Profit"], &[&["1"]]), None);
    assert_eq!(s.plot().x_axis, XAxisMode::Sequential);
    assert!(!s.direction_available());
}

#[test]
fn hover_follows_pixel_transform_and_clears_on_recompute() {
    let mut s = session();
    let to_px = |x: f64, y: f64| [x * 100.0, -y * 10.0];
    let hit = s.update_hover([101.0, 52.0], to_px).cloned().unwrap();
    assert_eq!(hit.row, 1);
    assert_eq!(hit.y_label, "-5.00");
    assert!(s.update_hover([1000.0, 1000.0], to_px).is_none());
    s.update_hover([0.0, -90.0], to_px);
    assert!(s.hover().is_some());
    s.set_all_flags(true);
    s.recompute();
    assert!(s.hover().is_none());
}

#[test]
fn failed_load_keeps_previous_table() {
    let mut s = session();
    let missing = std::env::temp_dir().join("tradeview_no_such_file.csv");
    assert!(s.load_path(&missing).is_err());
    assert_eq!(s.table().row_count(), 3);
    assert!(s.status().unwrap().starts_with("Load failed"));
}

#[test]
fn load_path_reads_file_and_recomputes() {
    let dir = std::env::temp_dir().join(format!("tradeview_session_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("log.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(b"Direction;Profit\nLong;1\nShort;2\n").unwrap();
    drop(f);

    let mut settings = ViewerSettings::default();
    settings.csv.delimiter = ';';
    let mut s = TradeSession::new(settings);
    s.load_path(&path).unwrap();
    assert_eq!(s.source(), Some(path.as_path()));
    assert_eq!(s.plot_index_set(), &[0, 1]);
    assert!(!s.is_dirty());
}

#[test]
fn direction_filter_cleared_when_new_table_lacks_direction() {
    let mut s = session();
    s.set_filter(FilterState {
        direction: "Long".into(),
        ..FilterState::default()
    });
    s.recompute();
    assert_eq!(s.plot_index_set(), &[0, 2]);

    s.replace_table(
        RecordTable::from_text_rows(&["Side", "Profit"], &[&["Buy", "1"], &["Sell", "2"]]),
        None,
    );
    s.recompute();
    assert!(!s.direction_available());
    assert!(!s.selection().filter().direction_active());
    assert_eq!(s.presentation_order(), &[0, 1]);
    assert_eq!(s.plot_index_set(), &[0, 1]);
}

#[test]
fn direction_filter_kept_when_new_table_has_direction() {
    let mut s = session();
    s.set_filter(FilterState {
        direction: "Short".into(),
        ..FilterState::default()
    });
    s.replace_table(
        RecordTable::from_text_rows(&["Direction", "Profit"], &[&["Long", "1"], &["Short", "2"]]),
        None,
    );
    s.recompute();
    assert_eq!(s.selection().filter().direction, "Short");
    assert_eq!(s.plot_index_set(), &[1]);
}

#[test]
fn text_money_column_is_not_a_default_value_column() {
    let mut s = TradeSession::default();
    s.replace_table(
        RecordTable::from_text_rows(&["Profit", "Swap"], &[&["10", "0"], &["1,234.50", "-1"]]),
        None,
    );
    s.recompute();
    assert!(s.value_column_options().iter().all(|c| c != "Profit"));
    assert_eq!(s.plot().value_columns, vec!["Swap".to_string()]);
    assert!(s.status().is_none());
}
