use tradeview::config::ColumnNames;
use tradeview::data::filter::*;
use tradeview::data::table::RecordTable;

fn table() -> RecordTable {
    RecordTable::from_text_rows(
        &["Direction", "Comment", "Symbol"],
        &[
            &["Long", "Breakout entry", "EURUSD"],
            &["short", "", "GBPUSD"],
            &["Short", "news spike", "XAUUSD"],
        ],
    )
}

#[test]
fn exact_match_ignores_case() {
    let t = table();
    let p = Predicate::ExactMatch {
        column: "Direction".into(),
        value: "SHORT".into(),
    };
    assert!(!p.matches(&t, 0));
    assert!(p.matches(&t, 1));
    assert!(p.matches(&t, 2));
}

#[test]
fn text_contains_in_column_fails_closed_on_missing_cell() {
    let t = table();
    let p = Predicate::TextContains {
        scope: TextScope::Column("Comment".into()),
        needle: "".into(),
    };
    assert!(p.matches(&t, 0));
    assert!(!p.matches(&t, 1));
}

#[test]
fn text_contains_any_column() {
    let t = table();
    let p = Predicate::TextContains {
        scope: TextScope::AnyColumn,
        needle: "usd".into(),
    };
    assert!((0..3).all(|r| p.matches(&t, r)));
    let p = Predicate::TextContains {
        scope: TextScope::AnyColumn,
        needle: "xau".into(),
    };
    assert!(!p.matches(&t, 0));
    assert!(p.matches(&t, 2));
}

#[test]
fn unknown_column_never_matches() {
    let t = table();
    let p = Predicate::ExactMatch {
        column: "Side".into(),
        value: "Long".into(),
    };
    assert!(!p.matches(&t, 0));
}

#[test]
fn and_flattens_and_drops_always() {
    let a = Predicate::ExactMatch {
        column: "Direction".into(),
        value: "Long".into(),
    };
    let b = Predicate::TextContains {
        scope: TextScope::AnyColumn,
        needle: "x".into(),
    };
    assert_eq!(Predicate::Always.and(Predicate::Always), Predicate::Always);
    assert_eq!(Predicate::Always.and(a.clone()), a);
    let ab = a.clone().and(b.clone());
    assert_eq!(ab, Predicate::All(vec![a.clone(), b.clone()]));
    let abc = ab.and(a.clone());
    assert_eq!(abc, Predicate::All(vec![a.clone(), b, a]));
}

#[test]
fn references_reports_columns_read() {
    let p = Predicate::ExactMatch {
        column: "Direction".into(),
        value: "Long".into(),
    }
    .and(Predicate::TextContains {
        scope: TextScope::Column("Comment".into()),
        needle: "x".into(),
    });
    assert!(p.references("direction"));
    assert!(p.references("Comment"));
    assert!(!p.references("Profit"));
}

#[test]
fn filter_state_compiles_both_clauses() {
    let cols = ColumnNames::default();
    let state = FilterState {
        direction: " Short ".into(),
        comment_text: "news".into(),
        comment_enabled: true,
        ..FilterState::default()
    };
    let t = table();
    let p = state.to_predicate(&cols);
    let passing: Vec<usize> = (0..t.row_count()).filter(|&r| p.matches(&t, r)).collect();
    assert_eq!(passing, vec![2]);
}

#[test]
fn comment_scope_any_column_searches_everything() {
    let cols = ColumnNames::default();
    let state = FilterState {
        comment_text: "gbp".into(),
        comment_enabled: true,
        comment_scope: CommentScope::AnyColumn,
        ..FilterState::default()
    };
    let t = table();
    let p = state.to_predicate(&cols);
    let passing: Vec<usize> = (0..t.row_count()).filter(|&r| p.matches(&t, r)).collect();
    assert_eq!(passing, vec![1]);
}

#[test]
fn both_disables_direction_clause() {
    let state = FilterState {
        direction: DIRECTION_BOTH.into(),
        ..FilterState::default()
    };
    assert!(!state.direction_active());
    assert_eq!(state.to_predicate(&ColumnNames::default()), Predicate::Always);
}

#[test]
fn configured_column_names_are_used() {
    let cols = ColumnNames {
        direction: "Type".into(),
        ..ColumnNames::default()
    };
    let t = RecordTable::from_text_rows(&["Type"], &[&["Buy"], &["Sell"]]);
    let p = FilterState {
        direction: "sell".into(),
        ..FilterState::default()
    }
    .to_predicate(&cols);
    assert!(!p.matches(&t, 0));
    assert!(p.matches(&t, 1));
}
