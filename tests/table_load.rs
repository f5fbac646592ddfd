use std::io::Write;

use tradeview::data::table::*;
use tradeview::error::LoadError;

const SAMPLE: &str = "\
Ticket,Direction,Open Time,Close Time,Profit,Comment
1,Long,2024-01-02 09:00:00,2024-01-02 10:30:00,12.5,breakout
2,Short,2024.01.03 11:00:00,2024.01.03 11:45:00,-4,
3,Long,2024-01-04 08:00,2024-01-04,nan,news
";

fn write_temp(name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tradeview_test_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(bytes).unwrap();
    path
}

#[test]
fn reads_header_and_types_cells() {
    let t = RecordTable::from_reader(SAMPLE.as_bytes(), b',').unwrap();
    assert_eq!(t.row_count(), 3);
    assert_eq!(t.column_count(), 6);
    assert_eq!(t.value(0, "Profit"), Some(&Value::Number(12.5)));
    assert_eq!(t.value(2, "Profit"), Some(&Value::Missing));
    assert_eq!(t.value(1, "Comment"), Some(&Value::Missing));
    assert_eq!(t.value(0, "Direction").and_then(Value::as_text), Some("Long"));
    assert!(matches!(t.value(1, "Open Time"), Some(Value::Timestamp(_))));
    assert_eq!(
        t.value(2, "Close Time").map(|v| v.to_string()),
        Some("2024-01-04 00:00:00".to_string())
    );
}

#[test]
fn column_kinds() {
    let t = RecordTable::from_reader(SAMPLE.as_bytes(), b',').unwrap();
    let kind = |name: &str| t.column_kind(t.column_index(name).unwrap());
    assert_eq!(kind("Ticket"), ColumnKind::Numeric);
    assert_eq!(kind("Profit"), ColumnKind::Numeric);
    assert_eq!(kind("Open Time"), ColumnKind::Timestamp);
    assert_eq!(kind("Direction"), ColumnKind::Text);
    assert_eq!(
        t.columns_of_kind(&[ColumnKind::Timestamp]),
        vec!["Open Time".to_string(), "Close Time".to_string()]
    );
}

#[test]
fn column_lookup_falls_back_to_case_insensitive() {
    let t = RecordTable::from_reader(SAMPLE.as_bytes(), b',').unwrap();
    assert_eq!(t.column_index("profit"), t.column_index("Profit"));
    assert!(t.has_column("CLOSE TIME"));
    assert!(!t.has_column("Swap"));
}

#[test]
fn short_rows_are_padded_long_rows_truncated() {
    let text = "A,B,C\n1,2\n1,2,3,4\n";
    let t = RecordTable::from_reader(text.as_bytes(), b',').unwrap();
    assert_eq!(t.row(0).unwrap().len(), 3);
    assert_eq!(t.cell(0, 2), Some(&Value::Missing));
    assert_eq!(t.row(1).unwrap().len(), 3);
    assert_eq!(t.cell(1, 2), Some(&Value::Number(3.0)));
}

#[test]
fn semicolon_delimiter() {
    let text = "Direction;Profit\nLong;1.5\n";
    let t = RecordTable::from_reader(text.as_bytes(), b';').unwrap();
    assert_eq!(t.value(0, "Profit"), Some(&Value::Number(1.5)));
}

#[test]
fn empty_input_has_no_header() {
    let err = RecordTable::from_reader("".as_bytes(), b',').unwrap_err();
    assert!(matches!(err, LoadError::NoHeader));
}

#[test]
fn header_only_gives_empty_table() {
    let t = RecordTable::from_reader("Direction,Profit\n".as_bytes(), b',').unwrap();
    assert!(t.is_empty());
    assert_eq!(t.column_count(), 2);
    assert_eq!(t.column_kind(1), ColumnKind::Empty);
}

#[test]
fn value_parse_rules() {
    assert_eq!(Value::parse("  "), Value::Missing);
    assert_eq!(Value::parse("NaT"), Value::Missing);
    assert_eq!(Value::parse("-0.25"), Value::Number(-0.25));
    assert_eq!(Value::parse("inf"), Value::Text("inf".into()));
    assert!(matches!(Value::parse("2024-01-02T03:04:05"), Value::Timestamp(_)));
    assert_eq!(Value::parse("12.5").to_string(), "12.5");
    assert_eq!(Value::Missing.to_string(), "");
}

#[test]
fn decodes_utf16_with_bom() {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in "Profit\n7\n".encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    let text = decode_text(&bytes, TextEncoding::Auto).unwrap();
    assert_eq!(text, "Profit\n7\n");

    let mut be = vec![0xFE, 0xFF];
    for unit in "A".encode_utf16() {
        be.extend_from_slice(&unit.to_be_bytes());
    }
    assert_eq!(decode_text(&be, TextEncoding::Auto).unwrap(), "A");
}

#[test]
fn decodes_bomless_utf16le() {
    let bytes: Vec<u8> = "Ab,C\n".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
    assert_eq!(decode_text(&bytes, TextEncoding::Auto).unwrap(), "Ab,C\n");
}

#[test]
fn utf8_bom_is_stripped_and_bad_bytes_rejected() {
    let bytes = b"\xEF\xBB\xBFProfit\n1\n";
    assert_eq!(decode_text(bytes, TextEncoding::Auto).unwrap(), "Profit\n1\n");
    let err = decode_text(&[b'a', 0xC3], TextEncoding::Utf8).unwrap_err();
    assert!(matches!(err, LoadError::Decode { encoding: "UTF-8", .. }));
    let err = decode_text(&[0x41, 0x00, 0x42], TextEncoding::Utf16Le).unwrap_err();
    assert!(matches!(err, LoadError::Decode { .. }));
}

#[test]
fn load_from_disk_and_missing_file() {
    let path = write_temp("trades.csv", SAMPLE.as_bytes());
    let t = RecordTable::load(&path, &CsvOptions::default()).unwrap();
    assert_eq!(t.row_count(), 3);

    let missing = path.with_file_name("does_not_exist.csv");
    let err = RecordTable::load(&missing, &CsvOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn non_ascii_delimiter_falls_back_to_comma() {
    let opts = CsvOptions {
        delimiter: '§',
        ..CsvOptions::default()
    };
    assert_eq!(opts.delimiter_byte(), b',');
}

#[test]
fn column_kinds_survive_clone_and_out_of_range_is_empty() {
    let t = RecordTable::from_text_rows(
        &["Profit", "Note"],
        &[&["1.5", "a"], &["-2", "b"]],
    );
    let c = t.clone();
    assert_eq!(c.column_kind(0), ColumnKind::Numeric);
    assert_eq!(c.column_kind(1), ColumnKind::Text);
    assert_eq!(c.column_kind(7), ColumnKind::Empty);
    assert_eq!(c.columns_of_kind(&[ColumnKind::Numeric]), vec!["Profit".to_string()]);
}
