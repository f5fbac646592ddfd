//! The record table: typed cells read from a delimited text file.
//!
//! A [`RecordTable`] is loaded once per "open" action and never mutated
//! afterwards; reloading replaces it wholesale.

use std::fmt;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Formats that a cell is tried against before falling back to text.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y.%m.%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y.%m.%d"];

/// Spellings that pandas-style exports use for an empty cell.
const MISSING_TOKENS: &[&str] = &["nan", "NaN", "NAN", "null", "NULL", "None", "NaT", "N/A"];

/// Display format of timestamps, in the table and in hover labels.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─────────────────────────────────────────────────────────────────────────────
// Value
// ─────────────────────────────────────────────────────────────────────────────

/// A single typed cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Timestamp(NaiveDateTime),
    Missing,
}

impl Value {
    /// Type a raw cell. Empty cells and the usual null spellings become
    /// [`Value::Missing`]; non-finite numbers stay text.
    ///
    /// ```
    /// # use tradeview::data::table::Value;
    /// assert_eq!(Value::parse(" 12.5 "), Value::Number(12.5));
    /// assert_eq!(Value::parse("NaN"), Value::Missing);
    /// assert_eq!(Value::parse("Long"), Value::Text("Long".into()));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() || MISSING_TOKENS.contains(&s) {
            return Value::Missing;
        }
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
        if let Some(ts) = parse_timestamp(s) {
            return Value::Timestamp(ts);
        }
        Value::Text(s.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Timestamp(ts) => write!(f, "{}", ts.format(TIMESTAMP_FORMAT)),
            Value::Missing => Ok(()),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Dominant type of a column, used to decide which plot options it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Timestamp,
    Text,
    /// Every cell is missing.
    Empty,
}

// ─────────────────────────────────────────────────────────────────────────────
// Load options
// ─────────────────────────────────────────────────────────────────────────────

/// Text encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    /// Sniff a byte-order mark; UTF-8 without one.
    #[default]
    Auto,
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl TextEncoding {
    pub const ALL: &'static [TextEncoding] = &[
        TextEncoding::Auto,
        TextEncoding::Utf8,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Auto => "Auto",
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16 LE",
            TextEncoding::Utf16Be => "UTF-16 BE",
        }
    }
}

/// How to read the input file. Both fields are caller-supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub encoding: TextEncoding,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            encoding: TextEncoding::Auto,
        }
    }
}

impl CsvOptions {
    /// Delimiter as the single byte the CSV reader expects; non-ASCII falls back to `,`.
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!("non-ASCII delimiter {:?} replaced by ','", self.delimiter);
            b','
        }
    }
}

/// Decode raw file bytes to text according to `encoding`.
pub fn decode_text(bytes: &[u8], encoding: TextEncoding) -> Result<String, LoadError> {
    let encoding = match encoding {
        TextEncoding::Auto => sniff_encoding(bytes),
        other => other,
    };
    let text = match encoding {
        TextEncoding::Utf16Le => decode_utf16(bytes, u16::from_le_bytes, "UTF-16 LE")?,
        TextEncoding::Utf16Be => decode_utf16(bytes, u16::from_be_bytes, "UTF-16 BE")?,
        _ => String::from_utf8(bytes.to_vec()).map_err(|e| LoadError::Decode {
            encoding: "UTF-8",
            reason: e.to_string(),
        })?,
    };
    Ok(text.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(text))
}

fn sniff_encoding(bytes: &[u8]) -> TextEncoding {
    match bytes {
        [0xFF, 0xFE, ..] => TextEncoding::Utf16Le,
        [0xFE, 0xFF, ..] => TextEncoding::Utf16Be,
        // BOM-less UTF-16 LE from Windows tools: ASCII header with zero high bytes.
        [a, 0, b, 0, ..] if *a != 0 && *b != 0 => TextEncoding::Utf16Le,
        _ => TextEncoding::Utf8,
    }
}

fn decode_utf16(
    bytes: &[u8],
    to_unit: fn([u8; 2]) -> u16,
    encoding: &'static str,
) -> Result<String, LoadError> {
    if bytes.len() % 2 != 0 {
        return Err(LoadError::Decode {
            encoding,
            reason: format!("odd byte length {}", bytes.len()),
        });
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| to_unit([c[0], c[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| LoadError::Decode {
        encoding,
        reason: e.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────────────────
// RecordTable
// ─────────────────────────────────────────────────────────────────────────────

/// Ordered rows of typed cells under a header. Every row has exactly
/// `columns().len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
    /// Per-column kinds, classified in [`RecordTable::new`].
    kinds: Vec<ColumnKind>,
}

impl RecordTable {
    /// Build a table, padding short rows with [`Value::Missing`] and dropping
    /// cells beyond the header width.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, Value::Missing);
                r
            })
            .collect::<Vec<_>>();
        let kinds = (0..width).map(|c| classify_column(&rows, c)).collect();
        Self {
            columns,
            rows,
            kinds,
        }
    }

    /// Build a table from raw strings, typing each cell with [`Value::parse`].
    ///
    /// ```
    /// # use tradeview::data::table::RecordTable;
    /// let t = RecordTable::from_text_rows(&["Direction", "Profit"], &[&["Long", "10"]]);
    /// assert_eq!(t.row_count(), 1);
    /// assert_eq!(t.value(0, "Profit").and_then(|v| v.as_number()), Some(10.0));
    /// ```
    pub fn from_text_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| Value::parse(c)).collect())
                .collect(),
        )
    }

    /// Parse delimited text with a header row.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, LoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);
        let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
        if columns.iter().all(|c| c.is_empty()) {
            return Err(LoadError::NoHeader);
        }
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(Value::parse).collect());
        }
        Ok(Self::new(columns, rows))
    }

    /// Read and parse a file from disk.
    pub fn load(path: &Path, opts: &CsvOptions) -> Result<Self, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = decode_text(&bytes, opts.encoding)?;
        let table = Self::from_reader(text.as_bytes(), opts.delimiter_byte())?;
        log::info!(
            "loaded {:?}: {} rows, {} columns",
            path,
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column: exact name first, then a case-insensitive match.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name).or_else(|| {
            let wanted = name.trim().to_lowercase();
            self.columns.iter().position(|c| c.to_lowercase() == wanted)
        })
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row(&self, row: usize) -> Option<&[Value]> {
        self.rows.get(row).map(Vec::as_slice)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Cell by column name; `None` if the row or the column does not exist.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.column_index(column).and_then(|c| self.cell(row, c))
    }

    /// Kind of a column as classified at load time; out-of-range columns
    /// report [`ColumnKind::Empty`].
    pub fn column_kind(&self, col: usize) -> ColumnKind {
        self.kinds.get(col).copied().unwrap_or(ColumnKind::Empty)
    }

    /// Names of columns whose kind is in `kinds`, in header order.
    pub fn columns_of_kind(&self, kinds: &[ColumnKind]) -> Vec<String> {
        (0..self.columns.len())
            .filter(|&c| kinds.contains(&self.column_kind(c)))
            .map(|c| self.columns[c].clone())
            .collect()
    }
}

/// Classify a column by the cells it actually holds. Any text cell makes the
/// column text; otherwise timestamps win over numbers.
fn classify_column(rows: &[Vec<Value>], col: usize) -> ColumnKind {
    let (mut numbers, mut stamps) = (0usize, 0usize);
    for row in rows {
        match row.get(col) {
            Some(Value::Text(_)) => return ColumnKind::Text,
            Some(Value::Number(_)) => numbers += 1,
            Some(Value::Timestamp(_)) => stamps += 1,
            _ => {}
        }
    }
    match (numbers, stamps) {
        (0, 0) => ColumnKind::Empty,
        (_, 0) => ColumnKind::Numeric,
        (0, _) => ColumnKind::Timestamp,
        _ => ColumnKind::Text,
    }
}
