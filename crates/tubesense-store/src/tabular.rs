//! Records <-> CSV rows.
//!
//! Columns are the union of keys across all records, in first-seen order.
//! Cells are written as plain text. On the way back in, each column gets one
//! type from all of its non-empty cells (integer, float, boolean, otherwise
//! string) and empty cells become null.

use std::io::{Read, Write};

use serde_json::{Map, Number, Value};

use crate::StoreError;

/// Written before the header row so spreadsheet tools detect UTF-8.
pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub(crate) fn write_records<W: Write>(
    mut out: W,
    records: &[Map<String, Value>],
) -> Result<(), StoreError> {
    out.write_all(UTF8_BOM)?;

    let columns = column_union(records);
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(&columns)?;
    for record in records {
        writer.write_record(columns.iter().map(|c| cell_text(record.get(c))))?;
    }
    writer.flush()?;
    Ok(())
}

pub(crate) fn read_records<R: Read>(mut input: R) -> Result<Vec<Map<String, Value>>, StoreError> {
    let mut raw = Vec::new();
    input.read_to_end(&mut raw)?;
    let body = raw.strip_prefix(UTF8_BOM).unwrap_or(raw.as_slice());

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(body);
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|i| ColumnKind::of(rows.iter().map(|row| row.get(i).unwrap_or(""))))
        .collect();

    let records: Vec<Map<String, Value>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .zip(&kinds)
                .enumerate()
                .map(|(i, (name, kind))| (name.to_owned(), kind.cell(row.get(i).unwrap_or(""))))
                .collect()
        })
        .collect();
    Ok(records)
}

fn column_union(records: &[Map<String, Value>]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for key in records.iter().flat_map(Map::keys) {
        if !columns.iter().any(|c| c == key) {
            columns.push(key.clone());
        }
    }
    columns
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The type shared by every non-empty cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnKind {
    /// Narrowest kind that fits all non-empty cells. A column with no values
    /// at all is text, so its cells all come back null.
    fn of<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> Self {
        let mut values = cells.filter(|c| !c.is_empty()).peekable();
        if values.peek().is_none() {
            return ColumnKind::Text;
        }
        if values.clone().all(|c| c.parse::<i64>().is_ok()) {
            ColumnKind::Integer
        } else if values.clone().all(|c| parse_float(c).is_some()) {
            ColumnKind::Float
        } else if values.all(|c| parse_bool(c).is_some()) {
            ColumnKind::Boolean
        } else {
            ColumnKind::Text
        }
    }

    fn cell(self, cell: &str) -> Value {
        if cell.is_empty() {
            return Value::Null;
        }
        let typed = match self {
            ColumnKind::Integer => cell.parse::<i64>().ok().map(Value::from),
            ColumnKind::Float => parse_float(cell).map(Value::Number),
            ColumnKind::Boolean => parse_bool(cell).map(Value::Bool),
            ColumnKind::Text => None,
        };
        typed.unwrap_or_else(|| Value::String(cell.to_owned()))
    }
}

fn parse_float(cell: &str) -> Option<Number> {
    cell.parse::<f64>().ok().and_then(Number::from_f64)
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell {
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}
