//! Turning mapped CSV rows into entity-shaped records

use serde_json::{Map, Value};

use super::csv::CsvTable;
use super::mapping::ColumnMapping;
use super::schema::FieldSpec;

/// A flat entity-shaped record ready for the import endpoint
pub type Record = Map<String, Value>;

/// Coerce a raw value for fields with non-string semantics. `port` parses
/// to an integer; a failed parse materializes the literal string "NaN"
/// (preserved legacy behavior, visible to the storage service).
fn coerce(field: &str, value: &str) -> Value {
    if field == "port" {
        match value.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String("NaN".to_string()),
        }
    } else {
        Value::String(value.to_string())
    }
}

/// Apply a confirmed mapping to every data row.
///
/// For each row, every mapped field reads the value at its header's index
/// (first occurrence for duplicate headers, empty string when the row is
/// short). Rows whose mapped values are all empty are dropped; fields
/// without a column mapping are absent from the record, not null-filled.
pub fn materialize(
    table: &CsvTable,
    mapping: &ColumnMapping,
    specs: &'static [FieldSpec],
) -> Vec<Record> {
    let mapped: Vec<(&'static str, usize)> = specs
        .iter()
        .filter_map(|spec| {
            let header = mapping.get(spec.name)?;
            let idx = table.header_index(header)?;
            Some((spec.name, idx))
        })
        .collect();

    let mut records = Vec::new();
    for row in &table.rows {
        let values: Vec<(&'static str, &str)> = mapped
            .iter()
            .map(|&(name, idx)| (name, row.get(idx).map(String::as_str).unwrap_or("")))
            .collect();

        if values.iter().all(|(_, v)| v.is_empty()) {
            continue;
        }

        let mut record = Record::new();
        for (name, value) in values {
            record.insert(name.to_string(), coerce(name, value));
        }
        records.push(record);
    }
    records
}
