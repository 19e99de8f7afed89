//! CSV import reconciliation: parse, map columns, materialize, submit

pub mod csv;
pub mod mapping;
pub mod materialize;
pub mod schema;

use thiserror::Error;

use crate::core::EntityKind;

pub use csv::CsvTable;
pub use mapping::ColumnMapping;
pub use materialize::{materialize, Record};
pub use schema::{field_spec, field_specs, FieldSpec};

/// Errors raised while reconciling an import upload
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV file needs a header line and at least one data row")]
    EmptyFile,

    #[error("failed to parse CSV: {0}")]
    Parse(String),

    #[error("missing required field mappings: {}", labels.join(", "))]
    MissingRequiredFields { labels: Vec<String> },
}

/// One in-flight import: the parsed upload plus its editable column mapping.
///
/// Lives for the duration of the import flow. A rejected submit keeps the
/// session intact so the user can retry without re-uploading; cancel or a
/// successful submit drops it.
#[derive(Debug)]
pub struct ImportSession {
    kind: EntityKind,
    table: CsvTable,
    mapping: ColumnMapping,
}

impl ImportSession {
    /// Parse raw file text and auto-suggest a column mapping
    pub fn new(kind: EntityKind, text: &str) -> Result<Self, ImportError> {
        let table = CsvTable::parse(text)?;
        let mapping = ColumnMapping::auto_map(&table.headers, field_specs(kind));
        Ok(Self { kind, table, mapping })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    pub fn row_count(&self) -> usize {
        self.table.rows.len()
    }

    pub fn specs(&self) -> &'static [FieldSpec] {
        field_specs(self.kind)
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut ColumnMapping {
        &mut self.mapping
    }

    /// Validate the mapping and materialize the data rows into records
    pub fn confirm(&self) -> Result<Vec<Record>, ImportError> {
        self.mapping.confirm(self.specs())?;
        Ok(materialize(&self.table, &self.mapping, self.specs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_auto_maps_on_open() {
        let session =
            ImportSession::new(EntityKind::Server, "Name,Hostname,Port,Type\nweb1,h1,80,http\n")
                .unwrap();
        assert_eq!(session.mapping().len(), 4);
        assert_eq!(session.row_count(), 1);
    }

    #[test]
    fn test_session_confirm_enforces_required_fields() {
        let session = ImportSession::new(EntityKind::Server, "Name,Hostname\nweb1,h1\n").unwrap();
        let err = session.confirm().unwrap_err();
        match err {
            ImportError::MissingRequiredFields { labels } => {
                assert_eq!(labels, vec!["Port", "Type"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_session_confirm_materializes_records() {
        let mut session = ImportSession::new(
            EntityKind::Server,
            "Name,Host,Port,Type\nweb1,10.0.0.1,80,http\n",
        )
        .unwrap();
        session.mapping_mut().set("hostname", "Host".to_string());
        let records = session.confirm().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["port"], serde_json::Value::from(80));
    }

    #[test]
    fn test_application_session() {
        let session = ImportSession::new(
            EntityKind::Application,
            "name,description\nStorefront,Public shop\n",
        )
        .unwrap();
        let records = session.confirm().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["name"], serde_json::Value::from("Storefront"));
    }
}
