//! Mapping of schema fields to CSV column headers

use std::collections::HashMap;

use super::schema::FieldSpec;
use super::ImportError;

/// The association from logical field names to CSV headers.
///
/// Starts auto-populated wherever a header's case-insensitive, trimmed text
/// exactly equals a field name; every entry can be overridden or unset by
/// the user before confirmation.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    assignments: HashMap<&'static str, String>,
}

fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

impl ColumnMapping {
    /// Suggest an initial mapping. Headers are visited in order; each header
    /// pre-fills at most one field, and the first field match wins.
    pub fn auto_map(headers: &[String], specs: &'static [FieldSpec]) -> Self {
        let mut mapping = Self::default();
        for header in headers {
            let normalized = normalize(header);
            for spec in specs {
                if mapping.assignments.contains_key(spec.name) {
                    continue;
                }
                if normalized == spec.name {
                    mapping.assignments.insert(spec.name, header.clone());
                    break;
                }
            }
        }
        mapping
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.assignments.get(field).map(|h| h.as_str())
    }

    /// Assign a header to a field, replacing any previous choice
    pub fn set(&mut self, field: &'static str, header: String) {
        self.assignments.insert(field, header);
    }

    pub fn unset(&mut self, field: &str) {
        self.assignments.remove(field);
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Validate that every required field has a non-empty header assigned.
    /// Fails with the labels of *all* missing fields so they can be reported
    /// at once.
    pub fn confirm(&self, specs: &'static [FieldSpec]) -> Result<(), ImportError> {
        let missing: Vec<String> = specs
            .iter()
            .filter(|spec| spec.required)
            .filter(|spec| self.get(spec.name).map_or(true, |h| h.trim().is_empty()))
            .map(|spec| spec.label.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ImportError::MissingRequiredFields { labels: missing })
        }
    }
}
