//! Sparse patches applied to every selected server in one batch

use serde_json::{Map, Value};
use thiserror::Error;

/// Application grouping change carried by a bulk patch.
///
/// `Clear` is a distinguished sentinel: it serializes as an explicit `null`
/// (unassign from any application), which is different from `Unchanged`
/// (field omitted from the request entirely).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AppAssignment {
    #[default]
    Unchanged,
    Clear,
    Assign(i64),
}

/// The fields a bulk update may touch. Only fields the user actually set
/// are included in the request body.
#[derive(Debug, Clone, Default)]
pub struct BulkPatch {
    pub server_type: Option<String>,
    pub shutdown_status: Option<String>,
    pub application: AppAssignment,
}

impl BulkPatch {
    pub fn is_empty(&self) -> bool {
        self.server_type.is_none()
            && self.shutdown_status.is_none()
            && self.application == AppAssignment::Unchanged
    }

    /// Build the `updates` object for `PUT /servers/bulk-update`
    pub fn to_updates(&self) -> Map<String, Value> {
        let mut updates = Map::new();
        if let Some(t) = &self.server_type {
            updates.insert("type".to_string(), Value::String(t.clone()));
        }
        if let Some(s) = &self.shutdown_status {
            updates.insert("shutdown_status".to_string(), Value::String(s.clone()));
        }
        match self.application {
            AppAssignment::Unchanged => {}
            AppAssignment::Clear => {
                updates.insert("application_id".to_string(), Value::Null);
            }
            AppAssignment::Assign(id) => {
                updates.insert("application_id".to_string(), Value::from(id));
            }
        }
        updates
    }
}

/// Errors raised before any bulk request is issued
#[derive(Debug, Error)]
pub enum BulkError {
    #[error("no servers selected")]
    NoSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_only_includes_set_fields() {
        let patch = BulkPatch {
            server_type: None,
            shutdown_status: Some("Offline".to_string()),
            application: AppAssignment::Unchanged,
        };
        let updates = patch.to_updates();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates["shutdown_status"], Value::from("Offline"));
    }

    #[test]
    fn test_clear_sentinel_serializes_as_null() {
        let patch = BulkPatch {
            application: AppAssignment::Clear,
            ..Default::default()
        };
        let updates = patch.to_updates();
        assert_eq!(updates.len(), 1);
        assert!(updates["application_id"].is_null());
    }

    #[test]
    fn test_assign_serializes_as_number() {
        let patch = BulkPatch {
            application: AppAssignment::Assign(4),
            ..Default::default()
        };
        assert_eq!(patch.to_updates()["application_id"], Value::from(4));
    }

    #[test]
    fn test_empty_patch_detected() {
        assert!(BulkPatch::default().is_empty());
        assert!(!BulkPatch {
            server_type: Some("http".to_string()),
            ..Default::default()
        }
        .is_empty());
    }
}
