//! Importable field declarations per entity kind

use crate::core::EntityKind;

/// One importable field: logical name, human label, and whether a CSV
/// column must be mapped to it before an import can be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
}

const SERVER_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", label: "Name", required: true },
    FieldSpec { name: "hostname", label: "Hostname", required: true },
    FieldSpec { name: "port", label: "Port", required: true },
    FieldSpec { name: "type", label: "Type", required: true },
    FieldSpec { name: "owner_name", label: "Owner", required: false },
];

const APPLICATION_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: "name", label: "Name", required: true },
    FieldSpec { name: "description", label: "Description", required: false },
];

/// The importable fields for an entity kind, in prompt/display order
pub fn field_specs(kind: EntityKind) -> &'static [FieldSpec] {
    match kind {
        EntityKind::Server => SERVER_FIELDS,
        EntityKind::Application => APPLICATION_FIELDS,
    }
}

/// Look up a field by logical name
pub fn field_spec(kind: EntityKind, name: &str) -> Option<&'static FieldSpec> {
    field_specs(kind).iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_required_fields() {
        let required: Vec<&str> = field_specs(EntityKind::Server)
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name)
            .collect();
        assert_eq!(required, vec!["name", "hostname", "port", "type"]);
    }

    #[test]
    fn test_application_fields() {
        let fields = field_specs(EntityKind::Application);
        assert_eq!(fields.len(), 2);
        assert!(field_spec(EntityKind::Application, "description")
            .is_some_and(|f| !f.required));
    }

    #[test]
    fn test_unknown_field_lookup() {
        assert!(field_spec(EntityKind::Server, "rack").is_none());
    }
}
