//! Form field value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fields that take part in validation.
///
/// This is a closed set: the fixed `city` value is not editable and never
/// carries an error, so it has no key here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    StructureName,
    BusinessIdentifier,
    StreetAddress,
    PostalCode,
    DocumentProof,
}

impl FieldKey {
    #[cfg(test)]
    pub const ALL: [FieldKey; 5] = [
        FieldKey::StructureName,
        FieldKey::BusinessIdentifier,
        FieldKey::StreetAddress,
        FieldKey::PostalCode,
        FieldKey::DocumentProof,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StructureName => "structureName",
            Self::BusinessIdentifier => "businessIdentifier",
            Self::StreetAddress => "streetAddress",
            Self::PostalCode => "postalCode",
            Self::DocumentProof => "documentProof",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Free-text fields the user can type into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    StructureName,
    BusinessIdentifier,
    StreetAddress,
    PostalCode,
}

impl TextField {
    #[cfg(test)]
    pub const ALL: [TextField; 4] = [
        TextField::StructureName,
        TextField::BusinessIdentifier,
        TextField::StreetAddress,
        TextField::PostalCode,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::StructureName => "Structure name",
            Self::BusinessIdentifier => "Business identifier (IDE)",
            Self::StreetAddress => "Street and number",
            Self::PostalCode => "Postal code",
        }
    }

    /// Hint shown while the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::StructureName => "Name of your establishment",
            Self::BusinessIdentifier => "CHE-XXX.XXX.XXX",
            Self::StreetAddress => "Full address",
            Self::PostalCode => "XXXX",
        }
    }
}

impl From<TextField> for FieldKey {
    fn from(field: TextField) -> Self {
        match field {
            TextField::StructureName => FieldKey::StructureName,
            TextField::BusinessIdentifier => FieldKey::BusinessIdentifier,
            TextField::StreetAddress => FieldKey::StreetAddress,
            TextField::PostalCode => FieldKey::PostalCode,
        }
    }
}

/// Reference to an attached supporting document.
///
/// Only the attachment adapter creates these; the form only cares whether
/// one is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHandle {
    /// Display name (usually the file name)
    pub name: String,
    /// Opaque content locator, e.g. a `file://` URI
    pub locator: String,
}

impl DocumentHandle {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fields_map_to_distinct_keys() {
        let keys: Vec<FieldKey> = TextField::ALL.iter().map(|f| FieldKey::from(*f)).collect();
        assert_eq!(
            keys,
            vec![
                FieldKey::StructureName,
                FieldKey::BusinessIdentifier,
                FieldKey::StreetAddress,
                FieldKey::PostalCode,
            ]
        );
        assert!(!keys.contains(&FieldKey::DocumentProof));
    }

    #[test]
    fn test_field_key_serializes_as_camel_case() {
        let json = serde_json::to_string(&FieldKey::BusinessIdentifier).unwrap();
        assert_eq!(json, "\"businessIdentifier\"");
        assert_eq!(FieldKey::DocumentProof.to_string(), "documentProof");
    }

    #[test]
    fn test_placeholder_shows_identifier_pattern() {
        assert_eq!(TextField::BusinessIdentifier.placeholder(), "CHE-XXX.XXX.XXX");
        assert_eq!(TextField::PostalCode.placeholder(), "XXXX");
    }
}
