//! Batch validation of a form snapshot

use super::field::FieldKey;
use super::form_state::FormSnapshot;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// `CHE-` followed by three groups of three ASCII digits
static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CHE-[0-9]{3}\.[0-9]{3}\.[0-9]{3}$").expect("identifier pattern is valid")
});

static POSTAL_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}$").expect("postal code pattern is valid"));

/// A validation failure attributable to exactly one field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("name required")]
    NameRequired,
    #[error("identifier required")]
    IdentifierRequired,
    #[error("invalid identifier format")]
    InvalidIdentifierFormat,
    #[error("address required")]
    AddressRequired,
    #[error("postal code required")]
    PostalCodeRequired,
    #[error("invalid postal code format")]
    InvalidPostalCodeFormat,
    #[error("proof document required")]
    DocumentRequired,
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Current field-level errors, keyed by field. A missing key means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldKey, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: FieldKey) -> Option<FieldError> {
        self.0.get(&key).copied()
    }

    #[cfg(test)]
    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Message to show next to the field, if it is invalid
    pub fn message(&self, key: FieldKey) -> Option<String> {
        self.get(key).map(|e| e.to_string())
    }

    pub fn insert(&mut self, key: FieldKey, error: FieldError) {
        self.0.insert(key, error);
    }

    /// Remove a single key, leaving every other entry untouched
    pub fn clear_field(&mut self, key: FieldKey) -> Option<FieldError> {
        self.0.remove(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, FieldError)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(FieldKey, FieldError)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FieldKey, FieldError)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Check every field of the snapshot and collect all failures.
///
/// Rules are independent; emptiness is judged on the trimmed value and
/// takes precedence over the format check, which runs on the raw value.
pub fn validate(snapshot: &FormSnapshot) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if is_blank(&snapshot.structure_name) {
        errors.insert(FieldKey::StructureName, FieldError::NameRequired);
    }

    if is_blank(&snapshot.business_identifier) {
        errors.insert(FieldKey::BusinessIdentifier, FieldError::IdentifierRequired);
    } else if !IDENTIFIER_PATTERN.is_match(&snapshot.business_identifier) {
        errors.insert(
            FieldKey::BusinessIdentifier,
            FieldError::InvalidIdentifierFormat,
        );
    }

    if is_blank(&snapshot.street_address) {
        errors.insert(FieldKey::StreetAddress, FieldError::AddressRequired);
    }

    if is_blank(&snapshot.postal_code) {
        errors.insert(FieldKey::PostalCode, FieldError::PostalCodeRequired);
    } else if !POSTAL_CODE_PATTERN.is_match(&snapshot.postal_code) {
        errors.insert(FieldKey::PostalCode, FieldError::InvalidPostalCodeFormat);
    }

    if snapshot.document_proof.is_none() {
        errors.insert(FieldKey::DocumentProof, FieldError::DocumentRequired);
    }

    errors
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
