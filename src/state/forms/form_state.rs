//! Form state management for the verification form

use super::field::{DocumentHandle, FieldKey, TextField};
use super::validation::FieldErrors;
use serde::{Deserialize, Serialize};

/// The full set of field values at a point in time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSnapshot {
    pub structure_name: String,
    pub business_identifier: String,
    pub street_address: String,
    pub postal_code: String,
    /// Fixed by the deployment, shown read-only
    pub city: String,
    pub document_proof: Option<DocumentHandle>,
}

impl FormSnapshot {
    /// Empty snapshot located in `city`
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::StructureName => &self.structure_name,
            TextField::BusinessIdentifier => &self.business_identifier,
            TextField::StreetAddress => &self.street_address,
            TextField::PostalCode => &self.postal_code,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::StructureName => &mut self.structure_name,
            TextField::BusinessIdentifier => &mut self.business_identifier,
            TextField::StreetAddress => &mut self.street_address,
            TextField::PostalCode => &mut self.postal_code,
        }
    }
}

/// Trait for common form focus operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Focusable rows of the verification form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Text(TextField),
    Document,
    HelpLink,
    Submit,
}

impl FormRow {
    pub const ALL: [FormRow; 7] = [
        FormRow::Text(TextField::StructureName),
        FormRow::Text(TextField::BusinessIdentifier),
        FormRow::Text(TextField::StreetAddress),
        FormRow::Text(TextField::PostalCode),
        FormRow::Document,
        FormRow::HelpLink,
        FormRow::Submit,
    ];
}

/// Field store plus the error state derived from the last submit attempt
#[derive(Debug, Clone)]
pub struct VerificationForm {
    snapshot: FormSnapshot,
    errors: FieldErrors,
    pub active_field_index: usize,
}

impl VerificationForm {
    pub fn new(snapshot: FormSnapshot) -> Self {
        Self {
            snapshot,
            errors: FieldErrors::new(),
            active_field_index: 0,
        }
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn value(&self, field: TextField) -> &str {
        self.snapshot.text(field)
    }

    pub fn document(&self) -> Option<&DocumentHandle> {
        self.snapshot.document_proof.as_ref()
    }

    /// Overwrite one text field and clear that field's error, if any.
    /// Other fields are never re-validated here.
    pub fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        *self.snapshot.text_mut(field) = value.into();
        if self.errors.clear_field(field.into()).is_some() {
            tracing::debug!("cleared error on {}", FieldKey::from(field));
        }
    }

    /// Attach a document and clear the document error, if any
    pub fn attach_document(&mut self, handle: DocumentHandle) {
        tracing::debug!("attached document {}", handle.name);
        self.snapshot.document_proof = Some(handle);
        self.errors.clear_field(FieldKey::DocumentProof);
    }

    /// Replace the whole error map with the outcome of a submit attempt
    pub(crate) fn replace_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn active_row(&self) -> FormRow {
        FormRow::ALL[self.active_field_index.min(FormRow::ALL.len() - 1)]
    }
}

impl Form for VerificationForm {
    fn field_count(&self) -> usize {
        FormRow::ALL.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(FormRow::ALL.len() - 1);
    }
}
