//! Form domain layer
//!
//! Field store, batch validation and the field-level error map for the
//! verification form.

mod field;
mod form_state;
mod validation;

pub use field::{DocumentHandle, FieldKey, TextField};
pub use form_state::{Form, FormRow, FormSnapshot, VerificationForm};
pub use validation::{validate, FieldErrors};

#[cfg(test)]
pub use validation::FieldError;
