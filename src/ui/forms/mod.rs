//! Form rendering

mod field_renderer;
mod verification_form;

pub use verification_form::draw as draw_verification;
