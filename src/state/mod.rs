//! Application state module

mod app_state;
pub mod forms;
mod session;
mod submission;

pub use app_state::*;
pub use session::*;
pub use submission::*;
