//! Verification backend seam

mod client;
mod dispatch;
mod traits;

pub use client::{SimulatedVerificationService, DEFAULT_LATENCY};
pub use dispatch::{dispatch, Completion, DEFAULT_TIMEOUT};
pub use traits::VerificationService;

#[cfg(test)]
pub use traits::MockVerificationService;
