//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the assessment domain.

mod errors;
mod ids;
mod likert;
mod locale;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::SessionId;
pub use likert::Likert;
pub use locale::Locale;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
