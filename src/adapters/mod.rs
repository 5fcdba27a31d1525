//! Adapters - Implementations of the ports and the HTTP surface.
//!
//! - `http` - axum routes over the application handlers
//! - `narrative` - `NarrativeGenerator` implementations
//! - `storage` - `AssessmentSessionStore` implementations

pub mod http;
pub mod narrative;
pub mod storage;
