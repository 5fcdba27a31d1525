//! Storage Adapters
//!
//! Implementations of the `AssessmentSessionStore` port.
//!
//! - **InMemorySessionStore** - Process-local sessions (development and tests)

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
