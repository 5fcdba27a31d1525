//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `enneagram` - Item bank, scorers, discriminator selection, orchestration

pub mod enneagram;
pub mod foundation;
