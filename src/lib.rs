//! LifeCraft Enneagram - Multi-stage personality assessment engine
//!
//! Classifies respondents into one of the nine Enneagram types through a
//! screener, forced-choice discriminators, an instinct questionnaire, and
//! free-text reflections, then composes wing, instinct, and confidence into
//! a single result.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
