//! RuleEngine - Main API for managing and evaluating rules
//!
//! # Architecture
//!
//! The module is organized into:
//! - `engine`: Core RuleEngine implementation
//! - `names`: Rule name rules
//! - `tests`: Unit tests (test-only)

mod engine;
mod names;

pub use engine::RuleEngine;
pub use names::MAX_RULE_NAME_LEN;

// Tests module (only compiled in test mode)
#[cfg(test)]
mod tests;
