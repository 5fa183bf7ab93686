//! Attribute environment
//!
//! The name to value mapping a rule is evaluated against.

mod attributes;

pub use attributes::Attributes;
