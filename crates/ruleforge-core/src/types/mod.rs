//! Type system for RuleForge
//!
//! This module contains the value type system including:
//! - Value types
//! - Declared attribute types

pub mod schema;
pub mod value;

pub use schema::{AttributeDefinition, DataType};
pub use value::Value;
