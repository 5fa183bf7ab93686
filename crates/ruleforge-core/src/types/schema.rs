//! Declared attribute types
//!
//! An attribute catalog declares the type each attribute is expected to hold,
//! which lets rules be checked before they are stored.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Data type of a value or declared attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Boolean type
    Boolean,

    /// Integer type
    Integer,

    /// Floating-point type
    Float,

    /// String type
    String,
}

impl DataType {
    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::String => "string",
        }
    }

    /// Returns true if this is a numeric type
    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Integer | DataType::Float)
    }

    /// Whether values of the two types can be compared.
    ///
    /// Identical types are comparable; integer and float widen to each other.
    pub fn is_comparable_with(&self, other: DataType) -> bool {
        *self == other || (self.is_numeric() && other.is_numeric())
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for DataType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Ok(DataType::Boolean),
            "integer" | "int" => Ok(DataType::Integer),
            "float" | "double" | "number" => Ok(DataType::Float),
            "string" | "str" | "text" => Ok(DataType::String),
            other => Err(CoreError::UnknownDataType(other.to_string())),
        }
    }
}

/// A declared attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,

    /// Declared type
    pub data_type: DataType,
}

impl AttributeDefinition {
    /// Create a new attribute definition
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}
