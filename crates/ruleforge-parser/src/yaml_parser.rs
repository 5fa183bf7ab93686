//! YAML Parser
//!
//! Field accessors over `serde_yaml::Value` that report missing or mistyped
//! fields by name.

use crate::error::{ParseError, Result};
use chrono::{DateTime, Utc};
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Get a required field
    pub fn get_field<'a>(yaml: &'a YamlValue, field: &str) -> Result<&'a YamlValue> {
        yaml.get(field).ok_or_else(|| ParseError::MissingField {
            field: field.to_string(),
        })
    }

    /// Get a required string field
    pub fn get_string(yaml: &YamlValue, field: &str) -> Result<String> {
        Self::get_field(yaml, field)?
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ParseError::InvalidValue {
                field: field.to_string(),
                message: "expected a string".to_string(),
            })
    }

    /// Get a required unsigned integer field
    pub fn get_u64(yaml: &YamlValue, field: &str) -> Result<u64> {
        Self::get_field(yaml, field)?
            .as_u64()
            .ok_or_else(|| ParseError::InvalidValue {
                field: field.to_string(),
                message: "expected a non-negative integer".to_string(),
            })
    }

    /// Get a required RFC 3339 timestamp field
    pub fn get_timestamp(yaml: &YamlValue, field: &str) -> Result<DateTime<Utc>> {
        let raw = Self::get_string(yaml, field)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| ParseError::InvalidValue {
                field: field.to_string(),
                message: e.to_string(),
            })
    }
}
