//! Rule name validation

use crate::error::{Result, SdkError};

/// Longest accepted rule name, in bytes
pub const MAX_RULE_NAME_LEN: usize = 128;

/// Check that `name` can identify a rule
///
/// Names are ASCII letters, digits, `_`, `-` and `.`, and may not start with
/// `.`. The same names are safe as file names in every store.
pub(crate) fn validate_rule_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("name must not be empty".to_string())
    } else if name.len() > MAX_RULE_NAME_LEN {
        Some(format!("name must be at most {} bytes", MAX_RULE_NAME_LEN))
    } else if name.starts_with('.') {
        Some("name must not start with '.'".to_string())
    } else {
        name.chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
            .map(|c| format!("invalid character {:?}", c))
    };

    match reason {
        Some(reason) => Err(SdkError::InvalidRuleName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
