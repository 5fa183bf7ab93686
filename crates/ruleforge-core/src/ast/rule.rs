//! Rule definitions

use super::expression::Expression;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, versioned rule
///
/// `ast` is always the parse of `source_text`; the two are only ever replaced
/// together through [`Rule::revise`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique rule name
    pub name: String,

    /// Rule text as written (or rendered, for combined rules)
    pub source_text: String,

    /// Parsed expression
    pub ast: Expression,

    /// Starts at 1, incremented on every modification
    pub version: u64,

    /// Creation time
    pub created_at: DateTime<Utc>,

    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Rule {
    /// Version assigned to a newly created rule
    pub const INITIAL_VERSION: u64 = 1;

    /// Create a new rule at the initial version
    pub fn new(name: impl Into<String>, source_text: impl Into<String>, ast: Expression) -> Self {
        let now = Utc::now();
        Rule {
            name: name.into(),
            source_text: source_text.into(),
            ast,
            version: Self::INITIAL_VERSION,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the next version of this rule with new text and tree.
    ///
    /// `self` is left untouched.
    pub fn revise(&self, source_text: impl Into<String>, ast: Expression) -> Self {
        Rule {
            name: self.name.clone(),
            source_text: source_text.into(),
            ast,
            version: self.version + 1,
            created_at: self.created_at,
            updated_at: Utc::now(),
        }
    }
}
