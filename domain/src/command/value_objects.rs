//! Command text value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A validated, trimmed, non-empty command (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandText {
    content: String,
}

impl CommandText {
    /// Trim the raw text and reject it if nothing is left.
    pub fn try_new(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyCommand);
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    pub fn into_string(self) -> String {
        self.content
    }

    /// Length in characters (not bytes)
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

impl std::fmt::Display for CommandText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for CommandText {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<CommandText> for String {
    fn from(value: CommandText) -> Self {
        value.content
    }
}
