//! NotionId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A Notion page, block or database identifier in compact form.
///
/// Notion hands out UUIDs with hyphens but accepts them without; every
/// identifier is stored with the separators stripped so that the compact
/// form is what reaches the API.
///
/// # Example
///
/// ```
/// use notion_mcp_server::domain::NotionId;
///
/// let id = NotionId::new("1a2b3c4d-0000-1111-2222-333344445555").unwrap();
/// assert_eq!(id.as_str(), "1a2b3c4d000011112222333344445555");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    /// Create a new NotionId, stripping hyphens and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if nothing is left after stripping.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ValidationError> {
        let compact: String = id.as_ref().trim().chars().filter(|c| *c != '-').collect();
        if compact.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(compact))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotionId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notion_id_strips_hyphens() {
        let id = NotionId::new("abc-def-123").unwrap();
        assert_eq!(id.as_str(), "abcdef123");
    }

    #[test]
    fn test_notion_id_compact_unchanged() {
        let id = NotionId::new("abcdef123").unwrap();
        assert_eq!(id.into_inner(), "abcdef123");
    }

    #[test]
    fn test_notion_id_rejects_empty() {
        assert_eq!(NotionId::new(""), Err(ValidationError::EmptyId));
        assert_eq!(NotionId::new("---"), Err(ValidationError::EmptyId));
        assert_eq!(NotionId::new("  "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_notion_id_display() {
        let id = NotionId::new("ab-cd").unwrap();
        assert_eq!(format!("{}", id), "abcd");
    }

    #[test]
    fn test_notion_id_deserialization() {
        let id: NotionId = serde_json::from_str("\"ab-cd\"").unwrap();
        assert_eq!(id.as_str(), "abcd");

        let result: Result<NotionId, _> = serde_json::from_str("\"-\"");
        assert!(result.is_err());
    }
}
