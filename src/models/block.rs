//! Block model and its simplified views.

use super::rich_text::plain_text;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw Notion block record.
///
/// The record is kept verbatim so it can be handed back to callers
/// unchanged; accessors read the handful of fields the tools care about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Block(Map<String, Value>);

impl Block {
    /// Block identifier, empty when absent.
    pub fn id(&self) -> &str {
        self.0.get("id").and_then(Value::as_str).unwrap_or_default()
    }

    /// Type tag (`paragraph`, `to_do`, ...), if the record has one.
    pub fn block_type(&self) -> Option<&str> {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
    }

    /// Whether the server reports nested children.
    pub fn has_children(&self) -> bool {
        self.0
            .get("has_children")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Type-specific payload, stored under the key named by the type tag.
    pub fn payload(&self) -> Option<&Value> {
        self.block_type().and_then(|t| self.0.get(t))
    }

    /// Plain text of the payload's `rich_text`, if it has that field.
    pub fn text(&self) -> Option<String> {
        self.payload()
            .and_then(|payload| payload.get("rich_text"))
            .map(plain_text)
    }

    /// Source URL of an image payload; an uploaded `file` wins over `external`.
    pub fn image_url(&self) -> Option<String> {
        let payload = self.payload()?;
        let source = payload.get("file").or_else(|| payload.get("external"))?;
        Some(source["url"].as_str().unwrap_or_default().to_string())
    }
}

/// One page of a block-children listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BlockChildren {
    #[serde(default)]
    pub results: Vec<Block>,

    #[serde(default)]
    pub next_cursor: Option<String>,

    #[serde(default)]
    pub has_more: bool,
}

/// Flattened view of a block with type-specific metadata surfaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FormattedBlock {
    pub id: String,

    #[serde(rename = "type")]
    pub block_type: String,

    pub has_children: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Nested blocks, present only when the walk recursed and succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FormattedBlock>>,

    /// Why the nested fetch failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_error: Option<String>,
}

impl From<&Block> for FormattedBlock {
    fn from(block: &Block) -> Self {
        let block_type = block.block_type().unwrap_or("unknown").to_string();
        let mut formatted = FormattedBlock {
            id: block.id().to_string(),
            has_children: block.has_children(),
            text: block.text(),
            ..Default::default()
        };

        if let Some(payload) = block.payload() {
            match block_type.as_str() {
                "to_do" => formatted.checked = Some(payload["checked"].as_bool().unwrap_or(false)),
                "code" => {
                    formatted.language =
                        Some(payload["language"].as_str().unwrap_or_default().to_string())
                }
                "image" => formatted.url = block.image_url(),
                _ => {}
            }
        }

        formatted.block_type = block_type;
        formatted
    }
}

/// Readable rendering of a block, as produced by [`parse_blocks`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentEntry {
    #[serde(rename = "paragraph")]
    Paragraph { content: String },
    #[serde(rename = "heading_1")]
    Heading1 { content: String },
    #[serde(rename = "heading_2")]
    Heading2 { content: String },
    #[serde(rename = "heading_3")]
    Heading3 { content: String },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { content: String },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { content: String },
    #[serde(rename = "to_do")]
    ToDo { content: String, checked: bool },
    #[serde(rename = "code")]
    Code { content: String, language: String },
    #[serde(rename = "image")]
    Image { url: String },
    #[serde(rename = "divider")]
    Divider,
    #[serde(rename = "table")]
    Table { info: String },
}

const TABLE_INFO: &str = "Table content requires additional processing";

impl ContentEntry {
    /// Render a single block, or `None` for unsupported types and empty text.
    pub fn from_block(block: &Block) -> Option<Self> {
        let block_type = block.block_type()?;
        let payload = block.payload().cloned().unwrap_or(Value::Null);
        let content = || Some(plain_text(&payload["rich_text"])).filter(|text| !text.is_empty());

        let entry = match block_type {
            "paragraph" => ContentEntry::Paragraph { content: content()? },
            "heading_1" => ContentEntry::Heading1 { content: content()? },
            "heading_2" => ContentEntry::Heading2 { content: content()? },
            "heading_3" => ContentEntry::Heading3 { content: content()? },
            "bulleted_list_item" => ContentEntry::BulletedListItem { content: content()? },
            "numbered_list_item" => ContentEntry::NumberedListItem { content: content()? },
            "to_do" => ContentEntry::ToDo {
                content: content()?,
                checked: payload["checked"].as_bool().unwrap_or(false),
            },
            "code" => ContentEntry::Code {
                content: content()?,
                language: payload["language"].as_str().unwrap_or_default().to_string(),
            },
            "image" => ContentEntry::Image {
                url: block.image_url().filter(|url| !url.is_empty())?,
            },
            "divider" => ContentEntry::Divider,
            "table" => ContentEntry::Table {
                info: TABLE_INFO.to_string(),
            },
            _ => return None,
        };

        Some(entry)
    }
}

/// Render a list of blocks, dropping the ones with nothing to show.
pub fn parse_blocks(blocks: &[Block]) -> Vec<ContentEntry> {
    blocks.iter().filter_map(ContentEntry::from_block).collect()
}
