//! Data models for Notion entities.
//!
//! Notion records are open-ended JSON; the types here keep the raw record
//! intact and expose total accessors that fall back to defaults instead of
//! failing on missing or oddly shaped fields.

pub mod block;
pub mod property;
pub mod rich_text;

pub use block::{parse_blocks, Block, BlockChildren, ContentEntry, FormattedBlock};
pub use rich_text::plain_text;
