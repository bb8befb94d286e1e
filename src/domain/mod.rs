//! Domain value objects and types.
//!
//! Type-safe wrappers for Notion concepts. Identifiers are normalized at
//! construction so that nothing downstream has to care about the hyphenated
//! and compact forms Notion accepts interchangeably.

pub mod errors;
pub mod notion_id;

pub use errors::ValidationError;
pub use notion_id::NotionId;
