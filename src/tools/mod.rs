//! MCP tools for interacting with Notion.
//!
//! This module provides five categories of tools:
//! - **Content**: Block children, the depth-limited tree walk and pagination
//! - **Pages**: Read, update, create and append to pages
//! - **Databases**: Database queries and workspace search
//! - **Filters**: Builders for database filter objects
//! - **Tasks**: Task-database helpers built on the above

pub mod content;
pub mod databases;
pub mod filters;
pub mod pages;
pub mod tasks;

pub use content::{
    parse_page_content, BlockTreeResponse, PageContentTools, PaginatedContentResponse,
    ParsedContentResponse,
};
pub use databases::{DatabaseTools, QueryDatabaseParams, SearchParams};
pub use filters::FilterOperator;
pub use pages::{CreatePageParams, PageTools};
pub use tasks::{
    FilteredTasksResponse, PeopleResponse, PersonEntry, PersonRole, PersonTasksResponse,
    TaskDetailsResponse, TaskSummary, TaskTools,
};
