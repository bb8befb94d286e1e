//! MCP tool handlers for the Notion server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.
//! Successful calls return the JSON result as text; failed calls return a tool
//! error whose text is the `{"error": "..."}` object.

use crate::error::NotionApiResult;
use crate::repositories::{BlockRepository, PageRepository, QueryRepository};
use crate::tools::{
    filters, parse_page_content, CreatePageParams, DatabaseTools, FilterOperator,
    PageContentTools, PageTools, PersonRole, QueryDatabaseParams, SearchParams, TaskTools,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// The Notion MCP server that exposes tools for pages, blocks, databases and search.
#[derive(Clone)]
pub struct NotionMcpServer {
    content_tools: Arc<PageContentTools>,
    page_tools: Arc<PageTools>,
    database_tools: Arc<DatabaseTools>,
    task_tools: Arc<TaskTools>,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for NotionMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "notion-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for Notion - query databases, read and edit pages, walk block content, search the workspace and manage a task database.".into()),
        }
    }
}

// Helper structs for tool parameters
#[derive(Debug, Deserialize, JsonSchema)]
struct QueryDatabasesParams {
    /// Notion filter object
    #[serde(default)]
    filter: Option<Value>,
    /// Sort descriptors
    #[serde(default)]
    sorts: Option<Vec<Value>>,
    #[serde(default)]
    start_cursor: Option<String>,
    /// Default: 100
    #[serde(default)]
    page_size: Option<u32>,
    /// Defaults to the configured database
    #[serde(default)]
    data_base_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PageIdParams {
    page_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PageContentOptimizedParams {
    page_id: String,
    /// Levels of nesting to load; 1 means top-level only (default: 1)
    #[serde(default)]
    max_depth: Option<u32>,
    /// Top-level blocks to fetch (default: 100)
    #[serde(default)]
    max_blocks: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PaginatedContentParams {
    page_id: String,
    /// Stop paginating once this many blocks were collected (default: 1000)
    #[serde(default)]
    max_blocks: Option<usize>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct UpdatePagePropertiesParams {
    page_id: String,
    properties: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CreatePageToolParams {
    parent_id: String,
    properties: Value,
    /// Blocks for the page body
    #[serde(default)]
    content: Option<Vec<Value>>,
    /// Whether parent_id is a database (default: true)
    #[serde(default)]
    is_database: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AppendPageContentParams {
    page_id: String,
    blocks: Vec<Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchNotionParams {
    query: String,
    /// Object type: "page" or "database"
    #[serde(default)]
    filter_type: Option<String>,
    #[serde(default)]
    sort: Option<Value>,
    /// Default: 100
    #[serde(default)]
    page_size: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ParsePageContentParams {
    /// A block children response containing "results"
    content_response: Value,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TaskIdParams {
    task_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FilteredTasksParams {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    owner_email: Option<String>,
    #[serde(default)]
    system: Option<String>,
    /// Default: 10
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct StatusFilterParams {
    /// e.g. "To Do", "Doing", "Done"
    status: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct PersonNameParams {
    /// Full or partial name
    person_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct TextContainsFilterParams {
    property_name: String,
    value: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct FindTasksByPersonParams {
    person_name: String,
    /// "owner", "team" or "any" (default: "any")
    #[serde(default)]
    role: Option<String>,
    /// Default: 20
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct ListPeopleParams {
    /// Pages to inspect (default: 50)
    #[serde(default)]
    limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct CombinedFilterParams {
    filters: Vec<Value>,
    /// "and" or "or" (default: "and")
    #[serde(default)]
    operator: Option<String>,
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

/// Render a tool outcome: JSON text on success, the error object otherwise.
fn to_tool_result<T: Serialize>(result: NotionApiResult<T>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => {
            let json_response = serde_json::to_string_pretty(&value).map_err(to_mcp_error)?;
            Ok(CallToolResult::success(vec![Content::text(json_response)]))
        }
        Err(e) => {
            tracing::error!("Tool call failed: {}", e);
            Ok(CallToolResult::error(vec![Content::text(
                e.to_value().to_string(),
            )]))
        }
    }
}

// Tool router implementation
#[tool_router]
impl NotionMcpServer {
    /// Create a new Notion MCP server.
    pub fn new(
        block_repo: Arc<dyn BlockRepository>,
        page_repo: Arc<dyn PageRepository>,
        query_repo: Arc<dyn QueryRepository>,
        default_database_id: Option<String>,
    ) -> Self {
        let content_tools = Arc::new(PageContentTools::new(block_repo.clone()));
        let page_tools = Arc::new(PageTools::new(page_repo.clone(), block_repo));
        let database_tools = Arc::new(DatabaseTools::new(query_repo, default_database_id));
        let task_tools = Arc::new(TaskTools::new(
            page_repo,
            content_tools.clone(),
            database_tools.clone(),
        ));

        Self {
            content_tools,
            page_tools,
            database_tools,
            task_tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Query a Notion database with optional filter, sorts, cursor and page size. Uses the configured database when data_base_id is omitted."
    )]
    async fn notion_query_databases(
        &self,
        params: Parameters<QueryDatabasesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .database_tools
            .query_database(QueryDatabaseParams {
                filter: params.filter,
                sorts: params.sorts,
                start_cursor: params.start_cursor,
                page_size: params.page_size.unwrap_or(100),
                database_id: params.data_base_id,
            })
            .await;

        to_tool_result(result)
    }

    #[tool(description = "Retrieve a Notion page and its properties by ID")]
    async fn get_notion_page(
        &self,
        params: Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(self.page_tools.get_page(&params.0.page_id).await)
    }

    #[tool(description = "Retrieve the raw first page of blocks of a Notion page")]
    async fn get_page_content(
        &self,
        params: Parameters<PageIdParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(self.content_tools.get_page_content(&params.0.page_id).await)
    }

    #[tool(
        description = "Retrieve page content as simplified blocks, loading nested children up to max_depth levels. Failed nested loads are reported per block in children_error."
    )]
    async fn get_page_content_optimized(
        &self,
        params: Parameters<PageContentOptimizedParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .content_tools
            .get_page_content_optimized(
                &params.page_id,
                params.max_depth.unwrap_or(1),
                params.max_blocks.unwrap_or(100),
            )
            .await;

        to_tool_result(result)
    }

    #[tool(
        description = "Retrieve all blocks of a large page by following pagination cursors, up to max_blocks (may overshoot by one page of 100)"
    )]
    async fn get_paginated_content(
        &self,
        params: Parameters<PaginatedContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .content_tools
            .get_paginated_content(&params.page_id, params.max_blocks.unwrap_or(1000))
            .await;

        to_tool_result(result)
    }

    #[tool(description = "Update the properties of a Notion page")]
    async fn update_page_properties(
        &self,
        params: Parameters<UpdatePagePropertiesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .page_tools
            .update_page_properties(&params.page_id, &params.properties)
            .await;

        to_tool_result(result)
    }

    #[tool(
        description = "Create a Notion page under a database (default) or another page, with optional block content"
    )]
    async fn create_page(
        &self,
        params: Parameters<CreatePageToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .page_tools
            .create_page(CreatePageParams {
                parent_id: params.parent_id,
                properties: params.properties,
                content: params.content,
                is_database: params.is_database.unwrap_or(true),
            })
            .await;

        to_tool_result(result)
    }

    #[tool(description = "Append blocks to the end of an existing Notion page")]
    async fn append_page_content(
        &self,
        params: Parameters<AppendPageContentParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .page_tools
            .append_page_content(&params.page_id, params.blocks)
            .await;

        to_tool_result(result)
    }

    #[tool(description = "Search Notion for pages or databases by title")]
    async fn search_notion(
        &self,
        params: Parameters<SearchNotionParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .database_tools
            .search(SearchParams {
                query: params.query,
                filter_type: params.filter_type,
                sort: params.sort,
                page_size: params.page_size.unwrap_or(100),
            })
            .await;

        to_tool_result(result)
    }

    #[tool(
        description = "Turn a block children response into readable entries (paragraphs, headings, lists, to-dos, code, images, dividers, tables)"
    )]
    async fn parse_page_content(
        &self,
        params: Parameters<ParsePageContentParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(parse_page_content(&params.0.content_response))
    }

    #[tool(
        description = "Get full details of a task: simplified properties plus two levels of page content"
    )]
    async fn get_task_details(
        &self,
        params: Parameters<TaskIdParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(self.task_tools.get_task_details(&params.0.task_id).await)
    }

    #[tool(
        description = "List the most recently updated tasks filtered by status, owner and system"
    )]
    async fn get_filtered_tasks(
        &self,
        params: Parameters<FilteredTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = self
            .task_tools
            .get_filtered_tasks(
                params.status.as_deref(),
                params.owner_email.as_deref(),
                params.system.as_deref(),
                params.limit.unwrap_or(10),
            )
            .await;

        to_tool_result(result)
    }

    #[tool(description = "Build a database filter matching a task status")]
    async fn create_status_filter(
        &self,
        params: Parameters<StatusFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(Ok(filters::status_filter(&params.0.status)))
    }

    #[tool(description = "Build a database filter matching tasks owned by a person")]
    async fn create_owner_filter_by_name(
        &self,
        params: Parameters<PersonNameParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(Ok(filters::owner_filter_by_name(&params.0.person_name)))
    }

    #[tool(description = "Build a database filter matching tasks where a person is on the team")]
    async fn create_team_member_filter(
        &self,
        params: Parameters<PersonNameParams>,
    ) -> Result<CallToolResult, McpError> {
        to_tool_result(Ok(filters::team_member_filter(&params.0.person_name)))
    }

    #[tool(description = "Build a database filter matching a text property that contains a value")]
    async fn create_text_contains_filter(
        &self,
        params: Parameters<TextContainsFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        to_tool_result(Ok(filters::text_contains_filter(
            &params.property_name,
            &params.value,
        )))
    }

    #[tool(
        description = "Find tasks associated with a person as owner, team member, or either (role: owner, team, any)"
    )]
    async fn find_tasks_by_person(
        &self,
        params: Parameters<FindTasksByPersonParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = async {
            let role = match params.role.as_deref() {
                Some(role) => role.parse::<PersonRole>()?,
                None => PersonRole::default(),
            };
            self.task_tools
                .find_tasks_by_person(&params.person_name, role, params.limit.unwrap_or(20))
                .await
        }
        .await;

        to_tool_result(result)
    }

    #[tool(description = "List every owner and team member found in the most recent tasks")]
    async fn list_people_in_database(
        &self,
        params: Parameters<ListPeopleParams>,
    ) -> Result<CallToolResult, McpError> {
        let limit = params.0.limit.unwrap_or(50);
        to_tool_result(self.task_tools.list_people_in_database(limit).await)
    }

    #[tool(description = "Combine several database filters with \"and\" or \"or\"")]
    async fn create_combined_filter(
        &self,
        params: Parameters<CombinedFilterParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let result = match params.operator.as_deref() {
            Some(operator) => operator.parse::<FilterOperator>(),
            None => Ok(FilterOperator::default()),
        }
        .map(|operator| filters::combined_filter(params.filters, operator));

        to_tool_result(result)
    }
}
