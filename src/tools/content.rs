//! Page content tools.
//!
//! Retrieval of block children in three flavours: the raw first page, a
//! depth-limited formatted tree, and a cursor-paginated flat list.

use crate::error::{NotionApiError, NotionApiResult};
use crate::models::{parse_blocks, Block, BlockChildren, ContentEntry, FormattedBlock};
use crate::repositories::BlockRepository;
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Page size used when descending into nested children.
pub const CHILD_PAGE_SIZE: u32 = 50;

/// Page size used by the paginator on every request.
pub const PAGINATION_PAGE_SIZE: u32 = 100;

const INVALID_CONTENT_RESPONSE: &str = "Formato de resposta inválido";

/// Formatted block tree returned by [`PageContentTools::get_page_content_optimized`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BlockTreeResponse {
    pub blocks: Vec<FormattedBlock>,
    pub count: usize,
    /// Copied from the top-level page only
    pub has_more: bool,
}

/// Raw blocks accumulated by [`PageContentTools::get_paginated_content`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PaginatedContentResponse {
    pub results: Vec<Block>,
    pub count: usize,
}

/// Readable rendering returned by [`parse_page_content`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParsedContentResponse {
    pub formatted_content: Vec<ContentEntry>,
}

/// Tools for reading page and block content.
pub struct PageContentTools {
    block_repo: Arc<dyn BlockRepository>,
}

impl PageContentTools {
    /// Create new content tools.
    ///
    /// # Arguments
    /// * `block_repo` - BlockRepository for block children access
    pub fn new(block_repo: Arc<dyn BlockRepository>) -> Self {
        Self { block_repo }
    }

    /// First page of a page's children, exactly as the API returned it.
    pub async fn get_page_content(&self, page_id: &str) -> NotionApiResult<Value> {
        self.block_repo.children(page_id, None, None).await
    }

    /// Formatted children of a page, recursing into nested blocks.
    ///
    /// Only the first `max_blocks` top-level children are fetched. Nested
    /// levels use a page size of [`CHILD_PAGE_SIZE`]; `max_depth = 1` never
    /// recurses. A failed nested fetch is recorded on the block in
    /// `children_error` and does not abort the walk.
    ///
    /// # Errors
    /// Returns the top-level fetch error, or `InvalidRequest` when
    /// `max_depth` is zero.
    pub async fn get_page_content_optimized(
        &self,
        page_id: &str,
        max_depth: u32,
        max_blocks: u32,
    ) -> NotionApiResult<BlockTreeResponse> {
        if max_depth == 0 {
            return Err(NotionApiError::InvalidRequest(
                "max_depth must be at least 1".to_string(),
            ));
        }

        tracing::info!(
            "Walking content of {} (max_depth={}, max_blocks={})",
            page_id,
            max_depth,
            max_blocks
        );
        self.walk(page_id, max_depth, max_blocks).await
    }

    fn walk<'a>(
        &'a self,
        block_id: &'a str,
        max_depth: u32,
        page_size: u32,
    ) -> BoxFuture<'a, NotionApiResult<BlockTreeResponse>> {
        async move {
            let response = self.block_repo.children(block_id, Some(page_size), None).await?;
            let page: BlockChildren = serde_json::from_value(response)?;

            let mut blocks = Vec::with_capacity(page.results.len());
            for block in &page.results {
                let mut formatted = FormattedBlock::from(block);

                if max_depth > 1 && block.has_children() {
                    match self.walk(block.id(), max_depth - 1, CHILD_PAGE_SIZE).await {
                        Ok(subtree) => formatted.children = Some(subtree.blocks),
                        Err(e) => {
                            tracing::warn!("Children of block {} unavailable: {}", block.id(), e);
                            formatted.children_error = Some(e.to_string());
                        }
                    }
                }

                blocks.push(formatted);
            }

            Ok(BlockTreeResponse {
                count: blocks.len(),
                blocks,
                has_more: page.has_more,
            })
        }
        .boxed()
    }

    /// All children of a page, following cursors until `max_blocks` is reached.
    ///
    /// The cap is checked between pages, so the result can exceed
    /// `max_blocks` by up to one page. At most `ceil(max_blocks / 100)`
    /// requests are issued; a page claiming more results without a cursor
    /// ends the loop.
    pub async fn get_paginated_content(
        &self,
        page_id: &str,
        max_blocks: usize,
    ) -> NotionApiResult<PaginatedContentResponse> {
        let max_requests = max_blocks.div_ceil(PAGINATION_PAGE_SIZE as usize);
        let mut results: Vec<Block> = Vec::new();
        let mut cursor: Option<String> = None;
        let mut requests = 0;

        while results.len() < max_blocks && requests < max_requests {
            let response = self
                .block_repo
                .children(page_id, Some(PAGINATION_PAGE_SIZE), cursor.as_deref())
                .await?;
            requests += 1;

            let page: BlockChildren = serde_json::from_value(response)?;
            results.extend(page.results);

            if !page.has_more {
                break;
            }

            match page.next_cursor.filter(|next| !next.is_empty()) {
                Some(next) => cursor = Some(next),
                None => {
                    tracing::debug!("has_more without next_cursor for {}; stopping", page_id);
                    break;
                }
            }
        }

        tracing::info!(
            "Fetched {} blocks of {} in {} requests",
            results.len(),
            page_id,
            requests
        );

        Ok(PaginatedContentResponse {
            count: results.len(),
            results,
        })
    }
}

/// Render a block-children response into readable entries.
///
/// # Errors
/// Returns `InvalidResponse("Formato de resposta inválido")` when the value
/// has no `results` list.
pub fn parse_page_content(content_response: &Value) -> NotionApiResult<ParsedContentResponse> {
    let invalid = || NotionApiError::InvalidResponse(INVALID_CONTENT_RESPONSE.to_string());

    let results = content_response.get("results").ok_or_else(invalid)?;
    let blocks: Vec<Block> = serde_json::from_value(results.clone()).map_err(|_| invalid())?;

    Ok(ParsedContentResponse {
        formatted_content: parse_blocks(&blocks),
    })
}
