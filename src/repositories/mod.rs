mod notion_block_repository;
mod notion_page_repository;
mod notion_query_repository;
mod traits;

pub use notion_block_repository::NotionBlockRepository;
pub use notion_page_repository::NotionPageRepository;
pub use notion_query_repository::NotionQueryRepository;
pub use traits::{BlockRepository, PageRepository, QueryRepository};
