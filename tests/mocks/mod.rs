//! In-memory repositories with call tracking for tool tests.

mod mock_block_repository;
mod mock_page_repository;
mod mock_query_repository;

#[allow(unused_imports)]
pub use mock_block_repository::MockBlockRepository;
#[allow(unused_imports)]
pub use mock_page_repository::MockPageRepository;
#[allow(unused_imports)]
pub use mock_query_repository::MockQueryRepository;
