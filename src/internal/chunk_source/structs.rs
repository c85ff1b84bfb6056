pub mod file_chunk_source;
pub mod memory_chunk_source;
pub mod retry_chunk_source;
pub mod webdav_chunk_source;

// 重导出公共类型
pub use file_chunk_source::FileChunkSource;
pub use memory_chunk_source::MemoryChunkSource;
pub use retry_chunk_source::{RetryChunkSource, RetryConfig};
pub use webdav_chunk_source::WebdavChunkSource;
