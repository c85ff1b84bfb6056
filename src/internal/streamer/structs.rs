pub mod chunk;
pub mod chunk_grid;
pub mod stream_config;
pub mod streamer;

// 重导出公共类型
pub use chunk::Chunk;
pub use chunk_grid::{ChunkCell, ChunkCells, ChunkGrid};
pub use stream_config::StreamConfig;
pub use streamer::Streamer;
