//! 分片源领域模块：按 `[offset, offset + size)` 读取固定大小远程对象的一段字节。
//!
//! 流式器只依赖 [`traits::chunk_source::ChunkSource`]，具体来源（WebDAV、本地文件、内存）
//! 以适配器形式放在 `structs` 中。对外导出以 [`crate::chunk_source`] 为准。

pub mod error;
pub mod structs;
pub mod traits;
