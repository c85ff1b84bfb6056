//! 流式传输错误类型。

use thiserror::Error;

use crate::internal::chunk_source::error::ChunkSourceError;

#[derive(Debug, Error)]
pub enum StreamError {
    /// 偏移不在 `[0, total_size)` 内；此时不会发起任何读取。
    #[error("偏移越界: offset={offset}, total_size={total_size}")]
    OutOfRange { offset: u64, total_size: u64 },

    #[error("读取分片失败 (offset={offset}): {source}")]
    Fetch {
        offset: u64,
        #[source]
        source: ChunkSourceError,
    },

    #[error("分片长度异常 (offset={offset}): 期望 {expected} 字节，实际 {actual} 字节")]
    UnexpectedChunkLength {
        offset: u64,
        expected: u64,
        actual: u64,
    },

    #[error("写入失败: {0}")]
    Write(#[from] std::io::Error),

    #[error("流式传输被取消")]
    Cancelled,

    #[error("分片大小必须大于 0")]
    InvalidChunkSize,

    #[error("传输任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
