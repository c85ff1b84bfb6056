//! 流式器
//!
//! 按分片网格顺序读取对象，把从任意偏移开始的后缀写入 sink。
//!
//! ## 行为
//!
//! - **顺序拉取**：每次调用严格按「读取一个分片 → 写入 sink → 读取下一个分片」进行，
//!   sink 写得慢时读取随之变慢，每个调用同时最多持有一个分片
//! - **无游标**：构造后不可变，每次调用只由 `offset` 决定，可以在多个任务中并发使用
//! - **可取消**：读取、写入、flush 都与调用方传入的 [`CancellationToken`] 竞争，
//!   取消后不再发起新的读取，已在途的读取结果直接丢弃
//! - **不重试**：第一次读取或写入失败即返回，重试由外层分片源包装负责

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use crate::internal::chunk_source::traits::chunk_source::ChunkSource;
use crate::internal::streamer::error::StreamError;

use super::chunk::Chunk;
use super::chunk_grid::{ChunkCell, ChunkGrid};
use super::stream_config::StreamConfig;

#[derive(Debug)]
pub struct Streamer<S> {
    source: S,
    grid: ChunkGrid,
}

impl<S> Streamer<S> {
    /// `chunk_size` 为 0 时返回 [`StreamError::InvalidChunkSize`]。
    pub fn new(
        source: S,
        chunk_size: u64,
        total_size: u64,
    ) -> Result<Self, StreamError> {
        Ok(Self {
            source,
            grid: ChunkGrid::new(chunk_size, total_size)?,
        })
    }

    pub fn with_config(
        source: S,
        config: &StreamConfig,
        total_size: u64,
    ) -> Result<Self, StreamError> {
        Self::new(source, config.chunk_size, total_size)
    }

    pub fn total_size(&self) -> u64 {
        self.grid.total_size()
    }

    pub fn chunk_size(&self) -> u64 {
        self.grid.chunk_size()
    }

    pub fn grid(&self) -> ChunkGrid {
        self.grid
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S> Streamer<S>
where
    S: ChunkSource,
{
    /// 把对象从 `offset` 到末尾的全部字节按顺序写入 `sink`。
    ///
    /// 成功时恰好写入 `total_size - offset` 字节并 flush。
    /// `offset >= total_size`（包括空对象）立即返回 [`StreamError::OutOfRange`]，不发起读取。
    pub async fn stream_at<W>(
        &self,
        cancel: &CancellationToken,
        offset: u64,
        sink: &mut W,
    ) -> Result<(), StreamError>
    where
        W: AsyncWrite + Unpin + Send + ?Sized,
    {
        let total_size = self.grid.total_size();
        if offset >= total_size {
            return Err(StreamError::OutOfRange { offset, total_size });
        }

        for cell in self.grid.cells_from(offset) {
            if cancel.is_cancelled() {
                return Err(StreamError::Cancelled);
            }

            let data = self.fetch_cell(cancel, cell).await?.skip(cell.skip).into_bytes();

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(StreamError::Cancelled),
                written = sink.write_all(&data) => written?,
            }
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(StreamError::Cancelled),
            flushed = sink.flush() => flushed.map_err(StreamError::Write),
        }
    }

    /// 读取一格并校验长度；长度不符会破坏后缀的连续性，直接视为失败。
    async fn fetch_cell(
        &self,
        cancel: &CancellationToken,
        cell: ChunkCell,
    ) -> Result<Chunk, StreamError> {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(StreamError::Cancelled),
            fetched = self.source.fetch(cell.start, cell.len) => fetched,
        };

        let data = fetched.map_err(|source| StreamError::Fetch {
            offset: cell.start,
            source,
        })?;

        if data.len() as u64 != cell.len {
            return Err(StreamError::UnexpectedChunkLength {
                offset: cell.start,
                expected: cell.len,
                actual: data.len() as u64,
            });
        }

        Ok(Chunk::new(cell.start, data))
    }
}
