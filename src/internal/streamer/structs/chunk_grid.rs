//! 分片网格：按固定分片大小切分对象，只有最后一格可能更短。

use crate::internal::streamer::error::StreamError;

/// 网格中的一格：起始偏移、实际长度，以及首格需要丢弃的前缀字节数。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkCell {
    pub start: u64,
    pub len: u64,
    pub skip: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkGrid {
    chunk_size: u64,
    total_size: u64,
}

impl ChunkGrid {
    pub fn new(chunk_size: u64, total_size: u64) -> Result<Self, StreamError> {
        if chunk_size == 0 {
            return Err(StreamError::InvalidChunkSize);
        }
        Ok(Self {
            chunk_size,
            total_size,
        })
    }

    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// 包含 `offset` 的网格起点。
    pub fn cell_start(&self, offset: u64) -> u64 {
        offset / self.chunk_size * self.chunk_size
    }

    /// 网格总格数（对象为空时为 0）。
    pub fn cell_count(&self) -> u64 {
        self.total_size.div_ceil(self.chunk_size)
    }

    /// 从包含 `offset` 的格开始依次产出到对象末尾；`offset >= total_size` 时为空。
    pub fn cells_from(self, offset: u64) -> ChunkCells {
        let (next_start, skip) = if offset < self.total_size {
            let start = self.cell_start(offset);
            (start, offset - start)
        } else {
            (self.total_size, 0)
        };
        ChunkCells {
            grid: self,
            next_start,
            skip,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChunkCells {
    grid: ChunkGrid,
    next_start: u64,
    skip: u64,
}

impl Iterator for ChunkCells {
    type Item = ChunkCell;

    fn next(&mut self) -> Option<ChunkCell> {
        let total = self.grid.total_size;
        if self.next_start >= total {
            return None;
        }

        let start = self.next_start;
        let cell = ChunkCell {
            start,
            len: self.grid.chunk_size.min(total - start),
            skip: self.skip,
        };
        self.next_start = start.saturating_add(self.grid.chunk_size);
        self.skip = 0;
        Some(cell)
    }
}
