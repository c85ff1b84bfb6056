//! 内存分片源：对象内容整体已在内存中。

use async_trait::async_trait;
use bytes::Bytes;

use crate::internal::chunk_source::error::ChunkSourceError;
use crate::internal::chunk_source::traits::chunk_source::ChunkSource;

/// 以 [`Bytes`] 为底的分片源；切片零拷贝，克隆只增加引用计数。
#[derive(Debug, Clone, Default)]
pub struct MemoryChunkSource {
    data: Bytes,
}

impl MemoryChunkSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// 对象总字节数。
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

#[async_trait]
impl ChunkSource for MemoryChunkSource {
    async fn fetch(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<Bytes, ChunkSourceError> {
        let total = self.size();
        let end = offset
            .checked_add(size)
            .filter(|end| *end <= total)
            .ok_or_else(|| {
                ChunkSourceError::Fatal(format!(
                    "读取越界: offset={offset}, size={size}, total={total}"
                ))
            })?;

        Ok(self.data.slice(offset as usize..end as usize))
    }
}
