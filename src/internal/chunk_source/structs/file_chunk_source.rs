//! 本地文件分片源。

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::internal::chunk_source::error::ChunkSourceError;
use crate::internal::chunk_source::traits::chunk_source::ChunkSource;

#[derive(Debug, Clone)]
pub struct FileChunkSource {
    path: PathBuf,
}

impl FileChunkSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ChunkSource for FileChunkSource {
    async fn fetch(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<Bytes, ChunkSourceError> {
        let len = usize::try_from(size).map_err(|_| {
            ChunkSourceError::Fatal(format!("分片过大: {size}"))
        })?;

        // 每次读取单独打开句柄，并发读取之间不共享文件游标
        let mut file = File::open(&self.path).await?;
        file.seek(SeekFrom::Start(offset)).await?;

        let mut buf = vec![0u8; len];
        file.read_exact(&mut buf).await?;

        Ok(Bytes::from(buf))
    }
}
