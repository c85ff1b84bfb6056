//! 分片源 trait：流式器与具体来源之间唯一的接缝。

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::internal::chunk_source::error::ChunkSourceError;

/// 读取远程对象的一段字节。
///
/// 源对象引用（URL、本地路径……）在构造实现时绑定，本 trait 只关心偏移与长度。
///
/// 实现必须支持并发调用：同一个对象经常同时被多个 Range 请求读取
/// （例如播放器拖动进度条），流式器不会假设自己独占分片源。
#[async_trait]
pub trait ChunkSource: Send + Sync {
    /// 读取 `[offset, offset + size)`，返回恰好 `size` 字节。
    ///
    /// 调用方保证 `offset + size` 不超过对象总大小；
    /// 末尾分片的 `size` 可能小于配置的分片大小，实现必须支持。
    async fn fetch(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<Bytes, ChunkSourceError>;
}

#[async_trait]
impl<T> ChunkSource for Arc<T>
where
    T: ChunkSource + ?Sized,
{
    async fn fetch(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<Bytes, ChunkSourceError> {
        (**self).fetch(offset, size).await
    }
}

/// 类型擦除后的共享分片源，用于把不同来源的对象挂到同一个服务上。
pub type SharedChunkSource = Arc<dyn ChunkSource>;
