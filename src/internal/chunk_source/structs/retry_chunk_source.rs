//! 重试包装：在分片源外层对暂时性失败做固定间隔重试。
//!
//! 流式器本身从不重试；需要重试时把具体分片源包一层再交给流式器。

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::internal::chunk_source::error::ChunkSourceError;
use crate::internal::chunk_source::traits::chunk_source::ChunkSource;

/// 默认重试次数
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// 默认重试延迟（毫秒）
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// 暂时性失败的最大重试次数（不含首次读取）
    pub max_retries: usize,
    /// 重试延迟（毫秒）
    pub retry_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

/// 只重试 [`ChunkSourceError::Transient`]；不存在与不可恢复的错误立即返回。
#[derive(Debug, Clone)]
pub struct RetryChunkSource<S> {
    inner: S,
    config: RetryConfig,
}

impl<S> RetryChunkSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            config: RetryConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RetryConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置最大重试次数
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// 设置重试延迟（毫秒）
    pub fn retry_delay_ms(mut self, retry_delay_ms: u64) -> Self {
        self.config.retry_delay_ms = retry_delay_ms;
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S> ChunkSource for RetryChunkSource<S>
where
    S: ChunkSource,
{
    async fn fetch(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<Bytes, ChunkSourceError> {
        let mut attempt = 0usize;
        loop {
            match self.inner.fetch(offset, size).await {
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        offset,
                        size,
                        attempt,
                        error = %e,
                        "分片读取失败，准备重试"
                    );
                    tokio::time::sleep(Duration::from_millis(
                        self.config.retry_delay_ms,
                    ))
                    .await;
                }
                other => return other,
            }
        }
    }
}
