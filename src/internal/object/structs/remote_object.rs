use crate::internal::chunk_source::structs::retry_chunk_source::{
    RetryChunkSource, RetryConfig,
};
use crate::internal::chunk_source::structs::webdav_chunk_source::WebdavChunkSource;
use crate::internal::http::structs::range_handler::RangeHandler;
use crate::internal::object::error::ResolveError;
use crate::internal::streamer::structs::stream_config::StreamConfig;
use crate::internal::streamer::structs::streamer::Streamer;

use super::object_descriptor::ObjectDescriptor;

/// 已解析的远程对象：描述 + 绑定到该对象 URL 的分片源。
#[derive(Debug, Clone)]
pub struct RemoteObject {
    pub descriptor: ObjectDescriptor,
    pub source: WebdavChunkSource,
}

impl RemoteObject {
    pub fn new(descriptor: ObjectDescriptor, source: WebdavChunkSource) -> Self {
        Self { descriptor, source }
    }

    pub fn size(&self) -> u64 {
        self.descriptor.size
    }

    /// 组装不带重试的处理器
    pub fn into_handler(
        self,
        config: &StreamConfig,
    ) -> Result<RangeHandler<WebdavChunkSource>, ResolveError> {
        let Self { descriptor, source } = self;
        let streamer = Streamer::with_config(source, config, descriptor.size)?;
        Ok(RangeHandler::from_descriptor(streamer, &descriptor)
            .with_pipe_capacity(config.pipe_capacity))
    }

    /// 组装在分片源外层包了一层瞬时错误重试的处理器
    pub fn into_retrying_handler(
        self,
        config: &StreamConfig,
        retry: RetryConfig,
    ) -> Result<RangeHandler<RetryChunkSource<WebdavChunkSource>>, ResolveError>
    {
        let Self { descriptor, source } = self;
        let source = RetryChunkSource::new(source).with_config(retry);
        let streamer = Streamer::with_config(source, config, descriptor.size)?;
        Ok(RangeHandler::from_descriptor(streamer, &descriptor)
            .with_pipe_capacity(config.pipe_capacity))
    }
}
