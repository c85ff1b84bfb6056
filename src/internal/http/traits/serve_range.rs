use async_trait::async_trait;
use axum::http::{HeaderMap, Method};
use axum::response::Response;
use tokio_util::sync::CancellationToken;

use crate::internal::chunk_source::traits::chunk_source::ChunkSource;
use crate::internal::http::structs::range_handler::RangeHandler;

/// 可挂载到服务器上的对象处理能力，屏蔽具体的分片源类型。
#[async_trait]
pub trait ServeRange: Send + Sync {
    /// 对象总大小（字节）
    fn total_size(&self) -> u64;

    async fn serve_range(
        &self,
        method: &Method,
        headers: &HeaderMap,
        cancel: CancellationToken,
    ) -> Response;
}

#[async_trait]
impl<S> ServeRange for RangeHandler<S>
where
    S: ChunkSource + 'static,
{
    fn total_size(&self) -> u64 {
        RangeHandler::total_size(self)
    }

    async fn serve_range(
        &self,
        method: &Method,
        headers: &HeaderMap,
        cancel: CancellationToken,
    ) -> Response {
        self.serve_with_cancel(method, headers, cancel).await
    }
}
