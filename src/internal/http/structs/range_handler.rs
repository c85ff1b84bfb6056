//! Range 请求处理器
//!
//! 把一个只读请求（`GET` / `HEAD`）适配为一次流式器调用加上响应元数据。
//!
//! ## 处理流程
//!
//! 解析 Range → 校验 → 生成响应头 → 传输 body → 完成 / 中断
//!
//! - **无 Range**：200，完整内容
//! - **单段 Range**：206，`Content-Range: bytes start-end/total`
//! - **起点越界**：416，`Content-Range: bytes */total`，不读取任何分片
//! - **无法识别的 Range**（多段、格式错误）：回退为 200 完整内容
//!
//! 响应头一旦发出就无法撤回：第一个 body 字节之前的失败会换成错误状态码，
//! 之后的失败只能表现为提前结束的 body。

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{ACCEPT_RANGES, ALLOW, CONTENT_RANGE, RANGE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, FixedOffset};
use tokio_util::sync::CancellationToken;

use crate::internal::chunk_source::error::ChunkSourceError;
use crate::internal::chunk_source::traits::chunk_source::ChunkSource;
use crate::internal::http::functions::stream_body::{OpenBodyParams, open_body};
use crate::internal::object::structs::object_descriptor::ObjectDescriptor;
use crate::internal::streamer::error::StreamError;
use crate::internal::streamer::structs::stream_config::DEFAULT_PIPE_CAPACITY;
use crate::internal::streamer::structs::streamer::Streamer;

use super::range_spec::{ByteRange, RangeNotSatisfiable, RangeSpec};
use super::response_meta::{ObjectLabels, ResponseMeta};

/// 按请求头决定的响应形态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangePlan {
    Full,
    Partial(ByteRange),
    NotSatisfiable(RangeNotSatisfiable),
}

fn plan_range(headers: &HeaderMap, total_size: u64) -> RangePlan {
    let Some(raw) = headers.get(RANGE) else {
        return RangePlan::Full;
    };

    let Some(spec) = raw.to_str().ok().and_then(RangeSpec::parse) else {
        tracing::debug!(range = ?raw, "无法识别的 Range，回退为完整内容");
        return RangePlan::Full;
    };

    match spec.resolve(total_size) {
        Ok(range) => RangePlan::Partial(range),
        Err(e) => RangePlan::NotSatisfiable(e),
    }
}

/// 第一个 body 字节之前的失败对应的状态码。
pub(crate) fn failure_status(err: &StreamError) -> StatusCode {
    match err {
        StreamError::OutOfRange { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
        StreamError::Fetch { source, .. } => match source {
            ChunkSourceError::NotFound(_) => StatusCode::NOT_FOUND,
            ChunkSourceError::Transient(_) => StatusCode::SERVICE_UNAVAILABLE,
            ChunkSourceError::Fatal(_) => StatusCode::BAD_GATEWAY,
        },
        StreamError::UnexpectedChunkLength { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn range_not_satisfiable(err: RangeNotSatisfiable) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
    if let Ok(value) = HeaderValue::from_str(&err.content_range()) {
        headers.insert(CONTENT_RANGE, value);
    }
    (StatusCode::RANGE_NOT_SATISFIABLE, headers).into_response()
}

fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(ALLOW, HeaderValue::from_static("GET, HEAD"))],
    )
        .into_response()
}

/// 单个对象的 Range 处理器；内部的流式器可被多个请求并发共享。
#[derive(Debug)]
pub struct RangeHandler<S> {
    streamer: Arc<Streamer<S>>,
    labels: ObjectLabels,
    pipe_capacity: usize,
}

impl<S> RangeHandler<S> {
    pub fn new(streamer: Streamer<S>) -> Self {
        Self::from_shared(Arc::new(streamer))
    }

    pub fn from_shared(streamer: Arc<Streamer<S>>) -> Self {
        Self {
            streamer,
            labels: ObjectLabels::default(),
            pipe_capacity: DEFAULT_PIPE_CAPACITY,
        }
    }

    /// 用对象描述中的内容类型、ETag、最后修改时间填充响应标签。
    pub fn from_descriptor(
        streamer: Streamer<S>,
        descriptor: &ObjectDescriptor,
    ) -> Self {
        let mut handler = Self::new(streamer);
        if let Some(content_type) = &descriptor.content_type {
            handler.labels.content_type = content_type.clone();
        }
        handler.labels.etag = descriptor.etag.clone();
        handler.labels.last_modified = descriptor.last_modified;
        handler
    }

    /// 设置内容类型
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.labels.content_type = content_type.into();
        self
    }

    /// 设置 ETag
    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.labels.etag = Some(etag.into());
        self
    }

    /// 设置最后修改时间
    pub fn with_last_modified(
        mut self,
        last_modified: DateTime<FixedOffset>,
    ) -> Self {
        self.labels.last_modified = Some(last_modified);
        self
    }

    /// 设置流式器与响应体之间的管道容量（字节）
    pub fn with_pipe_capacity(mut self, pipe_capacity: usize) -> Self {
        self.pipe_capacity = pipe_capacity;
        self
    }

    pub fn streamer(&self) -> &Arc<Streamer<S>> {
        &self.streamer
    }

    pub fn labels(&self) -> &ObjectLabels {
        &self.labels
    }

    pub fn total_size(&self) -> u64 {
        self.streamer.total_size()
    }
}

impl<S> RangeHandler<S>
where
    S: ChunkSource + 'static,
{
    /// 处理一个请求；请求生命周期由处理器内部新建的取消令牌表示。
    pub async fn serve(&self, method: &Method, headers: &HeaderMap) -> Response {
        self.serve_with_cancel(method, headers, CancellationToken::new())
            .await
    }

    /// 处理一个请求；`cancel` 被取消（或响应体被丢弃）时停止读取分片。
    pub async fn serve_with_cancel(
        &self,
        method: &Method,
        headers: &HeaderMap,
        cancel: CancellationToken,
    ) -> Response {
        if method != Method::GET && method != Method::HEAD {
            return method_not_allowed();
        }

        let total_size = self.total_size();
        let meta = match plan_range(headers, total_size) {
            RangePlan::Full => ResponseMeta::full(total_size),
            RangePlan::Partial(range) => ResponseMeta::partial(range, total_size),
            RangePlan::NotSatisfiable(e) => {
                tracing::debug!(total_size, "请求范围无法满足");
                return range_not_satisfiable(e);
            }
        };

        let response_headers = match meta.headers(&self.labels) {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(error = %e, "响应头生成失败");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        };

        if method == Method::HEAD || meta.content_length == 0 {
            return (meta.status, response_headers, Body::empty()).into_response();
        }

        let opened = open_body(OpenBodyParams {
            streamer: Arc::clone(&self.streamer),
            start: meta.start,
            length: meta.content_length,
            pipe_capacity: self.pipe_capacity,
            cancel,
        })
        .await;

        match opened {
            Ok(body) => (meta.status, response_headers, body).into_response(),
            Err(e) => {
                tracing::warn!(start = meta.start, error = %e, "响应体开始前失败");
                failure_status(&e).into_response()
            }
        }
    }
}
