//! 响应元数据：在写出任何 body 字节之前确定，之后不可撤回。

use axum::http::header::{
    ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_RANGE, CONTENT_TYPE, ETAG,
    InvalidHeaderValue, LAST_MODIFIED,
};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use chrono::{DateTime, FixedOffset, Utc};

use super::range_spec::ByteRange;

/// 默认内容类型
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// 对象级别的响应标签：内容类型、ETag、最后修改时间。
#[derive(Debug, Clone)]
pub struct ObjectLabels {
    pub content_type: String,
    /// 已去掉首尾引号的 ETag
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl Default for ObjectLabels {
    fn default() -> Self {
        Self {
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            etag: None,
            last_modified: None,
        }
    }
}

/// 单个请求的响应元数据。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: StatusCode,
    /// body 在对象中的起始偏移
    pub start: u64,
    /// 声明的 body 长度
    pub content_length: u64,
    pub total_size: u64,
    /// 仅部分内容响应有值
    pub range: Option<ByteRange>,
}

impl ResponseMeta {
    /// 完整内容：200，长度为对象大小。
    pub fn full(total_size: u64) -> Self {
        Self {
            status: StatusCode::OK,
            start: 0,
            content_length: total_size,
            total_size,
            range: None,
        }
    }

    /// 部分内容：206，长度为 `end - start + 1`。
    pub fn partial(range: ByteRange, total_size: u64) -> Self {
        Self {
            status: StatusCode::PARTIAL_CONTENT,
            start: range.start,
            content_length: range.len(),
            total_size,
            range: Some(range),
        }
    }

    pub fn is_partial(&self) -> bool {
        self.range.is_some()
    }

    /// 生成响应头；内容类型或 ETag 含非法字符时返回错误。
    pub fn headers(
        &self,
        labels: &ObjectLabels,
    ) -> Result<HeaderMap, InvalidHeaderValue> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_RANGES, HeaderValue::from_static("bytes"));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(self.content_length));
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(&labels.content_type)?);

        if let Some(range) = self.range {
            headers.insert(
                CONTENT_RANGE,
                HeaderValue::from_str(&range.content_range(self.total_size))?,
            );
        }
        if let Some(etag) = &labels.etag {
            headers.insert(ETAG, HeaderValue::from_str(&quote_etag(etag))?);
        }
        if let Some(last_modified) = &labels.last_modified {
            headers.insert(
                LAST_MODIFIED,
                HeaderValue::from_str(&http_date(last_modified))?,
            );
        }

        Ok(headers)
    }
}

/// 弱 ETag（`W/"..."`）和已带引号的值原样保留，其余补上引号。
fn quote_etag(etag: &str) -> String {
    if etag.starts_with("W/") || etag.starts_with('"') {
        etag.to_string()
    } else {
        format!("\"{etag}\"")
    }
}

/// HTTP-date（IMF-fixdate），固定使用 GMT。
pub(crate) fn http_date(time: &DateTime<FixedOffset>) -> String {
    time.with_timezone(&Utc)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}
