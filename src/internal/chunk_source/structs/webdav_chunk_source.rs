//! WebDAV 分片源：对单个远程文件发起 Range GET，流式读取响应体。

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use reqwest::header::{ACCEPT_ENCODING, RANGE};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::internal::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::chunk_source::error::ChunkSourceError;
use crate::internal::chunk_source::traits::chunk_source::ChunkSource;

/// 生成单个 Range 请求头：`bytes=start-(end-1)`，end 为不含上界。
pub(crate) fn range_header(start: u64, end: u64) -> String {
    let end_inclusive = end.saturating_sub(1);
    format!("bytes={}-{}", start, end_inclusive)
}

/// 把非成功状态码归类为分片源错误。
fn classify_status(status: StatusCode, url: &Url) -> ChunkSourceError {
    let message = format!("{url} 返回 {status}");
    match status {
        StatusCode::NOT_FOUND | StatusCode::GONE => {
            ChunkSourceError::NotFound(message)
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            ChunkSourceError::Transient(message)
        }
        s if s.is_server_error() => ChunkSourceError::Transient(message),
        _ => ChunkSourceError::Fatal(message),
    }
}

/// 绑定到单个远程文件 URL 的分片源。
///
/// `Client` 内部是 Arc，克隆分片源不会新建连接池；认证头由 [`WebdavAuth`] 的客户端统一携带。
#[derive(Debug, Clone)]
pub struct WebdavChunkSource {
    client: Client,
    url: Url,
}

impl WebdavChunkSource {
    pub fn new(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// 复用认证结构体中已带 Basic 认证头的客户端。
    pub fn from_auth(auth: &WebdavAuth, url: Url) -> Self {
        Self::new(auth.client.clone(), url)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ChunkSource for WebdavChunkSource {
    async fn fetch(
        &self,
        offset: u64,
        size: u64,
    ) -> Result<Bytes, ChunkSourceError> {
        if size == 0 {
            return Ok(Bytes::new());
        }
        let expected = usize::try_from(size).map_err(|_| {
            ChunkSourceError::Fatal(format!("分片过大: {size}"))
        })?;

        // identity：压缩后的响应体长度与 Range 不再对应
        let resp = self
            .client
            .get(self.url.clone())
            .header(RANGE, range_header(offset, offset + size))
            .header(ACCEPT_ENCODING, "identity")
            .send()
            .await?;

        match resp.status() {
            StatusCode::PARTIAL_CONTENT => {}
            // 服务器忽略了 Range 返回整个文件：只有从头读取时前缀可用
            StatusCode::OK if offset == 0 => {}
            StatusCode::OK => {
                return Err(ChunkSourceError::Fatal(format!(
                    "服务器不支持 Range 请求: {}",
                    self.url
                )));
            }
            status => return Err(classify_status(status, &self.url)),
        }

        let mut buf = BytesMut::with_capacity(expected);
        let mut stream = resp.bytes_stream();
        while let Some(piece) = stream.next().await {
            let piece = piece?;
            let take = piece.len().min(expected - buf.len());
            buf.extend_from_slice(&piece[..take]);
            if buf.len() == expected {
                break;
            }
        }

        if buf.len() < expected {
            return Err(ChunkSourceError::Transient(format!(
                "响应体过短: 期望 {expected} 字节，实际 {} 字节",
                buf.len()
            )));
        }

        Ok(buf.freeze())
    }
}
