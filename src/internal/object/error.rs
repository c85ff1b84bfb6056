use reqwest::StatusCode;
use thiserror::Error;

use crate::internal::streamer::error::StreamError;

/// 解析对象（PROPFIND / 本地元数据）过程中的错误
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("路径格式错误: {0}")]
    InvalidPath(String),

    #[error("请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("状态解析异常 {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("XML 解析失败: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("对象不存在: {0}")]
    NotFound(String),

    #[error("目标是目录，无法按字节读取: {0}")]
    IsDir(String),

    #[error("服务器未返回对象大小: {0}")]
    UnknownSize(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("流式器构造失败: {0}")]
    Stream(#[from] StreamError),
}
