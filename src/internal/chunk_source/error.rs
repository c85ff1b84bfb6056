//! 分片源错误类型。

use std::io::ErrorKind;

use thiserror::Error;

/// 分片读取失败的分类；外层包装（如重试）据此决定是否再次读取。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkSourceError {
    /// 源对象引用无效（已删除、路径错误等）。
    #[error("源对象不存在: {0}")]
    NotFound(String),

    /// 网络或远端的暂时性故障，可以重试。
    #[error("分片读取暂时失败: {0}")]
    Transient(String),

    /// 不可恢复的故障，如权限不足、服务器不支持 Range。
    #[error("分片读取失败（不可恢复）: {0}")]
    Fatal(String),
}

impl ChunkSourceError {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for ChunkSourceError {
    fn from(e: reqwest::Error) -> Self {
        // 构建请求本身失败（URL 非法等）重试也没用
        if e.is_builder() || e.is_redirect() {
            Self::Fatal(e.to_string())
        } else {
            Self::Transient(e.to_string())
        }
    }
}

impl From<std::io::Error> for ChunkSourceError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            ErrorKind::NotFound => Self::NotFound(e.to_string()),
            ErrorKind::PermissionDenied
            | ErrorKind::UnexpectedEof
            | ErrorKind::InvalidInput => Self::Fatal(e.to_string()),
            _ => Self::Transient(e.to_string()),
        }
    }
}
