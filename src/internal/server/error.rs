use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("监听地址无效: {0}")]
    InvalidAddress(String),

    #[error("端口绑定失败: {0}")]
    Bind(#[source] std::io::Error),

    #[error("服务运行失败: {0}")]
    Serve(#[source] std::io::Error),
}
