use std::net::SocketAddr;

use crate::internal::server::error::ServerError;

/// 默认监听地址
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// 默认监听端口
pub const DEFAULT_PORT: u16 = 8080;

/// 服务器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    /// 0 表示由系统分配
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// 解析为监听地址；host 只接受 IP 字面量
    pub fn addr(&self) -> Result<SocketAddr, ServerError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse::<SocketAddr>()
            .or_else(|_| format!("[{}]:{}", self.host, self.port).parse())
            .map_err(|_| ServerError::InvalidAddress(raw))
    }
}
