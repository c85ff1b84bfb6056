pub mod server_config;
pub mod stream_server;

// 重导出公共类型
pub use server_config::ServerConfig;
pub use stream_server::StreamServer;
