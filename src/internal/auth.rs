//! 认证领域模块：携带 Basic 认证头的 HTTP 客户端，以及绑定的基准地址。

pub mod structs;
