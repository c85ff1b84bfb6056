//! 服务器领域模块：按名称挂载任意多个对象处理器，对外提供 HTTP Range 读取。
//!
//! 每个请求使用服务器关闭令牌的子令牌；关闭时所有在途的流式传输随之停止。

pub mod error;
pub mod structs;
