//! HTTP 领域模块：把单个 Range 请求适配为一次 [`Streamer::stream_at`](crate::streamer::Streamer::stream_at) 调用，
//! 并给出符合协议的响应元数据（状态码、`Content-Length`、`Content-Range`）。

pub mod functions;
pub mod structs;
pub mod traits;
