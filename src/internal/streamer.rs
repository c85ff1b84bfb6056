//! 流式器领域模块：把分片源上的对象，从任意偏移开始按分片网格顺序写入 sink。
//!
//! 使用方式：`Streamer::new(source, chunk_size, total_size)?.stream_at(&cancel, offset, &mut sink).await`

pub mod error;
pub mod structs;
