//! 对象领域模块：把一个路径解析为对象描述（大小、内容类型、ETag 等），
//! 并据此组装可直接挂载的 Range 处理器。

pub mod error;
pub mod structs;
