//! 本库主入口：从「路径」一步得到可直接挂载的 Range 处理器。

pub mod local;
pub mod remote;
