//! WebDAV 基础访问能力：PROPFIND 请求与 multistatus XML 模型。

pub mod enums;
pub mod functions;
pub mod raw_xml;
