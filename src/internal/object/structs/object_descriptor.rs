use chrono::{DateTime, FixedOffset};

/// 对象描述：构造流式器所需的大小，以及响应头用到的标签。
///
/// 大小在对象的生命周期内视为固定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    /// 显示名（优先取 `displayname`，否则取路径末段）
    pub name: String,
    /// 总大小（字节）
    pub size: u64,
    /// 来源：远程对象为绝对 URL，本地对象为文件路径
    pub origin: String,
    pub content_type: Option<String>,
    /// 已去掉首尾引号的 ETag
    pub etag: Option<String>,
    pub last_modified: Option<DateTime<FixedOffset>>,
}

impl ObjectDescriptor {
    pub fn new(name: impl Into<String>, size: u64, origin: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            origin: origin.into(),
            content_type: None,
            etag: None,
            last_modified: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}
