use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 对应 WebDAV 响应 XML 顶层的 `<D:multistatus>` 节点
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct MultiStatus {
    /// `<D:response>` 节点列表；`Depth: 0` 时只有请求的资源本身
    #[serde(rename = "response", default)]
    pub responses: Vec<Response>,
}

/// 对应单个 `<D:response>` 节点
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Response {
    /// `<D:href>`：资源路径（URL 编码）
    pub href: String,
    /// `<D:propstat>`：资源属性集和对应状态码的列表
    #[serde(rename = "propstat", default)]
    pub propstats: Vec<PropStat>,
}

/// 对应 `<D:propstat>` 节点：一个属性集 + 对应的 HTTP 状态
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct PropStat {
    pub prop: Prop,
    /// `<D:status>`：如 "HTTP/1.1 200 OK"
    pub status: String,
}

/// 对应 `<D:prop>` 节点，只保留流式读取用得到的属性
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Prop {
    #[serde(rename = "resourcetype")]
    pub resource_type: Option<ResourceType>,

    /// `<getcontentlength>`：文件大小（字节），目录一般没有此字段
    #[serde(rename = "getcontentlength")]
    pub content_length: Option<u64>,

    /// `<getlastmodified>`：HTTP-date 格式，无法解析时视为缺失
    #[serde(
        rename = "getlastmodified",
        deserialize_with = "de_http_date",
        default
    )]
    pub last_modified: Option<DateTime<FixedOffset>>,

    #[serde(rename = "getcontenttype")]
    pub content_type: Option<String>,

    #[serde(rename = "getetag")]
    pub etag: Option<String>,

    #[serde(rename = "displayname")]
    pub display_name: Option<String>,
}

/// 将 HTTP-date 格式的时间解析为 `DateTime<FixedOffset>`
fn de_http_date<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| DateTime::parse_from_rfc2822(s.trim()).ok()))
}

/// `<resourcetype>` 节点
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct ResourceType {
    /// `<collection/>` 存在表示是目录，否则是文件
    #[serde(rename = "collection")]
    pub is_collection: Option<EmptyElement>,
}

/// 空元素的占位结构，例如 `<collection/>`
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EmptyElement {}
