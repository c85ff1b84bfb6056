use url::Url;

use crate::internal::object::error::ResolveError;
use crate::internal::object::structs::object_descriptor::ObjectDescriptor;
use crate::internal::webdav::raw_xml::raw_file::{MultiStatus, Prop, PropStat, Response};

pub trait ToObjectDescriptor {
    /// 把 `Depth: 0` 的 PROPFIND 结果转换为对象描述，`url` 为请求的绝对地址
    fn to_object_descriptor(
        self,
        url: &Url,
    ) -> Result<ObjectDescriptor, ResolveError>;
}

fn take_ok_propstat(propstats: Vec<PropStat>) -> Option<PropStat> {
    // 拿到第一个 HTTP 状态是 2xx 的 PropStat（直接 move 出来）
    propstats.into_iter().find(|ps| {
        ps.status
            .split_whitespace()
            .find_map(|t| t.parse::<u16>().ok())
            .map(|code| (200..=299).contains(&code))
            .unwrap_or(false)
    })
}

fn decode_name(display_name: Option<String>, href: &str) -> String {
    // 服务端给了 display_name 就直接用，否则从 href 末尾提取文件名并 URL 解码
    display_name.filter(|n| !n.is_empty()).unwrap_or_else(|| {
        percent_encoding::percent_decode_str(
            href.trim_end_matches('/').rsplit('/').next().unwrap_or(""),
        )
        .decode_utf8_lossy()
        .to_string()
    })
}

fn clean_etag(raw: Option<String>) -> Option<String> {
    // 去掉 ETag 的首尾引号以及多余空格，弱 ETag 原样保留
    raw.map(|s| {
        let s = s.trim();
        if s.starts_with("W/") {
            s.to_string()
        } else {
            s.trim_matches('"').to_string()
        }
    })
    .filter(|s| !s.is_empty())
}

impl ToObjectDescriptor for MultiStatus {
    fn to_object_descriptor(
        self,
        url: &Url,
    ) -> Result<ObjectDescriptor, ResolveError> {
        // Depth: 0 只会返回资源本身；个别服务器会多给，取第一个带 2xx 属性集的
        let found = self.responses.into_iter().find_map(
            |Response { href, propstats }| {
                take_ok_propstat(propstats).map(|ps| (href, ps))
            },
        );

        let Some((href, PropStat { prop, .. })) = found else {
            return Err(ResolveError::NotFound(url.to_string()));
        };

        let Prop {
            resource_type,
            content_length,
            last_modified,
            content_type,
            etag,
            display_name,
        } = prop;

        let is_dir = resource_type
            .as_ref()
            .and_then(|rt| rt.is_collection.as_ref())
            .is_some();
        if is_dir {
            return Err(ResolveError::IsDir(url.to_string()));
        }

        let size = content_length
            .ok_or_else(|| ResolveError::UnknownSize(url.to_string()))?;

        Ok(ObjectDescriptor {
            name: decode_name(display_name, &href),
            size,
            origin: url.to_string(),
            content_type: content_type.filter(|t| !t.trim().is_empty()),
            etag: clean_etag(etag),
            last_modified,
        })
    }
}
