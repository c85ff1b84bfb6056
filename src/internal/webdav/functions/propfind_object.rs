use quick_xml::de::from_str;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use crate::internal::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::object::error::ResolveError;
use crate::internal::webdav::enums::{Depth, WebDavMethod};
use crate::internal::webdav::raw_xml::raw_file::MultiStatus;

/// 内部使用的 PROPFIND 请求体，只取流式读取需要的属性
const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
    <D:resourcetype/>
    <D:getcontentlength/>
    <D:getcontenttype/>
    <D:getetag/>
    <D:getlastmodified/>
    <D:displayname/>
  </D:prop>
</D:propfind>"#;

/// 对单个资源发起 `Depth: 0` 的 PROPFIND，返回原始 multistatus
pub(crate) async fn propfind_object(
    webdav_auth: &WebdavAuth,
    url: &Url,
) -> Result<MultiStatus, ResolveError> {
    // 组装请求头
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/xml"));
    headers.insert("Depth", HeaderValue::from_static(Depth::Zero.as_str()));
    headers.insert(ACCEPT, HeaderValue::from_static("application/xml"));

    let method = WebDavMethod::PropFind
        .to_method()
        .map_err(ResolveError::InvalidPath)?;

    let res = webdav_auth
        .client
        .request(method, url.clone())
        .headers(headers)
        .body(PROPFIND_BODY)
        .send()
        .await?;

    let status = res.status();

    if status == StatusCode::NOT_FOUND {
        return Err(ResolveError::NotFound(url.to_string()));
    }

    let xml_text = res.text().await?;

    if !status.is_success() && status != StatusCode::MULTI_STATUS {
        return Err(ResolveError::Status { status, body: xml_text });
    }

    tracing::debug!(%url, %status, "PROPFIND 完成");

    Ok(from_str(&xml_text)?)
}
