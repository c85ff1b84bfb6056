use crate::internal::auth::structs::webdav_auth::WebdavAuth;
use crate::internal::chunk_source::structs::webdav_chunk_source::WebdavChunkSource;
use crate::internal::http::structs::range_handler::RangeHandler;
use crate::internal::object::error::ResolveError;
use crate::internal::object::structs::remote_object::RemoteObject;
use crate::internal::streamer::structs::stream_config::StreamConfig;
use crate::internal::webdav::functions::propfind_object::propfind_object;
use crate::internal::webdav::raw_xml::impl_multi_status::ToObjectDescriptor;

/// 解析远程对象：PROPFIND 拿到大小与标签，并绑定一个指向该对象的分片源
///
/// - 注意：path 是基于 webdav_auth 中的 base_url 的，所以不建议以 "/" 开头
/// - 目录、不存在的对象、未返回大小的对象都会返回错误
///
/// example:
/// ```ignore
/// use webdav_stream::auth::WebdavAuth;
/// use webdav_stream::get_remote_object;
///
/// let webdav_auth = WebdavAuth::new("account", "password", "http://localhost:8080/dav/")?;
/// let object = get_remote_object(&webdav_auth, "./movies/a.mp4").await?;
/// println!("{} 字节", object.size());
/// ```
pub async fn get_remote_object(
    webdav_auth: &WebdavAuth,
    path: &str,
) -> Result<RemoteObject, ResolveError> {
    let url = webdav_auth
        .resolve_url(path)
        .map_err(|e| ResolveError::InvalidPath(format!("{path}: {e}")))?;

    let multi_status = propfind_object(webdav_auth, &url).await?;
    let descriptor = multi_status.to_object_descriptor(&url)?;

    tracing::debug!(
        url = %url,
        size = descriptor.size,
        content_type = ?descriptor.content_type,
        "远程对象已解析"
    );

    Ok(RemoteObject::new(
        descriptor,
        WebdavChunkSource::from_auth(webdav_auth, url),
    ))
}

/// 解析远程对象并直接组装处理器（不带重试）
///
/// 需要瞬时错误重试时，使用 [`get_remote_object`] 后调用
/// [`RemoteObject::into_retrying_handler`]。
pub async fn open_remote_object(
    webdav_auth: &WebdavAuth,
    path: &str,
    config: &StreamConfig,
) -> Result<RangeHandler<WebdavChunkSource>, ResolveError> {
    get_remote_object(webdav_auth, path)
        .await?
        .into_handler(config)
}
