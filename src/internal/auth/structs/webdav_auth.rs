use core::fmt;
use std::sync::Arc;

use base64::Engine;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use sha2::{Digest, Sha256};
use url::Url;

/// 认证结构体
///
/// 该结构体定位
/// - 存储基础 WebDAV 认证信息，账号密码只在构造时使用，不落盘
/// - 为分片源和对象解析提供已带认证头的网络客户端
///
/// 默认 Eq 时会匹配 base_url 和 token，如果需要单独比较 token，需使用 eq_only_token 方法
#[derive(Clone)]
pub struct WebdavAuth {
    pub client: Client,     // 内部是 Arc，不需要特殊处理
    pub base_url: Arc<Url>, // 处理器会跨任务共享，用 Arc
    pub(crate) encrypted_token: Arc<String>, // 对外导出时，不允许直接访问，哪怕它是被加密的
}

impl WebdavAuth {
    /// 创建新的认证结构体
    pub fn new(
        username: &str,
        password: &str,
        base_url: &str,
    ) -> Result<Self, String> {
        let http_client = InternalHttpClient::create(username, password)?;

        let base_url = format_base_url(base_url)?;

        Ok(Self {
            client: http_client.client,
            base_url: Arc::new(base_url),
            encrypted_token: Arc::new(http_client.encrypted_token),
        })
    }

    /// 仅比较 token 是否相等
    pub fn eq_only_token(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
    }

    /// 把相对路径拼到 base_url 上，不允许跳出 base_url 所在目录
    ///
    /// - 注意：路径是相对于 base_url 的，所以不建议以 "/" 开头
    pub fn resolve_url(&self, relative: &str) -> Result<Url, String> {
        let joined_url = self
            .base_url
            .join(relative)
            .map_err(|_| "路径格式错误".to_string())?;

        if joined_url.scheme() != self.base_url.scheme()
            || joined_url.host_str() != self.base_url.host_str()
            || joined_url.port_or_known_default()
                != self.base_url.port_or_known_default()
        {
            return Err("路径格式错误".to_string());
        }

        if !joined_url.path().starts_with(self.base_url.path()) {
            return Err("父目录不允许".to_string());
        }

        Ok(joined_url)
    }
}

/// 用于比较认证结构体是否相等
impl PartialEq for WebdavAuth {
    fn eq(&self, other: &Self) -> bool {
        self.encrypted_token == other.encrypted_token
            && self.base_url == other.base_url
    }
}

/// 防止 debug 泄漏账号
impl fmt::Debug for WebdavAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebdavAuth")
            .field("base_url", &self.base_url.as_str())
            .field("client", &"<Client with hidden authorization>")
            .finish()
    }
}

fn format_base_url(url: &str) -> Result<Url, String> {
    if url.is_empty() {
        return Err("路径为空".to_string());
    }

    let mut base_url = Url::parse(url).map_err(|e| e.to_string())?;

    if !base_url.path().ends_with('/') {
        let new_path = format!("{}/", base_url.path());
        base_url.set_path(&new_path);
    }

    Ok(base_url)
}

/// 内部临时使用的 http 客户端结构体，在初始化 WebdavAuth 时使用
struct InternalHttpClient {
    client: Client,
    encrypted_token: String,
}

impl InternalHttpClient {
    fn encrypt_str(data: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 创建 http 客户端，内部使用
    fn create(username: &str, password: &str) -> Result<Self, String> {
        let mut headers = HeaderMap::new();

        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{username}:{password}"));

        let mut auth_value = HeaderValue::from_str(&format!("Basic {token}"))
            .map_err(|e| e.to_string())?;
        auth_value.set_sensitive(true);

        headers.insert(AUTHORIZATION, auth_value);

        let http_client = Client::builder()
            .http1_only()
            .default_headers(headers)
            .build()
            .map_err(|e| e.to_string())?;

        let encrypted_token = Self::encrypt_str(&token);

        Ok(Self { client: http_client, encrypted_token })
    }
}
