use reqwest::Method;

/// 标准 HTTP 方法之外用到的 WebDAV 方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebDavMethod {
    PropFind,
}

impl WebDavMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebDavMethod::PropFind => "PROPFIND",
        }
    }

    pub fn to_method(&self) -> Result<Method, String> {
        Method::from_bytes(self.as_str().as_bytes()).map_err(|e| e.to_string())
    }
}

/// PROPFIND 的 `Depth` 请求头
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// 仅返回当前资源
    Zero,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Zero => "0",
        }
    }
}
