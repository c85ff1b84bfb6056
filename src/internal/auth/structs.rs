pub mod webdav_auth;

// 重导出公共类型
pub use webdav_auth::WebdavAuth;
