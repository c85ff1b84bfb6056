/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::local::*;
pub use internal::entrance::remote::*;

pub mod auth {
    use crate::internal;
    pub use internal::auth::structs::webdav_auth::WebdavAuth;
}

/// 分片源：流式器唯一依赖的读取能力，以及内置的适配器
pub mod chunk_source {
    use crate::internal;
    pub use internal::chunk_source::error::ChunkSourceError;
    pub use internal::chunk_source::structs::*;
    pub use internal::chunk_source::structs::retry_chunk_source::{
        DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY_MS,
    };
    pub use internal::chunk_source::traits::chunk_source::*;
}

pub mod streamer {
    use crate::internal;
    pub use internal::streamer::error::StreamError;
    pub use internal::streamer::structs::*;
    pub use internal::streamer::structs::stream_config::{
        DEFAULT_CHUNK_SIZE, DEFAULT_PIPE_CAPACITY,
    };
}

/// HTTP Range 处理：请求解析、响应元数据、流式响应体
pub mod http {
    use crate::internal;
    pub use internal::http::functions::stream_body::{OpenBodyParams, open_body};
    pub use internal::http::structs::*;
    pub use internal::http::structs::response_meta::DEFAULT_CONTENT_TYPE;
    pub use internal::http::traits::serve_range::ServeRange;
}

pub mod object {
    use crate::internal;
    pub use internal::object::error::ResolveError;
    pub use internal::object::structs::*;
}

pub mod server {
    use crate::internal;
    pub use internal::server::error::ServerError;
    pub use internal::server::structs::*;
    pub use internal::server::structs::server_config::{DEFAULT_HOST, DEFAULT_PORT};
}

/// 对外提供 webdav 基础访问能力，不能限制死在入口函数中，以防有人自己要用
pub mod webdav {
    pub mod enums {
        pub use crate::internal::webdav::enums::*;
    }

    pub mod traits {
        pub use crate::internal::webdav::raw_xml::impl_multi_status::*;
    }

    pub mod structs {
        pub use crate::internal::webdav::raw_xml::raw_file::*;
    }
}
