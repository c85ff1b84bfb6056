use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::internal::http::traits::serve_range::ServeRange;
use crate::internal::server::error::ServerError;

use super::server_config::ServerConfig;

type SharedHandler = Arc<dyn ServeRange>;

struct ServerState {
    objects: HashMap<String, SharedHandler>,
    shutdown: CancellationToken,
}

/// 对象流式服务器，路由为 `/{name}`。
///
/// ```ignore
/// let server = StreamServer::new(ServerConfig::default())
///     .mount("video.mp4", handler);
/// let stop = server.shutdown_token();
/// tokio::spawn(server.run());
/// // ...
/// stop.cancel();
/// ```
pub struct StreamServer {
    config: ServerConfig,
    objects: HashMap<String, SharedHandler>,
    shutdown: CancellationToken,
}

impl StreamServer {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            objects: HashMap::new(),
            shutdown: CancellationToken::new(),
        }
    }

    /// 以 `name` 挂载处理器，同名时覆盖
    pub fn mount(
        mut self,
        name: impl Into<String>,
        handler: impl ServeRange + 'static,
    ) -> Self {
        self.objects.insert(name.into(), Arc::new(handler));
        self
    }

    /// 已挂载的对象名称
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// 取消该令牌即关闭服务器，并中断所有在途传输
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn router(&self) -> Router {
        let state = Arc::new(ServerState {
            objects: self.objects.clone(),
            shutdown: self.shutdown.clone(),
        });

        Router::new()
            .route("/{name}", any(serve_object))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// 按配置绑定端口并运行，直到关闭令牌被取消
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.addr()?;
        let listener = TcpListener::bind(addr).await.map_err(ServerError::Bind)?;
        self.serve(listener).await
    }

    /// 在调用方提供的监听器上运行，直到关闭令牌被取消
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let router = self.router();
        let shutdown = self.shutdown.clone();

        if let Ok(addr) = listener.local_addr() {
            tracing::info!(%addr, objects = self.objects.len(), "流式服务器已启动");
        }

        axum::serve(listener, router.into_make_service())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("流式服务器已关闭");
        Ok(())
    }
}

async fn serve_object(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let Some(handler) = state.objects.get(&name) else {
        tracing::debug!(name = %name, "对象未挂载");
        return StatusCode::NOT_FOUND.into_response();
    };

    handler
        .serve_range(&method, &headers, state.shutdown.child_token())
        .await
}
