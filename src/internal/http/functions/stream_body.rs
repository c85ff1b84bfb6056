//! 响应体生产：在独立任务中驱动流式器，经由内存管道交给 HTTP 响应体。

use std::sync::Arc;

use axum::body::Body;
use futures_util::StreamExt;
use tokio::io::{AsyncWriteExt, DuplexStream};
use tokio::sync::oneshot;
use tokio_util::io::ReaderStream;
use tokio_util::sync::CancellationToken;

use crate::internal::chunk_source::traits::chunk_source::ChunkSource;
use crate::internal::http::structs::limited_writer::LimitedWriter;
use crate::internal::streamer::error::StreamError;
use crate::internal::streamer::structs::streamer::Streamer;

/// 打开响应体时的参数（形参超过 3 个，用 struct 承载）。
pub struct OpenBodyParams<S> {
    pub streamer: Arc<Streamer<S>>,
    pub start: u64,
    pub length: u64,
    pub pipe_capacity: usize,
    pub cancel: CancellationToken,
}

/// 启动传输任务，等到第一个字节进入管道（或任务提前结束）后返回响应体。
///
/// - 第一个字节之前失败：返回 `Err`，调用方还来得及换成错误状态码；
/// - 之后失败：管道提前关闭，客户端只会看到不完整的 body；
/// - 响应体被丢弃（客户端断开）时取消 `cancel`，流式器随之停止。
pub async fn open_body<S>(params: OpenBodyParams<S>) -> Result<Body, StreamError>
where
    S: ChunkSource + 'static,
{
    let OpenBodyParams {
        streamer,
        start,
        length,
        pipe_capacity,
        cancel,
    } = params;

    let (writer, reader) = tokio::io::duplex(pipe_capacity.max(1));
    let (ready_tx, ready_rx) = oneshot::channel();
    let guard = cancel.clone().drop_guard();

    let sink = LimitedWriter::new(writer, length, cancel.clone())
        .notify_first_write(ready_tx);
    let task = tokio::spawn(pump_body(streamer, cancel, start, sink));

    // sink 随任务结束被丢弃而未发出通知：说明一个字节都没写出
    if ready_rx.await.is_err() {
        task.await??;
    }

    let stream = ReaderStream::new(reader).map(move |piece| {
        let _held = &guard;
        piece
    });
    Ok(Body::from_stream(stream))
}

async fn pump_body<S>(
    streamer: Arc<Streamer<S>>,
    cancel: CancellationToken,
    start: u64,
    mut sink: LimitedWriter<DuplexStream>,
) -> Result<u64, StreamError>
where
    S: ChunkSource,
{
    tracing::debug!(start, "开始传输响应体");

    match streamer.stream_at(&cancel, start, &mut sink).await {
        Ok(()) => {}
        // 写满声明长度后由限长 sink 主动取消，属于正常结束
        Err(StreamError::Cancelled) if sink.is_exhausted() => {}
        Err(e) => {
            tracing::warn!(
                start,
                written = sink.written(),
                error = %e,
                "响应体传输中断"
            );
            return Err(e);
        }
    }

    sink.shutdown().await?;
    tracing::debug!(start, written = sink.written(), "响应体传输完成");
    Ok(sink.written())
}
