//! 限长 sink：恰好接收声明长度的字节，写满后通知上游取消。

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::AsyncWrite;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

/// 包装真正的 sink，最多向其写入 `limit` 字节。
///
/// - 写满后取消 `on_limit`，流式器在下一次检查时停止读取；
/// - 写满后继续到达的字节被静默丢弃（返回已接收），避免 `write_all` 报 `WriteZero`；
/// - 可选地在第一个字节真正进入内层 sink 时发出一次通知。
#[derive(Debug)]
pub struct LimitedWriter<W> {
    inner: W,
    remaining: u64,
    written: u64,
    on_limit: CancellationToken,
    first_write: Option<oneshot::Sender<()>>,
}

impl<W> LimitedWriter<W> {
    pub fn new(inner: W, limit: u64, on_limit: CancellationToken) -> Self {
        if limit == 0 {
            on_limit.cancel();
        }
        Self {
            inner,
            remaining: limit,
            written: 0,
            on_limit,
            first_write: None,
        }
    }

    /// 第一个字节写入内层 sink 时通知 `tx`。
    pub fn notify_first_write(mut self, tx: oneshot::Sender<()>) -> Self {
        self.first_write = Some(tx);
        self
    }

    /// 已写入内层 sink 的字节数。
    pub fn written(&self) -> u64 {
        self.written
    }

    /// 是否已写满声明长度。
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W> AsyncWrite for LimitedWriter<W>
where
    W: AsyncWrite + Unpin,
{
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        if this.remaining == 0 {
            return Poll::Ready(Ok(buf.len()));
        }

        let allowed = this.remaining.min(buf.len() as u64) as usize;
        let n = ready!(Pin::new(&mut this.inner).poll_write(cx, &buf[..allowed]))?;

        this.remaining -= n as u64;
        this.written += n as u64;
        if n > 0 {
            if let Some(tx) = this.first_write.take() {
                let _ = tx.send(());
            }
        }
        if this.remaining == 0 {
            this.on_limit.cancel();
        }

        Poll::Ready(Ok(n))
    }

    fn poll_flush(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_flush(cx)
    }

    fn poll_shutdown(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.get_mut().inner).poll_shutdown(cx)
    }
}
