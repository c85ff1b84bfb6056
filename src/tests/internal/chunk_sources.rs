//! 分片源适配器测试：内存、本地文件、重试包装，以及本地对象入口。

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::to_bytes;
use axum::http::header::{CONTENT_LENGTH, CONTENT_RANGE, LAST_MODIFIED, RANGE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use tokio_util::sync::CancellationToken;

use crate::internal::chunk_source::error::ChunkSourceError;
use crate::internal::chunk_source::structs::file_chunk_source::FileChunkSource;
use crate::internal::chunk_source::structs::memory_chunk_source::MemoryChunkSource;
use crate::internal::chunk_source::structs::retry_chunk_source::{RetryChunkSource, RetryConfig};
use crate::internal::chunk_source::traits::chunk_source::{ChunkSource, SharedChunkSource};
use crate::internal::entrance::local::open_local_object;
use crate::internal::object::error::ResolveError;
use crate::internal::streamer::structs::stream_config::StreamConfig;
use crate::internal::streamer::structs::streamer::Streamer;
use crate::tests::{CountingSource, random_object};

/// 写一个临时文件，文件名带进程号避免并行测试互相覆盖。
async fn temp_file(name: &str, data: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("webdav_stream-{}-{name}", std::process::id()));
    tokio::fs::write(&path, data).await.unwrap();
    path
}

#[tokio::test]
async fn memory_source_slices_and_rejects_out_of_bounds() {
    let source = MemoryChunkSource::new(Vec::from(&b"0123456789"[..]));
    assert_eq!(source.size(), 10);
    assert_eq!(source.fetch(2, 3).await.unwrap().as_ref(), b"234");
    assert_eq!(source.fetch(8, 2).await.unwrap().as_ref(), b"89");

    for (offset, size) in [(8, 3), (11, 0), (u64::MAX, 2)] {
        let err = source.fetch(offset, size).await.unwrap_err();
        assert!(matches!(err, ChunkSourceError::Fatal(_)), "{offset}+{size}");
    }
}

#[tokio::test]
async fn file_source_reads_at_offset() {
    let data = random_object(3000, 20);
    let path = temp_file("file_source.bin", &data).await;
    let source = FileChunkSource::new(&path);

    assert_eq!(source.fetch(1000, 500).await.unwrap(), data.slice(1000..1500));
    assert_eq!(source.fetch(2900, 100).await.unwrap(), data.slice(2900..));

    // 文件比请求的范围短：不可恢复
    let err = source.fetch(2900, 200).await.unwrap_err();
    assert!(matches!(err, ChunkSourceError::Fatal(_)));

    tokio::fs::remove_file(&path).await.unwrap();
    let err = source.fetch(0, 10).await.unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn io_errors_are_classified() {
    let classify = |kind| ChunkSourceError::from(io::Error::new(kind, "x"));
    assert!(classify(io::ErrorKind::NotFound).is_not_found());
    assert!(matches!(classify(io::ErrorKind::PermissionDenied), ChunkSourceError::Fatal(_)));
    assert!(classify(io::ErrorKind::ConnectionReset).is_transient());
    assert!(classify(io::ErrorKind::TimedOut).is_transient());
}

fn quick_retry(max_retries: usize) -> RetryConfig {
    RetryConfig { max_retries, retry_delay_ms: 1 }
}

#[tokio::test]
async fn retry_recovers_from_transient_failures() {
    let data = random_object(100, 21);
    let inner = Arc::new(
        CountingSource::new(data.clone())
            .fail_first(2, ChunkSourceError::Transient("503".into())),
    );
    let source = RetryChunkSource::new(Arc::clone(&inner)).with_config(quick_retry(3));

    assert_eq!(source.fetch(10, 20).await.unwrap(), data.slice(10..30));
    assert_eq!(inner.calls(), 3);
}

#[tokio::test]
async fn retry_gives_up_after_max_retries() {
    let inner = Arc::new(
        CountingSource::new(random_object(100, 22))
            .fail_first(10, ChunkSourceError::Transient("503".into())),
    );
    let source = RetryChunkSource::new(Arc::clone(&inner))
        .max_retries(2)
        .retry_delay_ms(1);

    assert!(source.fetch(0, 10).await.unwrap_err().is_transient());
    assert_eq!(inner.calls(), 3);
}

#[tokio::test]
async fn retry_never_repeats_not_found_or_fatal() {
    for error in [
        ChunkSourceError::NotFound("404".into()),
        ChunkSourceError::Fatal("403".into()),
    ] {
        let inner = Arc::new(
            CountingSource::new(random_object(100, 23)).fail_first(5, error.clone()),
        );
        let source = RetryChunkSource::new(Arc::clone(&inner)).with_config(quick_retry(3));

        assert_eq!(source.fetch(0, 10).await.unwrap_err(), error);
        assert_eq!(inner.calls(), 1);
    }
}

#[tokio::test]
async fn streamer_over_retrying_source_completes() {
    let data = random_object(4096, 24);
    let inner = CountingSource::new(data.clone())
        .fail_first(2, ChunkSourceError::Transient("抖动".into()));
    let source: SharedChunkSource =
        Arc::new(RetryChunkSource::new(inner).with_config(quick_retry(3)));
    let streamer = Streamer::new(source, 1000, 4096).unwrap();

    let mut sink: Vec<u8> = Vec::new();
    streamer
        .stream_at(&CancellationToken::new(), 0, &mut sink)
        .await
        .unwrap();
    assert_eq!(sink, data.as_ref());
}

#[tokio::test]
async fn local_object_serves_ranges() {
    let data = random_object(10_000, 25);
    let path = temp_file("local_object.bin", &data).await;
    let config = StreamConfig::default().chunk_size(4096);

    let handler = open_local_object(&path, &config).await.unwrap();
    assert_eq!(handler.total_size(), 10_000);
    assert!(handler.labels().last_modified.is_some());

    let mut headers = HeaderMap::new();
    headers.insert(RANGE, HeaderValue::from_static("bytes=4000-8999"));
    let resp = handler.serve(&Method::GET, &headers).await;

    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()[CONTENT_LENGTH], "5000");
    assert_eq!(resp.headers()[CONTENT_RANGE], "bytes 4000-8999/10000");
    assert!(resp.headers().contains_key(LAST_MODIFIED));
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(body, data.slice(4000..9000));

    tokio::fs::remove_file(&path).await.unwrap();
}

#[tokio::test]
async fn local_object_rejects_directories_and_missing_files() {
    let config = StreamConfig::default();

    let err = open_local_object(std::env::temp_dir(), &config).await.unwrap_err();
    assert!(matches!(err, ResolveError::IsDir(_)));

    let missing = std::env::temp_dir().join("webdav_stream-definitely-missing.bin");
    let err = open_local_object(&missing, &config).await.unwrap_err();
    assert!(matches!(err, ResolveError::NotFound(_)));
}
