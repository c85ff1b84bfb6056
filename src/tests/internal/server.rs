//! 流式服务器测试：真实 TCP 监听 + reqwest 客户端。

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT_RANGES, ALLOW, CONTENT_LENGTH, CONTENT_RANGE, RANGE};

use crate::internal::chunk_source::structs::memory_chunk_source::MemoryChunkSource;
use crate::internal::http::structs::range_handler::RangeHandler;
use crate::internal::server::error::ServerError;
use crate::internal::server::structs::server_config::{DEFAULT_HOST, DEFAULT_PORT, ServerConfig};
use crate::internal::server::structs::stream_server::StreamServer;
use crate::internal::streamer::structs::streamer::Streamer;
use crate::tests::{CountingSource, init_test_logging, random_object, spawn_server};

fn memory_handler(data: bytes::Bytes, chunk_size: u64) -> RangeHandler<MemoryChunkSource> {
    let total = data.len() as u64;
    RangeHandler::new(Streamer::new(MemoryChunkSource::new(data), chunk_size, total).unwrap())
}

#[test]
fn server_config_addresses() {
    let config = ServerConfig::default();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:8080");

    let v6 = ServerConfig::default().host("::1").port(0);
    assert_eq!(v6.addr().unwrap().to_string(), "[::1]:0");

    let bad = ServerConfig::default().host("not a host");
    assert!(matches!(bad.addr(), Err(ServerError::InvalidAddress(_))));
}

#[tokio::test]
async fn serves_mounted_objects_by_name() {
    init_test_logging();
    let a = random_object(5220, 1);
    let b = random_object(70_000, 2);
    let server = StreamServer::new(ServerConfig::default())
        .mount("a.bin", memory_handler(a.clone(), 1024))
        .mount("b.bin", memory_handler(b.clone(), 4096));
    let mut names: Vec<String> = server.names().map(String::from).collect();
    names.sort();
    assert_eq!(names, ["a.bin", "b.bin"]);

    let (addr, shutdown, task) = spawn_server(server).await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/a.bin"))
        .header(RANGE, "bytes=512-")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()[CONTENT_RANGE], "bytes 512-5219/5220");
    assert_eq!(resp.headers()[ACCEPT_RANGES], "bytes");
    assert_eq!(resp.bytes().await.unwrap(), a.slice(512..));

    let resp = client.get(format!("http://{addr}/b.bin")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.bytes().await.unwrap(), b);

    let resp = client.get(format!("http://{addr}/missing.bin")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    shutdown.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn http_status_surface() {
    let data = random_object(5220, 3);
    let server = StreamServer::new(ServerConfig::default())
        .mount("a.bin", memory_handler(data, 1024));
    let (addr, shutdown, task) = spawn_server(server).await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/a.bin");

    let resp = client.head(&url).header(RANGE, "bytes=100-199").send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(resp.headers()[CONTENT_LENGTH], "100");
    assert!(resp.bytes().await.unwrap().is_empty());

    let resp = client.get(&url).header(RANGE, "bytes=10000-20000").send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(resp.headers()[CONTENT_RANGE], "bytes */5220");

    let resp = client.post(&url).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()[ALLOW], "GET, HEAD");

    shutdown.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn concurrent_clients_get_their_own_ranges() {
    let data = random_object(200_000, 4);
    let server = StreamServer::new(ServerConfig::default())
        .mount("big.bin", memory_handler(data.clone(), 8192));
    let (addr, shutdown, task) = spawn_server(server).await;
    let client = reqwest::Client::new();

    let starts = [0u64, 1, 8191, 8192, 100_000, 199_999];
    let requests = starts.map(|start| {
        let client = client.clone();
        let url = format!("http://{addr}/big.bin");
        tokio::spawn(async move {
            let resp = client
                .get(url)
                .header(RANGE, format!("bytes={start}-"))
                .send()
                .await
                .unwrap();
            (start, resp.bytes().await.unwrap())
        })
    });

    for request in requests {
        let (start, body) = request.await.unwrap();
        assert_eq!(body, data.slice(start as usize..), "start={start}");
    }

    shutdown.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn client_disconnect_stops_fetching() {
    let total = 1024 * 1024u64;
    let source = Arc::new(
        CountingSource::new(random_object(total as usize, 5)).with_delay(Duration::from_millis(5)),
    );
    let handler = RangeHandler::new(Streamer::new(Arc::clone(&source), 1024, total).unwrap())
        .with_pipe_capacity(4096);
    let server = StreamServer::new(ServerConfig::default()).mount("slow.bin", handler);
    let (addr, shutdown, task) = spawn_server(server).await;

    let resp = reqwest::get(format!("http://{addr}/slow.bin")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    drop(resp);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let calls = source.calls();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(source.calls(), calls);
    assert!(calls < 1024);

    shutdown.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test]
async fn shutdown_interrupts_in_flight_streams() {
    let total = 1024 * 1024u64;
    let source = CountingSource::new(random_object(total as usize, 6))
        .with_delay(Duration::from_millis(5));
    let handler = RangeHandler::new(Streamer::new(source, 1024, total).unwrap());
    let server = StreamServer::new(ServerConfig::default()).mount("slow.bin", handler);
    let (addr, shutdown, task) = spawn_server(server).await;

    let resp = reqwest::get(format!("http://{addr}/slow.bin")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(3), task)
        .await
        .expect("关闭应当中断在途传输")
        .unwrap()
        .unwrap();

    // 响应体被截断：要么读取报错，要么长度不足
    if let Ok(body) = resp.bytes().await {
        assert!((body.len() as u64) < total);
    }
}

#[tokio::test]
async fn run_binds_configured_address() {
    let data = random_object(10, 7);
    let server = StreamServer::new(ServerConfig::default().port(0))
        .mount("a.bin", memory_handler(data, 4));
    let shutdown = server.shutdown_token();
    let task = tokio::spawn(server.run());

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(3), task)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
