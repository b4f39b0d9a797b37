//! Integration tests for source acquisition.
//!
//! These tests cover:
//! - Reading local files
//! - Downloading over HTTP against a mock server
//! - Servers sending a bogus Content-Length
//! - Batch acquisition order and error collection

use std::io::Write;
use std::path::PathBuf;

use img2ascii::input::{read_file, Fetcher, Input};
use img2ascii::{Error, ErrorKind};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// === File Tests ===

#[tokio::test]
async fn test_read_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"GIF89a-ish bytes").unwrap();

    let data = read_file(file.path().to_path_buf()).await.unwrap();
    assert_eq!(data.bytes, b"GIF89a-ish bytes");
    assert_eq!(data.name, file.path().display().to_string());
}

#[tokio::test]
async fn test_missing_file_reports_name() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");

    let err = read_file(missing.clone()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.source_name(), Some(missing.display().to_string().as_str()));
    assert!(err.to_string().contains("missing.png"));
}

// === HTTP Tests ===

#[tokio::test]
async fn test_fetch_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cat.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3, 4]))
        .mount(&server)
        .await;

    let url = format!("{}/cat.png", server.uri());
    let fetcher = Fetcher::new().unwrap();
    let data = fetcher.acquire(&url).await.unwrap();

    assert_eq!(data.bytes, vec![1, 2, 3, 4]);
    assert_eq!(data.name, url);
}

#[tokio::test]
async fn test_fetch_not_found_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.gif"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/gone.gif", server.uri());
    let fetcher = Fetcher::new().unwrap();
    let err = fetcher.acquire(&url).await.unwrap_err();

    match &err {
        Error::Status { url: failed, status } => {
            assert_eq!(failed, &url);
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("Expected status error, got {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[tokio::test]
async fn test_fetch_unreachable_host() {
    // Nothing listens on port 9 of localhost
    let fetcher = Fetcher::new().unwrap();
    let err = fetcher.acquire("http://127.0.0.1:9/x.png").await.unwrap_err();
    assert!(matches!(err, Error::Fetch { .. }));
}

/// Serve one raw HTTP response on a local port and return its URL.
async fn serve_raw_response(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        let _ = socket.write_all(response).await;
        let _ = socket.shutdown().await;
    });
    format!("http://{}/huge.gif", addr)
}

#[tokio::test]
async fn test_bogus_content_length_fails_without_aborting() {
    let url = serve_raw_response(
        b"HTTP/1.1 200 OK\r\nContent-Length: 100000000000000\r\n\r\nGIF89a",
    )
    .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"sibling").unwrap();
    let args = vec![url, file.path().display().to_string()];

    let fetcher = Fetcher::new().unwrap();
    let results = fetcher.acquire_all(&args).await;

    assert!(matches!(results[0], Err(Error::Fetch { .. })));
    assert_eq!(results[1].as_ref().unwrap().bytes, b"sibling");
}

// === Batch Tests ===

#[tokio::test]
async fn test_acquire_all_keeps_order_and_collects_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"remote".to_vec()))
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"local").unwrap();

    let args = vec![
        format!("{}/a.png", server.uri()),
        "/definitely/not/here.png".to_string(),
        file.path().display().to_string(),
    ];

    let fetcher = Fetcher::new().unwrap();
    let results = fetcher.acquire_all(&args).await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().bytes, b"remote");
    assert!(matches!(results[1], Err(Error::Io { .. })));
    assert_eq!(results[2].as_ref().unwrap().bytes, b"local");
}

#[test]
fn test_input_parse() {
    assert!(matches!(Input::parse("https://example.com/a.gif"), Input::Url(_)));
    assert_eq!(Input::parse("a.gif"), Input::Path(PathBuf::from("a.gif")));
}
