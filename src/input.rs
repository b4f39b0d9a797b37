//! Acquisition of image bytes from files, URLs and standard input.

use std::path::PathBuf;
use std::time::Duration;

use futures_util::future::join_all;
use futures_util::StreamExt;
use reqwest::Url;
use tokio::io::AsyncReadExt;

use crate::error::Error;

/// Source name used for data read from standard input.
pub const STDIN_NAME: &str = "stdin";

/// Default timeout for a whole download.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default timeout for establishing a connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for preallocating a download buffer from Content-Length.
pub const MAX_PREALLOC: u64 = 8 * 1024 * 1024;

/// Raw bytes of one source together with its display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Where a command-line argument points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Url(Url),
}

impl Input {
    /// `http` and `https` URLs are fetched; everything else is a file path.
    pub fn parse(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Input::Url(url),
            _ => Input::Path(PathBuf::from(arg)),
        }
    }
}

/// Fetches sources over HTTP and from the filesystem.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http_client: reqwest::Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;
        Ok(Self { http_client })
    }

    /// Read the bytes behind one command-line argument.
    pub async fn acquire(&self, arg: &str) -> Result<ImageData, Error> {
        match Input::parse(arg) {
            Input::Url(url) => self.fetch(url).await,
            Input::Path(path) => read_file(path).await,
        }
    }

    /// Acquire every argument concurrently. Results keep argument order and
    /// one failure does not stop the others.
    pub async fn acquire_all(&self, args: &[String]) -> Vec<Result<ImageData, Error>> {
        join_all(args.iter().map(|arg| self.acquire(arg))).await
    }

    /// Download `url`, failing on non-success status codes.
    pub async fn fetch(&self, url: Url) -> Result<ImageData, Error> {
        let name = url.to_string();
        let fetch_error = |source: reqwest::Error| Error::Fetch {
            url: name.clone(),
            source,
        };

        log::info!("downloading {}", name);
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(fetch_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: name.clone(),
                status,
            });
        }

        // Content-Length is only a hint; the server may lie about it
        let hint = response.content_length().unwrap_or(0).min(MAX_PREALLOC);
        let mut bytes = Vec::with_capacity(hint as usize);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            bytes.extend_from_slice(&chunk.map_err(fetch_error)?);
        }

        log::debug!("downloaded {} bytes from {}", bytes.len(), name);
        Ok(ImageData { name, bytes })
    }
}

/// Read a local file.
pub async fn read_file(path: PathBuf) -> Result<ImageData, Error> {
    let name = path.display().to_string();
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(ImageData { name, bytes }),
        Err(source) => Err(Error::Io { name, source }),
    }
}

/// Read standard input to the end.
pub async fn read_stdin() -> Result<ImageData, Error> {
    let mut bytes = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut bytes)
        .await
        .map_err(|source| Error::Io {
            name: STDIN_NAME.to_string(),
            source,
        })?;
    Ok(ImageData {
        name: STDIN_NAME.to_string(),
        bytes,
    })
}
