use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{CheckError, CheckResult};

/// Retrieves a remote document's body.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> CheckResult<Vec<u8>>;
}

/// Issues a single `GET`, no retries, with the client's default timeouts.
/// Only transport failures are errors; an error page is still a document.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        HttpFetcher { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CheckResult<Vec<u8>> {
        let network_error = |err: reqwest::Error| {
            warn!(url, error = %err, "fetch failed");
            CheckError::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        if status.is_success() {
            debug!(url, %status, "fetched");
        } else {
            warn!(url, %status, "non-success status, checking the body anyway");
        }

        let body = response.bytes().await.map_err(network_error)?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    /// Serves exactly one canned HTTP response and returns the URL to hit.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "{status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/index.html")
    }

    #[tokio::test]
    async fn test_fetch_body() {
        let url = serve_once("HTTP/1.1 200 OK", "<a href=\"#\">x</a>").await;
        let body = HttpFetcher::default().fetch(&url).await.unwrap();
        assert_eq!(body, b"<a href=\"#\">x</a>".to_vec());
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let url = serve_once("HTTP/1.1 404 Not Found", "<h1>Not Found</h1>").await;
        let body = HttpFetcher::default().fetch(&url).await.unwrap();
        assert_eq!(body, b"<h1>Not Found</h1>".to_vec());
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());
        drop(listener);

        let err = HttpFetcher::default().fetch(&url).await.unwrap_err();
        assert!(matches!(err, CheckError::Network { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
