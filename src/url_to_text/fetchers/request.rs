use log::{debug, info};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::error::ImportError;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; RecipeImporter/1.0)";

/// Checks that `raw` is an absolute http(s) URL. No network access.
pub fn validate_url(raw: &str) -> Result<Url, ImportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ImportError::InvalidUrl("URL is empty".to_string()));
    }

    let url =
        Url::parse(trimmed).map_err(|e| ImportError::InvalidUrl(format!("{trimmed}: {e}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(ImportError::InvalidUrl(format!("{trimmed}: missing host"))),
        scheme => Err(ImportError::InvalidUrl(format!(
            "{trimmed}: unsupported scheme '{scheme}'"
        ))),
    }
}

/// Single-attempt page fetcher with a bounded timeout.
pub struct RequestFetcher {
    client: Client,
    timeout: Duration,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self, ImportError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(10));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { client, timeout })
    }

    /// Fetches the page body. Timeouts, connection failures and non-2xx
    /// statuses surface as distinct errors; nothing is retried.
    pub async fn fetch(&self, url: &Url) -> Result<String, ImportError> {
        debug!("Fetching {} (timeout {:?})", url, self.timeout);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| self.classify(url, e))?;
        info!("Fetched {} bytes from {}", html.len(), url);
        Ok(html)
    }

    fn classify(&self, url: &Url, error: reqwest::Error) -> ImportError {
        if error.is_timeout() {
            ImportError::Timeout {
                url: url.to_string(),
                timeout: self.timeout,
            }
        } else if error.is_connect() {
            ImportError::Unreachable {
                url: url.to_string(),
                source: error,
            }
        } else {
            ImportError::FetchError(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://example.com/recipe").is_ok());
        assert!(validate_url("  http://example.com ").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_bad_input() {
        for raw in ["", "not a url", "ftp://example.com/r", "file:///etc/passwd", "example.com/r"] {
            let err = validate_url(raw).unwrap_err();
            assert!(err.is_client_error(), "{raw} should be a client error");
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_http_status() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(None, None).unwrap();
        let url = validate_url(&format!("{}/missing", server.url())).unwrap();
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, ImportError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/page")
            .with_status(200)
            .with_body("<html><body>hello</body></html>")
            .create_async()
            .await;

        let fetcher = RequestFetcher::new(Some(Duration::from_secs(5)), None).unwrap();
        let url = validate_url(&format!("{}/page", server.url())).unwrap();
        let body = fetcher.fetch(&url).await.unwrap();

        assert!(body.contains("hello"));
    }
}
