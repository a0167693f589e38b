//! HTTP transport for the catalog
//!
//! The catalog client only needs "GET this path, give me status and body".
//! `Transport` is that seam; `HttpTransport` implements it with reqwest and
//! tests substitute a canned implementation.

use async_trait::async_trait;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::CatalogError;

/// Status code and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `path` (including any query string) on the catalog host
    async fn get(&self, path: &str) -> Result<HttpResponse, CatalogError>;
}

/// reqwest-backed transport bound to one host
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| CatalogError::Transport {
                path: config.catalog_base_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.catalog_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let transport_error = |e: reqwest::Error| CatalogError::Transport {
            path: path.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;

        Ok(HttpResponse { status, body })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let mut config = AppConfig::default();
        config.catalog_base_url = "https://openlibrary.org/".into();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url, "https://openlibrary.org");
    }

    #[test]
    fn test_only_200_is_ok() {
        assert!(HttpResponse::ok("{}").is_ok());
        assert!(!HttpResponse { status: 204, body: String::new() }.is_ok());
        assert!(!HttpResponse { status: 404, body: String::new() }.is_ok());
    }
}
