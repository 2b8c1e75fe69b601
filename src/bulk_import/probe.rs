//! Remote media access for the importer

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::{
    config::ImportConfig,
    error::{AppError, AppResult},
};

/// Downloaded media
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Remote media lookups used while validating and building an import
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProbe: Send + Sync {
    /// Content type announced by a HEAD request, without parameters
    async fn content_type(&self, url: &str) -> AppResult<Option<String>>;

    /// Fetch the full body
    async fn download(&self, url: &str) -> AppResult<Download>;
}

/// `MediaProbe` over HTTP
#[derive(Debug, Clone)]
pub struct HttpMediaProbe {
    client: reqwest::Client,
}

impl HttpMediaProbe {
    pub fn new(config: &ImportConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl MediaProbe for HttpMediaProbe {
    async fn content_type(&self, url: &str) -> AppResult<Option<String>> {
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| AppError::ExternalFetch(format!("HEAD {url} failed: {e}")))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(bare_content_type);

        debug!(url, status = %response.status(), content_type = ?content_type, "Probed media");
        Ok(content_type)
    }

    async fn download(&self, url: &str) -> AppResult<Download> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::ExternalFetch(format!("GET {url} failed: {e}")))?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(bare_content_type);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalFetch(format!("GET {url} failed: {e}")))?;

        Ok(Download {
            bytes: bytes.to_vec(),
            content_type,
        })
    }
}

/// `image/png; charset=binary` -> `image/png`
fn bare_content_type(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or(value)
        .trim()
        .to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_content_type() {
        assert_eq!(bare_content_type("image/png"), "image/png");
        assert_eq!(bare_content_type("Video/MP4; codecs=avc1"), "video/mp4");
    }
}
