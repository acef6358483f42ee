//! Client for the public artworks REST API

use crate::constants::{ARTWORK_FIELDS, APP_NAME, APP_VERSION, MAX_PAGE_SIZE, REQUEST_TIMEOUT_SECS};
use crate::types::ArtworkPage;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid page number {0}")]
    InvalidPage(u32),
}

/// Anything that can hand out numbered (1-based) pages of artworks
pub trait PageSource: Send + Sync {
    fn fetch_page(&self, page: u32) -> impl Future<Output = Result<ArtworkPage, ApiError>> + Send;
}

#[derive(Clone)]
pub struct ArtworkClient {
    http: reqwest::Client,
    base_url: String,
    page_size: u32,
}

impl ArtworkClient {
    pub fn new(base_url: &str, page_size: u32) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", APP_NAME.replace(' ', "-"), APP_VERSION))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        })
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn artworks_url(&self) -> String {
        format!("{}/artworks", self.base_url)
    }
}

impl PageSource for ArtworkClient {
    async fn fetch_page(&self, page: u32) -> Result<ArtworkPage, ApiError> {
        if page == 0 {
            return Err(ApiError::InvalidPage(page));
        }

        let url = self.artworks_url();
        debug!(page, limit = self.page_size, "Fetching artworks page");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("page", page.to_string()),
                ("limit", self.page_size.to_string()),
                ("fields", ARTWORK_FIELDS.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(page, status = status.as_u16(), "Artworks request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.bytes().await?;
        let parsed: ArtworkPage = serde_json::from_slice(&body)?;
        debug!(
            page,
            rows = parsed.data.len(),
            total = parsed.pagination.total,
            "Artworks page received"
        );
        Ok(parsed)
    }
}
