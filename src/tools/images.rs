//! Web page image extractor.
//!
//! Either fetches `url` once (one GET, configured timeout, no retry) or
//! scans the supplied `html`, then lists every `<img>` with a source.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::FetchConfig;
use crate::error::{Error, ToolError};
use crate::html::{self, ImgTag};
use crate::params;
use crate::Request;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ImageParams {
    #[serde(deserialize_with = "params::text")]
    pub url: String,
    #[serde(deserialize_with = "params::text")]
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct ImageList {
    pub images: Vec<ImgTag>,
    pub count: usize,
    pub message: String,
}

impl ImageList {
    fn new(images: Vec<ImgTag>) -> Self {
        let count = images.len();
        Self { images, count, message: format!("Found {count} images") }
    }
}

/// Holds the shared HTTP client. Build once at startup and share via `Arc`.
pub struct ImageExtractor {
    client: reqwest::Client,
    max_page_size: u64,
}

impl ImageExtractor {
    pub fn new(cfg: &FetchConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.as_str())
            .connect_timeout(cfg.timeout())
            .timeout(cfg.timeout())
            .build()
            .map_err(Error::Client)?;
        Ok(Self { client, max_page_size: cfg.max_page_size })
    }

    pub async fn handle(&self, req: Request) -> Result<ImageList, ToolError> {
        let p: ImageParams = req.json()?;
        self.extract(&p.url, &p.html).await
    }

    /// `url` wins when both are given. Neither given is a validation error
    /// raised before any network access.
    pub async fn extract(&self, url: &str, html: &str) -> Result<ImageList, ToolError> {
        let url = url.trim();
        if url.is_empty() && html.is_empty() {
            return Err(ToolError::validation("URL or HTML content is required"));
        }

        if url.is_empty() {
            return Ok(ImageList::new(html::find_images(html)));
        }

        let page = parse_page_url(url)?;
        let body = self.fetch(&page).await?;
        let images = html::find_images(&body)
            .into_iter()
            .map(|img| resolve(&page, img))
            .collect::<Vec<_>>();

        debug!(url = %page, count = images.len(), "extracted images");
        Ok(ImageList::new(images))
    }

    /// Reads the page in chunks and gives up once it passes `max_page_size`.
    async fn fetch(&self, page: &Url) -> Result<String, ToolError> {
        let mut resp = self
            .client
            .get(page.clone())
            .send()
            .await
            .map_err(|e| fetch_failed(page, e))?;

        if !resp.status().is_success() {
            debug!(url = %page, status = resp.status().as_u16(), "non-success page, parsing anyway");
        }
        if resp.content_length().is_some_and(|n| n > self.max_page_size) {
            return Err(self.too_large(page));
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(|e| fetch_failed(page, e))? {
            if (body.len() + chunk.len()) as u64 > self.max_page_size {
                return Err(self.too_large(page));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    fn too_large(&self, page: &Url) -> ToolError {
        warn!(url = %page, max_page_size = self.max_page_size, "page too large");
        ToolError::Network(format!("Web page exceeds {} bytes", self.max_page_size))
    }
}

fn fetch_failed(page: &Url, e: reqwest::Error) -> ToolError {
    warn!(url = %page, error = %e, "page fetch failed");
    ToolError::Network(format!("Unable to fetch web page: {e}"))
}

fn parse_page_url(raw: &str) -> Result<Url, ToolError> {
    let url = Url::parse(raw).map_err(|e| ToolError::validation(format!("Invalid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ToolError::validation(format!(
            "Unsupported URL scheme `{other}`: only http and https are allowed"
        ))),
    }
}

/// Root-relative sources (`/img/a.png`, `//cdn/a.png`) are made absolute
/// against the page; every other source is returned untouched.
fn resolve(page: &Url, mut img: ImgTag) -> ImgTag {
    if img.src.starts_with('/') {
        if let Ok(abs) = page.join(&img.src) {
            img.src = abs.into();
        }
    }
    img
}
