//! Where the view gets its items and sends its submissions.

use std::future::Future;

use onemore_core::{ContentItem, Submission};
use reqwest::Url;
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;

use crate::error::ClientError;

/// Remote operations the view depends on.
///
/// Implemented over HTTP by [`HttpContentSource`]; tests substitute a
/// scripted source.
pub trait ContentSource: Send + Sync + 'static {
    /// One random item, avoiding `exclude` when the server can.
    fn fetch_one(
        &self,
        exclude: Option<&str>,
    ) -> impl Future<Output = Result<ContentItem, ClientError>> + Send;

    /// Queue `text` for review.
    fn submit(&self, text: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// [`ContentSource`] backed by the onemore-server HTTP API.
#[derive(Debug, Clone)]
pub struct HttpContentSource {
    client: reqwest::Client,
    base: Url,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpContentSource {
    /// `base` is the server root, e.g. `http://127.0.0.1:3000` or
    /// `https://example.org/onemore` behind a path prefix.
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!("{base} cannot be a base url")));
        }
        // Endpoints are joined relatively, so the prefix must end in a slash.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.error)
        .unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

impl ContentSource for HttpContentSource {
    async fn fetch_one(&self, exclude: Option<&str>) -> Result<ContentItem, ClientError> {
        let mut url = self.endpoint("api/one-more")?;
        if let Some(id) = exclude {
            url.query_pairs_mut().append_pair("exclude", id);
        }
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn submit(&self, text: &str) -> Result<(), ClientError> {
        let url = self.endpoint("api/submit")?;
        let response = self
            .client
            .post(url)
            .json(&Submission::new(text))
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}
