use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Result, StoriesError};

/// HTTP verbs the stories client issues, abstracted over the underlying
/// transport. Implementations decode the response body as JSON and return
/// it unchanged; retries, caching, and authentication policy all live on
/// this side of the seam.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET against the versioned (`/v2`) API surface.
    async fn get_v2(&self, path: &str) -> Result<Value>;

    async fn put(&self, path: &str, body: Value) -> Result<Value>;

    async fn post(&self, path: &str, body: Value) -> Result<Value>;

    async fn patch(&self, path: &str, body: Value) -> Result<Value>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// `reqwest`-backed [`Transport`] against a single API base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the given API base, e.g. `https://api.example.org`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn url_v2(&self, path: &str) -> String {
        format!("{}/v2{}", self.base_url, path)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<Value> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StoriesError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_v2(&self, path: &str) -> Result<Value> {
        let url = self.url_v2(path);
        tracing::debug!(%url, "GET");
        self.execute(self.client.get(&url)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        self.execute(self.client.put(&url).json(&body)).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        self.execute(self.client.post(&url).json(&body)).await
    }

    async fn patch(&self, path: &str, body: Value) -> Result<Value> {
        let url = self.url(path);
        tracing::debug!(%url, "PATCH");
        self.execute(self.client.patch(&url).json(&body)).await
    }
}
