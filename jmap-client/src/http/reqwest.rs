// jmap-client/src/http/reqwest.rs
use std::time::Duration;

use super::{HttpClient, HttpError};
use async_trait::async_trait;

/// Per-request timeout. The server is expected to answer well within this;
/// without it a dead connection would block the CLI indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[cfg(feature = "reqwest")]
pub struct ReqwestClient {
    inner: reqwest::Client,
    bearer_token: Option<String>,
}

#[cfg(feature = "reqwest")]
impl ReqwestClient {
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            bearer_token: None,
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.bearer_token = Some(token);
        self
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn execute(&self, req: reqwest::RequestBuilder) -> Result<Vec<u8>, HttpError> {
        let resp = req
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| HttpError {
                status: None,
                message: e.to_string(),
            })?;

        let status = resp.status();
        let is_success = status.is_success();
        let status_code = status.as_u16();

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| HttpError {
                status: Some(status_code),
                message: e.to_string(),
            })?
            .to_vec();

        // Non-2xx never reaches the JSON decoder; surface status and body.
        if !is_success {
            return Err(HttpError {
                status: Some(status_code),
                message: String::from_utf8_lossy(&bytes).to_string(),
            });
        }

        Ok(bytes)
    }
}

#[cfg(feature = "reqwest")]
impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "reqwest")]
#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_json(&self, url: &str, body: Vec<u8>) -> Result<Vec<u8>, HttpError> {
        let req = self
            .apply_auth(self.inner.post(url))
            .header("content-type", "application/json")
            .body(body);
        self.execute(req).await
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>, HttpError> {
        let req = self.apply_auth(self.inner.get(url));
        self.execute(req).await
    }
}
