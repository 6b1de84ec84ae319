// jmap-client/src/client.rs
use crate::error::Error;
use crate::http::HttpClient;
use crate::types::{ApiRequest, ApiResponse, Session};

/// Low-level JMAP client: session discovery plus envelope send.
///
/// Holds no session state itself; callers fetch a [`Session`] once per
/// invocation and pass its endpoint to [`JmapClient::send`].
pub struct JmapClient<C: HttpClient> {
    http: C,
    session_url: String,
}

impl<C: HttpClient> JmapClient<C> {
    pub fn new(http: C, session_url: impl Into<String>) -> Self {
        Self {
            http,
            session_url: session_url.into(),
        }
    }

    pub fn session_url(&self) -> &str {
        &self.session_url
    }

    /// Override the discovery URL, e.g. to point at a mock server.
    pub fn with_session_url(mut self, url: impl Into<String>) -> Self {
        self.session_url = url.into();
        self
    }

    /// Fetch the session document from the discovery endpoint.
    pub async fn fetch_session(&self) -> Result<Session, Error> {
        let bytes = self.http.get(&self.session_url).await?;
        serde_json::from_slice(&bytes).map_err(Error::decode)
    }

    /// POST a request envelope to the API endpoint and decode the response
    /// envelope. Method-level outcomes are left to the caller.
    pub async fn send(&self, endpoint: &str, request: &ApiRequest) -> Result<ApiResponse, Error> {
        let body = serde_json::to_vec(request).map_err(Error::decode)?;
        let bytes = self.http.post_json(endpoint, body).await?;
        serde_json::from_slice(&bytes).map_err(Error::decode)
    }
}
