// jmap-client/src/lib.rs
pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::JmapClient;
pub use error::Error;
pub use http::{HttpClient, HttpError};
pub use types::{Account, ApiRequest, ApiResponse, MethodCall, MethodError, Session};

// Re-export reqwest client when feature is enabled
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
