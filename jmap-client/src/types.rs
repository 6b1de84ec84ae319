// jmap-client/src/types.rs
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Error;

/// JMAP Session resource (RFC 8620 Section 2)
///
/// A snapshot of server metadata and the accounts available to the
/// credentials used for discovery. Immutable once fetched; lookups are
/// read-only views and the client never refreshes it within one invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// The URL to use for JMAP API requests
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    /// The accounts available to the user
    #[serde(default)]
    pub accounts: HashMap<String, Account>,
    /// Default account per capability URI
    #[serde(rename = "primaryAccounts")]
    #[serde(default)]
    pub primary_accounts: HashMap<String, String>,
}

impl Session {
    /// The base URL subsequent method calls must target.
    pub fn api_endpoint(&self) -> &str {
        &self.api_url
    }

    /// True iff the account advertises the capability URI.
    pub fn account_has_capability(&self, account_id: &str, capability_uri: &str) -> bool {
        self.accounts
            .get(account_id)
            .map(|acc| acc.capabilities.contains_key(capability_uri))
            .unwrap_or(false)
    }

    /// The service-designated primary account for the capability, if any.
    pub fn default_account_for_capability(&self, capability_uri: &str) -> Option<&str> {
        self.primary_accounts
            .get(capability_uri)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "isPersonal")]
    #[serde(default)]
    pub is_personal: bool,
    #[serde(rename = "accountCapabilities")]
    #[serde(default)]
    pub capabilities: HashMap<String, serde_json::Value>,
}

/// One method call inside a request envelope, on the wire a 3-tuple of
/// `[name, arguments, callId]`. The call id is client-chosen and correlates
/// a method response with its request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall(pub String, pub serde_json::Value, pub String);

impl MethodCall {
    pub fn new(
        name: impl Into<String>,
        arguments: serde_json::Value,
        call_id: impl Into<String>,
    ) -> Self {
        Self(name.into(), arguments, call_id.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn arguments(&self) -> &serde_json::Value {
        &self.1
    }

    pub fn call_id(&self) -> &str {
        &self.2
    }
}

/// Request envelope: capabilities used plus ordered method calls.
#[derive(Debug, Clone, Serialize)]
pub struct ApiRequest {
    pub using: Vec<String>,
    #[serde(rename = "methodCalls")]
    pub method_calls: Vec<MethodCall>,
}

impl ApiRequest {
    pub fn new(using: Vec<String>, method_calls: Vec<MethodCall>) -> Self {
        Self {
            using,
            method_calls,
        }
    }
}

/// Response envelope: ordered method responses keyed by call id.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "methodResponses")]
    pub method_responses: Vec<MethodCall>,
}

/// Arguments of a method response named `error` (RFC 8620 Section 3.6.1).
#[derive(Debug, Clone, Deserialize)]
pub struct MethodError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ApiResponse {
    /// The single method response of a one-call request.
    ///
    /// A response named `error` is surfaced as a service error rather than
    /// being decoded as data; an empty response list is a decode error.
    pub fn single_response(&self) -> Result<&MethodCall, Error> {
        let call = self
            .method_responses
            .first()
            .ok_or_else(|| Error::Decode("response contains no method responses".into()))?;

        if call.name() == "error" {
            let err: MethodError =
                serde_json::from_value(call.arguments().clone()).map_err(Error::decode)?;
            return Err(Error::Service {
                error_type: err.error_type,
                description: err.description.unwrap_or_default(),
            });
        }

        Ok(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session_fixture() -> Session {
        serde_json::from_value(json!({
            "apiUrl": "https://api.example.com/jmap/api",
            "accounts": {
                "a1": {
                    "name": "Alice",
                    "isPersonal": true,
                    "accountCapabilities": {
                        "urn:ietf:params:jmap:core": {},
                        "https://www.fastmail.com/dev/maskedemail": {}
                    }
                },
                "a2": {
                    "name": "Shared",
                    "accountCapabilities": {
                        "urn:ietf:params:jmap:core": {}
                    }
                }
            },
            "primaryAccounts": {
                "https://www.fastmail.com/dev/maskedemail": "a1"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_account_has_capability() {
        let session = session_fixture();
        assert!(session.account_has_capability("a1", "https://www.fastmail.com/dev/maskedemail"));
        assert!(!session.account_has_capability("a2", "https://www.fastmail.com/dev/maskedemail"));
        assert!(!session.account_has_capability("missing", "urn:ietf:params:jmap:core"));
    }

    #[test]
    fn test_default_account_for_capability() {
        let session = session_fixture();
        assert_eq!(
            session.default_account_for_capability("https://www.fastmail.com/dev/maskedemail"),
            Some("a1")
        );
        assert_eq!(
            session.default_account_for_capability("urn:ietf:params:jmap:mail"),
            None
        );
    }

    #[test]
    fn test_request_envelope_shape() {
        let request = ApiRequest::new(
            vec!["urn:ietf:params:jmap:core".into()],
            vec![MethodCall::new(
                "MaskedEmail/get",
                json!({"accountId": "a1", "ids": null}),
                "0",
            )],
        );
        let encoded = serde_json::to_value(&request).unwrap();
        assert_eq!(
            encoded,
            json!({
                "using": ["urn:ietf:params:jmap:core"],
                "methodCalls": [
                    ["MaskedEmail/get", {"accountId": "a1", "ids": null}, "0"]
                ]
            })
        );
    }

    #[test]
    fn test_single_response_extracts_payload() {
        let response: ApiResponse = serde_json::from_value(json!({
            "methodResponses": [
                ["MaskedEmail/get", {"list": []}, "0"]
            ]
        }))
        .unwrap();
        let call = response.single_response().unwrap();
        assert_eq!(call.name(), "MaskedEmail/get");
        assert_eq!(call.call_id(), "0");
    }

    #[test]
    fn test_single_response_surfaces_method_error() {
        let response: ApiResponse = serde_json::from_value(json!({
            "methodResponses": [
                ["error", {"type": "unknownMethod", "description": "nope"}, "0"]
            ]
        }))
        .unwrap();
        match response.single_response() {
            Err(Error::Service {
                error_type,
                description,
            }) => {
                assert_eq!(error_type, "unknownMethod");
                assert_eq!(description, "nope");
            }
            other => panic!("expected service error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_single_response_empty_is_decode_error() {
        let response: ApiResponse =
            serde_json::from_value(json!({"methodResponses": []})).unwrap();
        assert!(matches!(
            response.single_response(),
            Err(Error::Decode(_))
        ));
    }
}
