// maskedemail-client/src/methods.rs
//
// Method-call builders and typed response decoding for the masked email
// capability. Requests are built with `json!`; responses go through
// schema-validated structs so a shape mismatch is a decode error instead of
// a default-valued field.

use std::collections::HashMap;

use jmap_client::{Error, MethodCall};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::masked_email::{MaskedEmail, MaskedEmailState, UpdateFields};

pub(crate) const SET_METHOD: &str = "MaskedEmail/set";
pub(crate) const GET_METHOD: &str = "MaskedEmail/get";

// Single-call envelopes throughout, so a fixed correlation id suffices. The
// same id doubles as the creation reference key in `create` payloads.
pub(crate) const CALL_ID: &str = "0";
pub(crate) const CREATE_REF: &str = "0";

pub(crate) fn create_call(
    account_id: &str,
    created_by: &str,
    for_domain: &str,
    enabled: bool,
    description: &str,
) -> MethodCall {
    let mut attrs = json!({
        "forDomain": for_domain,
        "description": description,
        "createdBy": created_by,
    });
    // State is omitted when not enabling; the service then defaults the new
    // alias to pending.
    if enabled {
        attrs["state"] = json!("enabled");
    }

    MethodCall::new(
        SET_METHOD,
        json!({
            "accountId": account_id,
            "create": { CREATE_REF: attrs },
        }),
        CALL_ID,
    )
}

pub(crate) fn update_state_call(
    account_id: &str,
    email_id: &str,
    state: MaskedEmailState,
) -> MethodCall {
    MethodCall::new(
        SET_METHOD,
        json!({
            "accountId": account_id,
            "update": { email_id: { "state": state.as_str() } },
        }),
        CALL_ID,
    )
}

pub(crate) fn update_info_call(
    account_id: &str,
    email_id: &str,
    fields: &UpdateFields,
) -> MethodCall {
    MethodCall::new(
        SET_METHOD,
        json!({
            "accountId": account_id,
            "update": { email_id: fields },
        }),
        CALL_ID,
    )
}

pub(crate) fn destroy_call(account_id: &str, email_id: &str) -> MethodCall {
    MethodCall::new(
        SET_METHOD,
        json!({
            "accountId": account_id,
            "destroy": [email_id],
        }),
        CALL_ID,
    )
}

pub(crate) fn get_all_call(account_id: &str) -> MethodCall {
    MethodCall::new(
        GET_METHOD,
        json!({
            "accountId": account_id,
            "ids": null,
        }),
        CALL_ID,
    )
}

pub(crate) fn decode_args<T: DeserializeOwned>(args: &serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(args.clone()).map_err(|e| Error::Decode(e.to_string()))
}

/// Per-item rejection inside a set response (RFC 8620 SetError).
#[derive(Debug, Clone, Deserialize)]
pub struct SetError {
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<SetError> for Error {
    fn from(err: SetError) -> Self {
        Error::Service {
            error_type: err.error_type,
            description: err.description.unwrap_or_default(),
        }
    }
}

/// MaskedEmail/set response arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaskedEmailSetResponse {
    pub created: HashMap<String, MaskedEmail>,
    #[serde(rename = "notCreated")]
    pub not_created: HashMap<String, SetError>,
    pub updated: HashMap<String, Option<serde_json::Value>>,
    #[serde(rename = "notUpdated")]
    pub not_updated: HashMap<String, SetError>,
    pub destroyed: Vec<String>,
    #[serde(rename = "notDestroyed")]
    pub not_destroyed: HashMap<String, SetError>,
}

impl MaskedEmailSetResponse {
    /// The item created under `reference`, or the service's rejection.
    pub fn created_item(&self, reference: &str) -> Result<MaskedEmail, Error> {
        if let Some(item) = self.created.get(reference) {
            return Ok(item.clone());
        }
        if let Some(err) = self
            .not_created
            .get(reference)
            .or_else(|| self.not_created.values().next())
        {
            return Err(err.clone().into());
        }
        Err(Error::Decode(format!(
            "set response has no created or notCreated entry for {reference:?}"
        )))
    }

    /// Confirms the id landed in `updated`, surfacing `notUpdated` otherwise.
    pub fn expect_updated(&self, email_id: &str) -> Result<(), Error> {
        if self.updated.contains_key(email_id) {
            return Ok(());
        }
        if let Some(err) = self
            .not_updated
            .get(email_id)
            .or_else(|| self.not_updated.values().next())
        {
            return Err(err.clone().into());
        }
        Err(Error::Decode(format!(
            "set response has no updated or notUpdated entry for {email_id:?}"
        )))
    }

    /// Confirms the id landed in `destroyed`, surfacing `notDestroyed`
    /// otherwise.
    pub fn expect_destroyed(&self, email_id: &str) -> Result<(), Error> {
        if self.destroyed.iter().any(|id| id == email_id) {
            return Ok(());
        }
        if let Some(err) = self
            .not_destroyed
            .get(email_id)
            .or_else(|| self.not_destroyed.values().next())
        {
            return Err(err.clone().into());
        }
        Err(Error::Decode(format!(
            "set response has no destroyed or notDestroyed entry for {email_id:?}"
        )))
    }
}

/// MaskedEmail/get response arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MaskedEmailGetResponse {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub list: Vec<MaskedEmail>,
    #[serde(rename = "notFound")]
    pub not_found: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_call_enabled_sets_state() {
        let call = create_call("a1", "maskedemail-cli", "example.com", true, "shop");
        assert_eq!(call.name(), SET_METHOD);
        assert_eq!(
            *call.arguments(),
            json!({
                "accountId": "a1",
                "create": {
                    "0": {
                        "forDomain": "example.com",
                        "description": "shop",
                        "createdBy": "maskedemail-cli",
                        "state": "enabled"
                    }
                }
            })
        );
    }

    #[test]
    fn test_create_call_disabled_omits_state() {
        let call = create_call("a1", "maskedemail-cli", "example.com", false, "");
        let attrs = &call.arguments()["create"]["0"];
        assert!(attrs.get("state").is_none());
        assert_eq!(attrs["forDomain"], "example.com");
    }

    #[test]
    fn test_update_state_call_patches_only_state() {
        let call = update_state_call("a1", "m1", MaskedEmailState::Disabled);
        assert_eq!(
            *call.arguments(),
            json!({
                "accountId": "a1",
                "update": { "m1": { "state": "disabled" } }
            })
        );
    }

    #[test]
    fn test_update_info_call_with_no_fields_sends_empty_patch() {
        let call = update_info_call("a1", "m1", &UpdateFields::default());
        assert_eq!(
            *call.arguments(),
            json!({
                "accountId": "a1",
                "update": { "m1": {} }
            })
        );
    }

    #[test]
    fn test_destroy_call_shape() {
        let call = destroy_call("a1", "m1");
        assert_eq!(
            *call.arguments(),
            json!({"accountId": "a1", "destroy": ["m1"]})
        );
        assert!(call.arguments().get("update").is_none());
    }

    #[test]
    fn test_get_all_call_requests_null_ids() {
        let call = get_all_call("a1");
        assert_eq!(call.name(), GET_METHOD);
        assert_eq!(*call.arguments(), json!({"accountId": "a1", "ids": null}));
    }

    #[test]
    fn test_created_item_from_created_bucket() {
        let response: MaskedEmailSetResponse = serde_json::from_value(json!({
            "created": {
                "0": {"id": "x1", "email": "abc.example@mask.com", "state": "enabled"}
            }
        }))
        .unwrap();
        let email = response.created_item(CREATE_REF).unwrap();
        assert_eq!(email.id, "x1");
        assert_eq!(email.email, "abc.example@mask.com");
        assert_eq!(email.state, MaskedEmailState::Enabled);
    }

    #[test]
    fn test_created_item_surfaces_not_created() {
        let response: MaskedEmailSetResponse = serde_json::from_value(json!({
            "notCreated": {"0": {"type": "invalidProperties"}}
        }))
        .unwrap();
        match response.created_item(CREATE_REF) {
            Err(Error::Service { error_type, .. }) => {
                assert_eq!(error_type, "invalidProperties");
            }
            other => panic!("expected service error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_created_item_unrecognized_shape_is_decode_error() {
        let response: MaskedEmailSetResponse =
            serde_json::from_value(json!({"updated": {}})).unwrap();
        assert!(matches!(
            response.created_item(CREATE_REF),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_expect_updated_accepts_null_entry() {
        let response: MaskedEmailSetResponse =
            serde_json::from_value(json!({"updated": {"m1": null}})).unwrap();
        assert!(response.expect_updated("m1").is_ok());
    }

    #[test]
    fn test_expect_updated_surfaces_not_updated() {
        let response: MaskedEmailSetResponse = serde_json::from_value(json!({
            "notUpdated": {"m1": {"type": "notFound", "description": "no such alias"}}
        }))
        .unwrap();
        match response.expect_updated("m1") {
            Err(Error::Service {
                error_type,
                description,
            }) => {
                assert_eq!(error_type, "notFound");
                assert_eq!(description, "no such alias");
            }
            other => panic!("expected service error, got {other:?}"),
        }
    }

    #[test]
    fn test_expect_destroyed() {
        let response: MaskedEmailSetResponse =
            serde_json::from_value(json!({"destroyed": ["m1"]})).unwrap();
        assert!(response.expect_destroyed("m1").is_ok());
        assert!(matches!(
            response.expect_destroyed("m2"),
            Err(Error::Decode(_))
        ));
    }
}
