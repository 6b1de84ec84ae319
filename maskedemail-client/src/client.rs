// maskedemail-client/src/client.rs
use jmap_client::{ApiRequest, Error, HttpClient, JmapClient, MethodCall, Session};

use crate::masked_email::{MaskedEmail, MaskedEmailState, UpdateFields};
use crate::methods;
use crate::methods::{MaskedEmailGetResponse, MaskedEmailSetResponse};

pub const FASTMAIL_SESSION_URL: &str = "https://api.fastmail.com/jmap/session";
pub const MASKED_EMAIL_CAPABILITY: &str = "https://www.fastmail.com/dev/maskedemail";
pub const JMAP_CORE_CAPABILITY: &str = "urn:ietf:params:jmap:core";

/// Resolve which account an operation targets.
///
/// A non-empty explicit id wins unchanged and is not validated against the
/// session; a bogus id surfaces later as a protocol error. Otherwise the
/// session's primary account for the masked email capability is used.
pub fn resolve_account(session: &Session, explicit: Option<&str>) -> Result<String, Error> {
    if let Some(id) = explicit.filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    session
        .default_account_for_capability(MASKED_EMAIL_CAPABILITY)
        .map(str::to_string)
        .ok_or_else(|| Error::NoAccount {
            capability: MASKED_EMAIL_CAPABILITY.to_string(),
        })
}

/// Client for the Fastmail masked email capability.
///
/// Synchronous in spirit: one in-flight request at a time, at most a session
/// fetch plus one operation call per CLI invocation. Holds no session state;
/// callers fetch a [`Session`] once and pass it to each operation.
pub struct MaskedEmailClient<C: HttpClient> {
    jmap: JmapClient<C>,
    app_name: String,
}

#[cfg(feature = "reqwest")]
impl MaskedEmailClient<jmap_client::ReqwestClient> {
    pub fn new(token: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self::with_http(
            jmap_client::ReqwestClient::new().with_token(token.into()),
            app_name,
        )
    }
}

impl<C: HttpClient> MaskedEmailClient<C> {
    pub fn with_http(http: C, app_name: impl Into<String>) -> Self {
        Self {
            jmap: JmapClient::new(http, FASTMAIL_SESSION_URL),
            app_name: app_name.into(),
        }
    }

    /// Point session discovery somewhere other than Fastmail. Used by tests
    /// against a mock server.
    pub fn with_session_url(mut self, url: impl Into<String>) -> Self {
        self.jmap = self.jmap.with_session_url(url);
        self
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Fetch the discovery document describing endpoint, accounts and
    /// capability grants.
    pub async fn session(&self) -> Result<Session, Error> {
        self.jmap.fetch_session().await
    }

    /// Create a new masked email for `for_domain`.
    ///
    /// With `enabled` false no state is sent and the service creates the
    /// alias as pending, to be confirmed before use.
    pub async fn create(
        &self,
        session: &Session,
        account_id: Option<&str>,
        for_domain: &str,
        enabled: bool,
        description: &str,
    ) -> Result<MaskedEmail, Error> {
        let account_id = resolve_account(session, account_id)?;
        let call = methods::create_call(&account_id, &self.app_name, for_domain, enabled, description);
        let set: MaskedEmailSetResponse = self.call(session, call).await?;
        set.created_item(methods::CREATE_REF)
    }

    pub async fn enable(
        &self,
        session: &Session,
        account_id: Option<&str>,
        email_id: &str,
    ) -> Result<(), Error> {
        self.update_state(session, account_id, email_id, MaskedEmailState::Enabled)
            .await
    }

    pub async fn disable(
        &self,
        session: &Session,
        account_id: Option<&str>,
        email_id: &str,
    ) -> Result<(), Error> {
        self.update_state(session, account_id, email_id, MaskedEmailState::Disabled)
            .await
    }

    /// Patch only the state of an existing alias. The set response is
    /// verified: the id must land in `updated`, otherwise the service's
    /// rejection is surfaced.
    pub async fn update_state(
        &self,
        session: &Session,
        account_id: Option<&str>,
        email_id: &str,
        state: MaskedEmailState,
    ) -> Result<(), Error> {
        let account_id = resolve_account(session, account_id)?;
        let call = methods::update_state_call(&account_id, email_id, state);
        let set: MaskedEmailSetResponse = self.call(session, call).await?;
        set.expect_updated(email_id)
    }

    /// Patch domain and/or description. Only fields marked present in
    /// `fields` are included; with neither present a no-op patch is still
    /// sent, which the service acknowledges as an update.
    pub async fn update_info(
        &self,
        session: &Session,
        account_id: Option<&str>,
        email_id: &str,
        fields: &UpdateFields,
    ) -> Result<(), Error> {
        let account_id = resolve_account(session, account_id)?;
        let call = methods::update_info_call(&account_id, email_id, fields);
        let set: MaskedEmailSetResponse = self.call(session, call).await?;
        set.expect_updated(email_id)
    }

    /// Delete an alias. The service marks it `deleted` rather than erasing
    /// it, so it can still appear in listings.
    pub async fn delete(
        &self,
        session: &Session,
        account_id: Option<&str>,
        email_id: &str,
    ) -> Result<(), Error> {
        let account_id = resolve_account(session, account_id)?;
        let call = methods::destroy_call(&account_id, email_id);
        let set: MaskedEmailSetResponse = self.call(session, call).await?;
        set.expect_destroyed(email_id)
    }

    /// All masked emails of the account, in service-provided order. Deleted
    /// items are included when the service returns them; filtering is a
    /// view-layer concern. An account with no aliases yields an empty list.
    pub async fn get_all(
        &self,
        session: &Session,
        account_id: Option<&str>,
    ) -> Result<Vec<MaskedEmail>, Error> {
        let account_id = resolve_account(session, account_id)?;
        let call = methods::get_all_call(&account_id);
        let get: MaskedEmailGetResponse = self.call(session, call).await?;
        Ok(get.list)
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        session: &Session,
        method_call: MethodCall,
    ) -> Result<T, Error> {
        let request = ApiRequest::new(
            vec![
                JMAP_CORE_CAPABILITY.to_string(),
                MASKED_EMAIL_CAPABILITY.to_string(),
            ],
            vec![method_call],
        );
        let response = self.jmap.send(session.api_endpoint(), &request).await?;
        methods::decode_args(response.single_response()?.arguments())
    }
}
