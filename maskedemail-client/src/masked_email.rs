use serde::{Deserialize, Serialize};

/// Masked Email (Fastmail extension)
///
/// The service assigns `id` and `email` at creation time; both are stable
/// afterwards. Set responses may return partial objects, so every non-id
/// field tolerates absence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskedEmail {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub state: MaskedEmailState,
    #[serde(rename = "forDomain")]
    #[serde(default)]
    pub for_domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "createdBy")]
    #[serde(default)]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(rename = "lastMessageAt")]
    #[serde(default)]
    pub last_message_at: Option<String>,
}

/// Masked Email lifecycle state (Fastmail extension)
///
/// Deletion is logical: the service marks an alias `deleted` rather than
/// erasing it, so listings can still surface deleted items.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaskedEmailState {
    #[default]
    Pending,
    Enabled,
    Disabled,
    Deleted,
}

impl MaskedEmailState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for MaskedEmailState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sparse patch for the user-editable masked email attributes.
///
/// `None` means "leave unchanged"; `Some("")` is a valid present value that
/// clears the field. Only present fields appear in the outgoing patch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateFields {
    pub fn new(domain: Option<String>, description: Option<String>) -> Self {
        Self {
            domain,
            description,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.domain.is_none() && self.description.is_none()
    }
}
