// maskedemail-client/src/lib.rs
pub mod client;
pub mod masked_email;
pub mod methods;

pub use client::{
    resolve_account, MaskedEmailClient, FASTMAIL_SESSION_URL, JMAP_CORE_CAPABILITY,
    MASKED_EMAIL_CAPABILITY,
};
pub use masked_email::{MaskedEmail, MaskedEmailState, UpdateFields};
pub use methods::{MaskedEmailGetResponse, MaskedEmailSetResponse, SetError};

// Re-export protocol types for convenience
pub use jmap_client::{Error, Session};
