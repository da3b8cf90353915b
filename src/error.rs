//! Failure taxonomy for the clone pipeline.
//!
//! Every variant is terminal for the action that produced it. Variants carry the
//! URL, status and raw response body where one exists so the message shown to the
//! user is enough to diagnose the failure.

#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("session cookie `sid` not found for {0} (log in to the org in the browser first)")]
    CookieNotFound(String),

    #[error("cookie store lookup failed: {0}")]
    CookieStore(String),

    #[error("not authorized ({status}) for {label}: {body}")]
    Auth {
        label: String,
        status: u16,
        body: String,
    },

    #[error("unknown object type for key prefix `{key_prefix}` (record id {record_id})")]
    UnknownObjectType {
        key_prefix: String,
        record_id: String,
    },

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("field describe unavailable for {0}")]
    DescribeUnavailable(String),

    #[error("insert rejected for {object}: {body}")]
    InsertRejected { object: String, body: String },

    #[error("no pending record (select a source record first)")]
    NoPendingRecord,

    #[error("network error during {label}: {detail}")]
    Network { label: String, detail: String },

    #[error("extension storage error: {0}")]
    Storage(String),
}

impl CloneError {
    pub(crate) fn network(label: &str, detail: impl std::fmt::Display) -> Self {
        CloneError::Network {
            label: label.to_string(),
            detail: detail.to_string(),
        }
    }

    pub(crate) fn storage(err: anyhow::Error) -> Self {
        CloneError::Storage(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, CloneError>;
