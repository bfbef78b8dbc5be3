//! Best-effort downstream integrations invoked after a document is rendered.
//!
//! Each sink fails independently; callers log and continue. None of them can
//! roll back or retry an already-completed render.

use thiserror::Error;

use crate::domain::notification::EmailMessage;
use crate::repository::errors::RepositoryError;

pub mod document;
pub mod email;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("document store error: {0}")]
    Io(#[from] std::io::Error),

    #[error("outbox error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Stored document handle: a stable identifier plus a retrievable URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredDocument {
    pub id: String,
    pub url: String,
}

/// Persists rendered document bytes under a generated key.
pub trait DocumentStore {
    fn store(&self, bytes: &[u8], file_name: &str) -> Result<StoredDocument, SinkError>;
}

/// Hands a notification email to whatever delivers it. Fire-and-forget from
/// the order flow's point of view.
pub trait NotificationSink {
    fn send(&self, message: &EmailMessage) -> Result<(), SinkError>;
}
