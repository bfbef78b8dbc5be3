use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Attachment shipped with a notification email.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmailAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// One outbound notification email: the unit handed to the notification
/// sink. Delivery itself belongs to the external emailer worker.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EmailMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<EmailAttachment>,
}

/// An email sitting in the outbox.
#[derive(Clone, Debug, PartialEq)]
pub struct QueuedEmail {
    pub id: i32,
    pub message: EmailMessage,
    pub created_at: NaiveDateTime,
    pub sent_at: Option<NaiveDateTime>,
}
