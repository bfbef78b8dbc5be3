use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::email_outbox)]
/// A queued notification email waiting for the external emailer worker.
pub struct EmailJob {
    pub id: i32,
    pub recipients: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: Option<String>,
    pub attachment: Option<Vec<u8>>,
    pub created_at: NaiveDateTime,
    pub sent_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::email_outbox)]
/// Insertable form of [`EmailJob`].
pub struct NewEmailJob {
    pub recipients: String,
    pub subject: String,
    pub html_body: String,
    pub attachment_name: Option<String>,
    pub attachment: Option<Vec<u8>>,
    pub created_at: NaiveDateTime,
}
