use chrono::Utc;
use diesel::prelude::*;

use crate::domain::notification::{EmailAttachment, EmailMessage, QueuedEmail};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, OutboxReader, OutboxWriter};

impl OutboxWriter for DieselRepository {
    fn enqueue_email(&self, message: &EmailMessage) -> RepositoryResult<i32> {
        use crate::models::outbox::{EmailJob as DbEmailJob, NewEmailJob as DbNewEmailJob};
        use crate::schema::email_outbox;

        let mut conn = self.conn()?;
        let job = DbNewEmailJob {
            recipients: serde_json::to_string(&message.recipients)
                .unwrap_or_else(|_| "[]".to_string()),
            subject: message.subject.clone(),
            html_body: message.html_body.clone(),
            attachment_name: message.attachment.as_ref().map(|a| a.file_name.clone()),
            attachment: message.attachment.as_ref().map(|a| a.bytes.clone()),
            created_at: Utc::now().naive_utc(),
        };

        let created = diesel::insert_into(email_outbox::table)
            .values(&job)
            .get_result::<DbEmailJob>(&mut conn)?;

        Ok(created.id)
    }
}

impl OutboxReader for DieselRepository {
    fn list_pending_emails(&self) -> RepositoryResult<Vec<QueuedEmail>> {
        use crate::models::outbox::EmailJob as DbEmailJob;
        use crate::schema::email_outbox;

        let mut conn = self.conn()?;
        let jobs = email_outbox::table
            .filter(email_outbox::sent_at.is_null())
            .order(email_outbox::id.asc())
            .load::<DbEmailJob>(&mut conn)?;

        Ok(jobs
            .into_iter()
            .map(|job| QueuedEmail {
                id: job.id,
                message: EmailMessage {
                    recipients: serde_json::from_str(&job.recipients).unwrap_or_default(),
                    subject: job.subject,
                    html_body: job.html_body,
                    attachment: match (job.attachment_name, job.attachment) {
                        (Some(file_name), Some(bytes)) => {
                            Some(EmailAttachment { file_name, bytes })
                        }
                        _ => None,
                    },
                },
                created_at: job.created_at,
                sent_at: job.sent_at,
            })
            .collect())
    }
}
