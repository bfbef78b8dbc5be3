use crate::domain::notification::EmailMessage;
use crate::repository::{DieselRepository, OutboxWriter};
use crate::sinks::{NotificationSink, SinkError};

/// Notification sink backed by the `email_outbox` table. The web process
/// only queues; an external emailer worker drains the table and performs the
/// actual delivery.
#[derive(Clone)]
pub struct OutboxNotifier {
    repo: DieselRepository,
}

impl OutboxNotifier {
    pub fn new(repo: DieselRepository) -> Self {
        Self { repo }
    }
}

impl NotificationSink for OutboxNotifier {
    fn send(&self, message: &EmailMessage) -> Result<(), SinkError> {
        let id = self.repo.enqueue_email(message)?;
        log::info!("Queued notification email #{id} to {} recipient(s)", message.recipients.len());
        Ok(())
    }
}
