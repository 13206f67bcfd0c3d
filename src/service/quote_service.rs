use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::config::StorageConfig;
use crate::model::QuoteSubmission;
use crate::util::email::{EmailAttachment, Mailer, OutgoingEmail};
use crate::util::error::ServiceError;
use crate::util::notification::{quote_notification_html, QUOTE_SUBJECT};
use crate::util::upload::{ReceivedForm, UploadPolicy};

#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Compose and dispatch the notification email for one submission.
    async fn register_quote(&self, form: ReceivedForm) -> Result<(), ServiceError>;
}

pub struct QuoteServiceImpl {
    uploads: UploadPolicy,
    mailer: Arc<dyn Mailer>,
    notify_to: String,
}

impl QuoteServiceImpl {
    pub fn new(storage: &StorageConfig, mailer: Arc<dyn Mailer>, notify_to: String) -> Self {
        QuoteServiceImpl {
            uploads: UploadPolicy::quote_attachments(storage),
            mailer,
            notify_to,
        }
    }

    pub fn upload_policy(&self) -> &UploadPolicy {
        &self.uploads
    }
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
    #[instrument(skip(self, form), fields(files = form.files.len()))]
    async fn register_quote(&self, form: ReceivedForm) -> Result<(), ServiceError> {
        let submission = QuoteSubmission::from_form(form.fields, form.files);
        info!(
            name = submission.name.as_deref().unwrap_or("-"),
            email = submission.email.as_deref().unwrap_or("-"),
            service_type = submission.service_type.as_deref().unwrap_or("-"),
            urgency = submission.urgency.as_deref().unwrap_or("-"),
            "New quote submission"
        );

        let html = quote_notification_html(&submission);
        let attachments = submission
            .files
            .iter()
            .map(|file| EmailAttachment {
                name: file.original_name.clone(),
                path: file.path.clone(),
            })
            .collect();

        let email = OutgoingEmail::new(self.notify_to.clone(), QUOTE_SUBJECT.to_string())
            .with_html_body(html)
            .with_attachments(attachments);

        match self.mailer.send(email).await {
            Ok(()) => {
                info!("Quote notification sent");
                Ok(())
            }
            Err(e) => {
                error!("Failed to send quote notification: {e}");
                Err(ServiceError::from(e))
            }
        }
    }
}
