use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::path::PathBuf;
use tracing::{error, info, instrument};

use crate::config::EmailConfig;

/// Email service errors
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("SMTP error: {0}")]
    SmtpError(String),

    #[error("Message building error: {0}")]
    MessageError(String),

    #[error("Address error: {0}")]
    AddressError(String),

    #[error("Attachment error: {0}")]
    AttachmentError(String),
}

/// One attachment bound to a file already persisted on disk
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    /// Filename shown to the recipient
    pub name: String,
    /// On-disk location the bytes are read from at send time
    pub path: PathBuf,
}

/// Outgoing email builder
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

impl OutgoingEmail {
    pub fn new(to: String, subject: String) -> Self {
        Self {
            to,
            subject,
            html_body: String::new(),
            attachments: Vec::new(),
        }
    }

    pub fn with_html_body(mut self, body: String) -> Self {
        self.html_body = body;
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<EmailAttachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// Delivery seam. `SmtpMailer` is the production implementation; tests
/// substitute recording fakes.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Single-attempt delivery; failures propagate to the caller.
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError>;
}

/// SMTP mail dispatcher holding one persistent async transport
pub struct SmtpMailer {
    pub config: EmailConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    #[instrument(skip(config), fields(host = %config.smtp_host, port = config.smtp_port))]
    pub fn new(config: EmailConfig) -> Result<Self, EmailError> {
        config
            .validate()
            .map_err(|e| EmailError::ConfigError(e.to_string()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .timeout(Some(std::time::Duration::from_secs(
                    config.connection_timeout_secs,
                )));

        if config.use_starttls {
            let tls_parameters = TlsParameters::new(config.smtp_host.clone())
                .map_err(|e| EmailError::ConfigError(format!("TLS configuration error: {}", e)))?;
            builder = builder.tls(Tls::Required(tls_parameters));
        } else {
            builder = builder.tls(Tls::None);
        }

        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.clone(),
        );
        let transport = builder.credentials(credentials).build();

        info!("SMTP mailer initialized");
        Ok(Self { config, transport })
    }

    /// Startup connectivity probe. A failure is logged and never fatal:
    /// the service keeps serving and each send reports its own error.
    pub async fn verify(&self) -> bool {
        match self.transport.test_connection().await {
            Ok(true) => {
                info!("Mail transporter ready ({})", self.config.get_smtp_url());
                true
            }
            Ok(false) => {
                error!("Mail transporter refused connection ({})", self.config.get_smtp_url());
                false
            }
            Err(e) => {
                error!("Error verifying mail transport: {}", e);
                false
            }
        }
    }

    fn sender_mailbox(&self) -> Result<Mailbox, EmailError> {
        format!("{} <{}>", self.config.from_name, self.config.smtp_username)
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid from address: {}", e)))
    }

    async fn build_message(&self, email: &OutgoingEmail) -> Result<Message, EmailError> {
        let from_mailbox = self.sender_mailbox()?;
        let to_mailbox: Mailbox = email
            .to
            .parse()
            .map_err(|e| EmailError::AddressError(format!("Invalid to address: {}", e)))?;

        let builder = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(&email.subject);

        let mut body = MultiPart::mixed().singlepart(
            SinglePart::builder()
                .header(ContentType::TEXT_HTML)
                .body(email.html_body.clone()),
        );

        for attachment in &email.attachments {
            let bytes = tokio::fs::read(&attachment.path).await.map_err(|e| {
                EmailError::AttachmentError(format!(
                    "Failed to read {}: {}",
                    attachment.path.display(),
                    e
                ))
            })?;
            let mime = mime_guess::from_path(&attachment.name).first_or_octet_stream();
            let content_type = ContentType::parse(mime.as_ref())
                .map_err(|e| EmailError::AttachmentError(format!("Invalid content type: {}", e)))?;
            body = body.singlepart(Attachment::new(attachment.name.clone()).body(bytes, content_type));
        }

        builder
            .multipart(body)
            .map_err(|e| EmailError::MessageError(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(to = %email.to, subject = %email.subject, attachments = email.attachments.len()))]
    async fn send(&self, email: OutgoingEmail) -> Result<(), EmailError> {
        if email.html_body.is_empty() {
            return Err(EmailError::MessageError(
                "No message body provided".to_string(),
            ));
        }

        let message = self.build_message(&email).await?;

        self.transport.send(message).await.map_err(|e| {
            error!("Failed to send email: {}", e);
            EmailError::SmtpError(format!("Failed to send email: {}", e))
        })?;

        info!("Email sent successfully");
        Ok(())
    }
}
