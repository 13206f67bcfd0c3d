use novaforte_backend::config::EmailConfig;
use novaforte_backend::util::email::{EmailAttachment, EmailError, OutgoingEmail, SmtpMailer};

/// Create test email config
fn create_test_config() -> EmailConfig {
    EmailConfig::from_test_env()
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_mailer_creation() {
        let config = create_test_config();
        let mailer = SmtpMailer::new(config).expect("Failed to create test mailer");
        assert_eq!(mailer.config.smtp_host, "localhost");
        assert_eq!(mailer.config.smtp_port, 1025);
    }

    #[test]
    fn test_outgoing_email_creation() {
        let email = OutgoingEmail::new(
            "notify@example.com".to_string(),
            "Test Subject".to_string(),
        );

        assert_eq!(email.to, "notify@example.com");
        assert_eq!(email.subject, "Test Subject");
        assert!(email.html_body.is_empty());
        assert!(email.attachments.is_empty());
    }

    #[test]
    fn test_outgoing_email_with_body_and_attachments() {
        let email = OutgoingEmail::new(
            "notify@example.com".to_string(),
            "Test Subject".to_string(),
        )
        .with_html_body("<h1>Nueva solicitud</h1>".to_string())
        .with_attachments(vec![EmailAttachment {
            name: "femur.stl".to_string(),
            path: "uploads/123-456.stl".into(),
        }]);

        assert_eq!(email.html_body, "<h1>Nueva solicitud</h1>");
        assert_eq!(email.attachments.len(), 1);
        assert_eq!(email.attachments[0].name, "femur.stl");
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn test_email_error_types() {
        let errors = vec![
            EmailError::ConfigError("Config error".to_string()),
            EmailError::SmtpError("SMTP error".to_string()),
            EmailError::MessageError("Message error".to_string()),
            EmailError::AddressError("Address error".to_string()),
            EmailError::AttachmentError("Attachment error".to_string()),
        ];

        for error in errors {
            assert!(!format!("{}", error).is_empty());
            assert!(!format!("{:?}", error).is_empty());
        }
    }

    #[test]
    fn test_invalid_config_creation() {
        let mut config = create_test_config();
        config.smtp_host = "".to_string();

        let result = SmtpMailer::new(config);
        assert!(result.is_err());
        if let Err(error) = result {
            assert!(matches!(error, EmailError::ConfigError(_)));
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_from_test_env() {
        let config = EmailConfig::from_test_env();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
        assert_eq!(config.smtp_username, "test@example.com");
        assert_eq!(config.notify_to, "notify@example.com");
        assert!(!config.use_starttls);
    }

    #[test]
    fn test_config_validation() {
        let config = create_test_config();
        assert!(config.validate().is_ok());
    }
}
