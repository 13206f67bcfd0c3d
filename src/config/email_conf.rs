use serde::{Deserialize, Serialize};
use std::env;
use tracing::{debug, error, warn};

use crate::config::ConfigError;

/// Email configuration for the SMTP relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// SMTP relay hostname
    pub smtp_host: String,
    /// SMTP relay port
    pub smtp_port: u16,
    /// SMTP account username, also used as the sender address
    pub smtp_username: String,
    /// SMTP account password
    pub smtp_password: String,
    /// Recipient of quote notifications
    pub notify_to: String,
    /// Display name used on outgoing mail
    pub from_name: String,
    /// Whether to negotiate STARTTLS with the relay
    pub use_starttls: bool,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl EmailConfig {
    /// Create EmailConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let smtp_host = env::var("EMAIL_HOST").map_err(|_| {
            error!("EMAIL_HOST environment variable not found");
            ConfigError::EnvVarNotFound("EMAIL_HOST".to_string())
        })?;
        debug!("SMTP host: {}", smtp_host);

        let smtp_port = env::var("EMAIL_PORT")
            .unwrap_or_else(|_| {
                warn!("EMAIL_PORT not set, defaulting to 587");
                "587".to_string()
            })
            .parse::<u16>()
            .map_err(|_| {
                error!("Invalid EMAIL_PORT value");
                ConfigError::InvalidValue("Invalid EMAIL_PORT value".to_string())
            })?;
        debug!("SMTP port: {}", smtp_port);

        let smtp_username = env::var("EMAIL_USER").map_err(|_| {
            error!("EMAIL_USER environment variable not found");
            ConfigError::EnvVarNotFound("EMAIL_USER".to_string())
        })?;

        let smtp_password = env::var("EMAIL_PASS").map_err(|_| {
            error!("EMAIL_PASS environment variable not found");
            ConfigError::EnvVarNotFound("EMAIL_PASS".to_string())
        })?;
        debug!("SMTP password: [REDACTED]");

        let notify_to = env::var("EMAIL_TO").unwrap_or_else(|_| {
            warn!("EMAIL_TO not set, notifications go to the sending account");
            smtp_username.clone()
        });
        debug!("Notification recipient: {}", notify_to);

        let from_name =
            env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "NOVAFORTE Website".to_string());

        let use_starttls = env::var("EMAIL_USE_STARTTLS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .unwrap_or(true);

        let connection_timeout_secs = env::var("EMAIL_CONNECTION_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()
            .unwrap_or(30);

        let config = EmailConfig {
            smtp_host,
            smtp_port,
            smtp_username,
            smtp_password,
            notify_to,
            from_name,
            use_starttls,
            connection_timeout_secs,
        };

        config.validate()?;
        Ok(config)
    }

    /// Create EmailConfig for testing
    pub fn from_test_env() -> Self {
        EmailConfig {
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: "test@example.com".to_string(),
            smtp_password: "test".to_string(),
            notify_to: "notify@example.com".to_string(),
            from_name: "Test App".to_string(),
            use_starttls: false,
            connection_timeout_secs: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smtp_host.is_empty() {
            return Err(ConfigError::ValidationError(
                "SMTP host cannot be empty".to_string(),
            ));
        }

        if self.smtp_port == 0 {
            return Err(ConfigError::ValidationError(
                "SMTP port cannot be 0".to_string(),
            ));
        }

        if self.smtp_username.is_empty() {
            return Err(ConfigError::ValidationError(
                "SMTP username cannot be empty".to_string(),
            ));
        }

        if self.smtp_password.is_empty() {
            return Err(ConfigError::ValidationError(
                "SMTP password cannot be empty".to_string(),
            ));
        }

        if !self.smtp_username.contains('@') {
            return Err(ConfigError::ValidationError(
                "Invalid sender email format".to_string(),
            ));
        }

        if !self.notify_to.contains('@') {
            return Err(ConfigError::ValidationError(
                "Invalid recipient email format".to_string(),
            ));
        }

        if self.connection_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "Connection timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Get SMTP server URL
    pub fn get_smtp_url(&self) -> String {
        format!("{}:{}", self.smtp_host, self.smtp_port)
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: "".to_string(),
            smtp_password: "".to_string(),
            notify_to: "".to_string(),
            from_name: "NOVAFORTE Website".to_string(),
            use_starttls: true,
            connection_timeout_secs: 30,
        }
    }
}
