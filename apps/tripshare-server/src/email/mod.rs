//! Email delivery for invitation notices.
//!
//! [`EmailNotifier`] plugs a configured [`EmailProvider`] into the access service; the
//! service decides what to send and this module renders and mails it.

#[cfg(feature = "email-smtp")]
mod smtp;
mod templates;

pub use templates::EmailContent;

use std::sync::Arc;

use crate::config::{EmailConfig, EmailProviderConfig};
use async_trait::async_trait;
use thiserror::Error;
use tripshare_access::{Notice, Notifier, NotifyError};

/// Email sending error
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Trait for email providers
#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(
        &self,
        to: &str,
        content: &EmailContent,
        from_address: &str,
        from_name: Option<&str>,
    ) -> Result<(), EmailError>;
}

/// Create an email provider from configuration
pub fn create_provider(config: &EmailConfig) -> Result<Arc<dyn EmailProvider>, EmailError> {
    match &config.provider {
        #[cfg(feature = "email-smtp")]
        EmailProviderConfig::Smtp {
            host,
            port,
            username,
            password,
            use_tls,
        } => {
            let provider = smtp::SmtpProvider::new(
                host.clone(),
                *port,
                username.clone(),
                password.clone(),
                *use_tls,
            )?;
            Ok(Arc::new(provider))
        }
        #[cfg(not(feature = "email-smtp"))]
        EmailProviderConfig::Smtp { .. } => Err(EmailError::ProviderNotAvailable(
            "SMTP support not compiled in. Enable the 'email-smtp' feature.".to_string(),
        )),
    }
}

/// Renders access notices and mails them through a provider.
pub struct EmailNotifier {
    provider: Arc<dyn EmailProvider>,
    from_address: String,
    from_name: Option<String>,
}

impl EmailNotifier {
    pub fn new(
        provider: Arc<dyn EmailProvider>,
        from_address: String,
        from_name: Option<String>,
    ) -> Self {
        Self {
            provider,
            from_address,
            from_name,
        }
    }

    pub fn from_config(config: &EmailConfig) -> Result<Self, EmailError> {
        Ok(Self::new(
            create_provider(config)?,
            config.from_address.clone(),
            config.from_name.clone(),
        ))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn send(&self, to: &str, notice: &Notice) -> Result<(), NotifyError> {
        let content = EmailContent::for_notice(notice);
        self.provider
            .send(to, &content, &self.from_address, self.from_name.as_deref())
            .await
            .map_err(|e| NotifyError(e.to_string()))
    }
}
