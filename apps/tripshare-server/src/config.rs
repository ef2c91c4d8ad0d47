//! Server configuration from environment variables.
//!
//! ```bash
//! # Links
//! TRIPSHARE_PUBLIC_URL=https://trips.example.com   # default http://localhost:8080
//!
//! # Timeouts and invitation defaults
//! TRIPSHARE_IO_TIMEOUT_SECS=10
//! TRIPSHARE_INVITE_DAYS=14                         # unset = invitations never expire
//!
//! # Provider: SMTP
//! TRIPSHARE_EMAIL_PROVIDER=smtp
//! SMTP_HOST=smtp.gmail.com
//! SMTP_PORT=587
//! SMTP_USERNAME=user@example.com
//! SMTP_PASSWORD=app_password
//! SMTP_USE_TLS=true
//!
//! # Sender config
//! TRIPSHARE_EMAIL_FROM=trips@example.com
//! TRIPSHARE_EMAIL_FROM_NAME="Tripshare"
//! ```

use std::env;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
const DEFAULT_IO_TIMEOUT_SECS: u64 = 10;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Base URL invitation and share links are built on
    pub public_url: String,
    /// Timeout for storage locks and email delivery
    pub io_timeout: Duration,
    /// Lifetime of invitations created without an explicit expiry
    pub default_invite_days: Option<u32>,
    /// `None` disables email; deliveries are then reported as not sent
    pub email: Option<EmailConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            io_timeout: Duration::from_secs(DEFAULT_IO_TIMEOUT_SECS),
            default_invite_days: None,
            email: None,
        }
    }
}

/// Email configuration for invitation notices
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub provider: EmailProviderConfig,
    pub from_address: String,
    pub from_name: Option<String>,
}

/// Email provider configuration
#[derive(Debug, Clone)]
pub enum EmailProviderConfig {
    Smtp {
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        use_tls: bool,
    },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid email provider: {0}. Expected 'smtp'")]
    InvalidProvider(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("Missing from address: TRIPSHARE_EMAIL_FROM is required when email is configured")]
    MissingFromAddress,

    #[error("SMTP provider requires SMTP_HOST")]
    SmtpMissingHost,
}

fn positive_number<T: std::str::FromStr + PartialOrd + Default>(
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) => match value.trim().parse::<T>() {
            Ok(n) if n > T::default() => Ok(Some(n)),
            _ => Err(ConfigError::InvalidNumber { var, value }),
        },
        Err(_) => Ok(None),
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let public_url =
            env::var("TRIPSHARE_PUBLIC_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_URL.to_string());
        let io_timeout = Duration::from_secs(
            positive_number::<u64>("TRIPSHARE_IO_TIMEOUT_SECS")?.unwrap_or(DEFAULT_IO_TIMEOUT_SECS),
        );
        let default_invite_days = positive_number::<u32>("TRIPSHARE_INVITE_DAYS")?;

        let Some(provider_type) = env::var("TRIPSHARE_EMAIL_PROVIDER").ok() else {
            return Ok(Self {
                public_url,
                io_timeout,
                default_invite_days,
                email: None,
            });
        };

        let provider = match provider_type.to_lowercase().as_str() {
            "smtp" => {
                let host = env::var("SMTP_HOST").map_err(|_| ConfigError::SmtpMissingHost)?;
                let port = match env::var("SMTP_PORT") {
                    Ok(raw) => raw
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidPort(raw.clone()))?,
                    Err(_) => 587,
                };
                let username = env::var("SMTP_USERNAME").ok();
                let password = env::var("SMTP_PASSWORD").ok();
                let use_tls = env::var("SMTP_USE_TLS")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(true); // TLS by default

                EmailProviderConfig::Smtp {
                    host,
                    port,
                    username,
                    password,
                    use_tls,
                }
            }
            other => return Err(ConfigError::InvalidProvider(other.to_string())),
        };

        let from_address =
            env::var("TRIPSHARE_EMAIL_FROM").map_err(|_| ConfigError::MissingFromAddress)?;
        let from_name = env::var("TRIPSHARE_EMAIL_FROM_NAME").ok();

        Ok(Self {
            public_url,
            io_timeout,
            default_invite_days,
            email: Some(EmailConfig {
                provider,
                from_address,
                from_name,
            }),
        })
    }
}
