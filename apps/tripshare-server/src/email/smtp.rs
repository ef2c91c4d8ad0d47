//! SMTP email provider implementation.

use super::{EmailContent, EmailError, EmailProvider};
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// SMTP email provider.
pub struct SmtpProvider {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpProvider {
    /// Create a new SMTP provider.
    ///
    /// Port 465 uses implicit TLS; any other port negotiates STARTTLS when `use_tls` is set.
    /// Credentials are applied only when both username and password are present.
    pub fn new(
        host: String,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        use_tls: bool,
    ) -> Result<Self, EmailError> {
        let relay_error = |e: lettre::transport::smtp::Error| {
            EmailError::InvalidConfig(format!("SMTP relay error: {}", e))
        };

        let mut builder = if use_tls {
            let tls_params = TlsParameters::new(host.clone()).map_err(|e| {
                EmailError::InvalidConfig(format!("TLS configuration error: {}", e))
            })?;

            // 465 is implicit TLS, everything else negotiates STARTTLS
            if port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&host)
                    .map_err(relay_error)?
                    .port(port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                    .map_err(relay_error)?
                    .port(port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host).port(port)
        };

        if let (Some(user), Some(pass)) = (username, password) {
            builder = builder.credentials(Credentials::new(user, pass));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

/// Format a sender as `Name <address>`, or the bare address without a name.
fn mailbox(address: &str, name: Option<&str>) -> String {
    match name {
        Some(name) => format!("{} <{}>", name, address),
        None => address.to_string(),
    }
}

#[async_trait]
impl EmailProvider for SmtpProvider {
    async fn send(
        &self,
        to: &str,
        content: &EmailContent,
        from_address: &str,
        from_name: Option<&str>,
    ) -> Result<(), EmailError> {
        let message = Message::builder()
            .from(
                mailbox(from_address, from_name)
                    .parse()
                    .map_err(|e| EmailError::InvalidConfig(format!("Invalid from address: {}", e)))?,
            )
            .to(to
                .parse()
                .map_err(|e| EmailError::SendFailed(format!("Invalid to address: {}", e)))?)
            .subject(content.subject.clone())
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(content.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(content.html.clone()),
                    ),
            )
            .map_err(|e| EmailError::SendFailed(format!("Failed to build email: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}
