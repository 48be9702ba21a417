use anyhow::{anyhow, bail};
use lettre::{
    message::{header, MessageBuilder, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use portfolio_email_contracts::{Deliverer, Delivery, Email};
use portfolio_models::Sensitive;
use portfolio_utils::Apply;

pub use logging::LoggingDeliverer;

mod logging;

/// Delivers emails through an SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpDeliverer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

#[derive(Debug, Clone)]
pub struct SmtpDelivererConfig {
    pub host: String,
    pub port: u16,
    /// Use implicit TLS instead of upgrading the connection with STARTTLS.
    pub secure: bool,
    pub credentials: Option<SmtpCredentials>,
}

#[derive(Debug, Clone)]
pub struct SmtpCredentials {
    pub user: String,
    pub password: Sensitive<String>,
}

impl SmtpDeliverer {
    /// Set up the transport. No connection is opened until the first email is
    /// sent or the server is pinged.
    ///
    /// Must be called from within a Tokio runtime, as the connection pool
    /// spawns a background task.
    pub fn new(config: &SmtpDelivererConfig) -> anyhow::Result<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
        };

        let transport = builder
            .port(config.port)
            .apply_map(config.credentials.clone(), |builder, credentials| {
                builder.credentials(Credentials::new(credentials.user, credentials.password.0))
            })
            .build();

        Ok(Self { transport })
    }
}

impl Deliverer for SmtpDeliverer {
    async fn send(&self, email: Email) -> anyhow::Result<Delivery> {
        let message = build_message(email)?;

        let response = self.transport.send(message).await?;
        if !response.is_positive() {
            bail!("SMTP server rejected the message with code {}", response.code());
        }

        Ok(Delivery::Sent)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

fn build_message(email: Email) -> anyhow::Result<Message> {
    let builder = Message::builder()
        .from(email.from.0)
        .to(email.recipient.0)
        .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
        .subject(email.subject);

    let message = match email.body.html {
        Some(html) => builder.multipart(MultiPart::alternative_plain_html(email.body.text, html))?,
        None => builder
            .header(header::ContentType::TEXT_PLAIN)
            .body(email.body.text)?,
    };

    Ok(message)
}
