use anyhow::Context;
use portfolio_config::{EmailConfig, Environment};
use portfolio_email_contracts::{Deliverer, Delivery, Email};
use portfolio_email_impl::{LoggingDeliverer, SmtpCredentials, SmtpDeliverer, SmtpDelivererConfig};
use tracing::{info, warn};

/// The deliverer selected for the current environment.
#[derive(Debug, Clone)]
pub enum EmailDeliverer {
    Smtp(SmtpDeliverer),
    Logging(LoggingDeliverer),
}

impl Deliverer for EmailDeliverer {
    async fn send(&self, email: Email) -> anyhow::Result<Delivery> {
        match self {
            Self::Smtp(deliverer) => deliverer.send(email).await,
            Self::Logging(deliverer) => deliverer.send(email).await,
        }
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match self {
            Self::Smtp(deliverer) => deliverer.ping().await,
            Self::Logging(deliverer) => deliverer.ping().await,
        }
    }
}

/// Set up email delivery: SMTP in production, logging everywhere else.
pub fn connect(environment: Environment, config: &EmailConfig) -> anyhow::Result<EmailDeliverer> {
    if !environment.is_production() {
        info!("Not running in production, emails will be logged instead of sent");
        return Ok(EmailDeliverer::Logging(LoggingDeliverer));
    }

    let credentials = match (&config.user, &config.password) {
        (Some(user), Some(password)) => Some(SmtpCredentials {
            user: user.clone(),
            password: password.clone(),
        }),
        (None, None) => None,
        _ => {
            warn!("Only one of EMAIL_USER and EMAIL_PASSWORD is set, connecting without credentials");
            None
        }
    };

    let config = SmtpDelivererConfig {
        host: config.host.clone(),
        port: config.port,
        secure: config.secure,
        credentials,
    };

    SmtpDeliverer::new(&config)
        .map(EmailDeliverer::Smtp)
        .with_context(|| format!("Failed to set up SMTP transport for {}", config.host))
}
