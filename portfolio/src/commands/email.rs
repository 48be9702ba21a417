use anyhow::Context;
use clap::Subcommand;
use portfolio_config::Config;
use portfolio_email_contracts::{Deliverer, Delivery, Email, EmailBody};
use portfolio_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test email through the configured transport
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let deliverer = email::connect(config.environment, &config.email)?;

    let delivery = deliverer
        .send(Email {
            from: config.email.from.unwrap_or_else(|| recipient.clone()),
            recipient,
            reply_to: None,
            subject: "Email Deliverability Test".into(),
            body: EmailBody {
                text: "Email deliverability seems to be working!".into(),
                html: None,
            },
        })
        .await
        .context("Failed to send email")?;

    match delivery {
        Delivery::Sent => info!("Test email sent"),
        Delivery::Logged => info!("Not running in production, test email was only logged"),
    }

    Ok(())
}
