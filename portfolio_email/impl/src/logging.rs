use portfolio_email_contracts::{Deliverer, Delivery, Email};
use tracing::info;

/// Writes emails to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDeliverer;

impl Deliverer for LoggingDeliverer {
    async fn send(&self, email: Email) -> anyhow::Result<Delivery> {
        let Email {
            from,
            recipient,
            reply_to,
            subject,
            body,
        } = email;

        info!(
            %from,
            to = %recipient,
            reply_to = ?reply_to.map(|x| x.to_string()),
            %subject,
            body = %body.text,
            "Email would be sent (not delivered)"
        );

        Ok(Delivery::Logged)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
