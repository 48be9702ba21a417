use std::future::Future;

use portfolio_models::email_address::EmailAddressWithName;

/// Capability to hand an [`Email`] over to whatever is responsible for
/// getting it into an inbox.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Deliverer: Send + Sync + 'static {
    /// Attempt to deliver the email exactly once.
    fn send(&self, email: Email) -> impl Future<Output = anyhow::Result<Delivery>> + Send;

    /// Check whether the underlying transport is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub from: EmailAddressWithName,
    pub recipient: EmailAddressWithName,
    pub reply_to: Option<EmailAddressWithName>,
    pub subject: String,
    pub body: EmailBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailBody {
    pub text: String,
    /// Optional html alternative of the text body.
    pub html: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Accepted by the mail server.
    Sent,
    /// Written to the log instead of being sent.
    Logged,
}

#[cfg(feature = "mock")]
impl MockDeliverer {
    pub fn with_send(mut self, email: Email, result: Delivery) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, email: Email, error: &'static str) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Err(anyhow::anyhow!(error)))));
        self
    }

    pub fn with_ping(mut self, ok: bool) -> Self {
        self.expect_ping().once().return_once(move || {
            Box::pin(std::future::ready(if ok {
                Ok(())
            } else {
                Err(anyhow::anyhow!("connection refused"))
            }))
        });
        self
    }
}
