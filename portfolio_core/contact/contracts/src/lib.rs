use std::future::Future;

use portfolio_models::contact::{ContactForm, ContactFormError};
use serde::Serialize;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactService: Send + Sync + 'static {
    /// Validate a submitted contact form and relay it to the site owner.
    ///
    /// Every call is a single, independent delivery attempt.
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactDelivery, ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactDelivery {
    /// The message was handed to the mail server.
    Sent,
    /// The message was written to the log instead of being sent.
    Logged,
}

impl ContactDelivery {
    pub fn detail(self) -> &'static str {
        match self {
            Self::Sent => "Email sent successfully!",
            Self::Logged => "Email sent successfully! (Development mode - email logged to console)",
        }
    }
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Invalid form data. Please check your inputs.")]
    InvalidForm(#[source] ContactFormError),
    #[error("Failed to send email. Please try again later.")]
    Delivery,
}

/// Caller-facing summary of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub success: bool,
    pub detail: String,
}

impl From<&Result<ContactDelivery, ContactSubmitError>> for SubmissionResult {
    fn from(value: &Result<ContactDelivery, ContactSubmitError>) -> Self {
        match value {
            Ok(delivery) => Self {
                success: true,
                detail: delivery.detail().into(),
            },
            Err(err) => Self {
                success: false,
                detail: err.to_string(),
            },
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactService {
    pub fn with_submit(
        mut self,
        form: ContactForm,
        result: Result<ContactDelivery, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
