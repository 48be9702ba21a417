use std::sync::Arc;

use portfolio_core_contact_contracts::{ContactDelivery, ContactService, ContactSubmitError};
use portfolio_email_contracts::{Deliverer, Delivery, Email, EmailBody};
use portfolio_models::{
    contact::{ContactForm, ContactMessage},
    email_address::EmailAddressWithName,
};
use portfolio_templates_contracts::{ContactTemplate, TemplateService};
use tracing::{debug, error};

pub const SUBJECT_PREFIX: &str = "Portfolio Contact: ";

#[derive(Debug, Clone)]
pub struct ContactServiceImpl<Deliverer, Template> {
    deliverer: Deliverer,
    template: Template,
    config: ContactServiceConfig,
}

#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Sender of relayed messages. Falls back to the author's address if unset.
    pub from: Option<Arc<EmailAddressWithName>>,
    /// Inbox of the site owner.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<D, T> ContactServiceImpl<D, T> {
    pub fn new(deliverer: D, template: T, config: ContactServiceConfig) -> Self {
        Self {
            deliverer,
            template,
            config,
        }
    }
}

impl<D, T> ContactService for ContactServiceImpl<D, T>
where
    D: Deliverer,
    T: TemplateService,
{
    async fn submit(&self, form: ContactForm) -> Result<ContactDelivery, ContactSubmitError> {
        let message = ContactMessage::try_from(form).map_err(|err| {
            debug!("Rejected contact form: {err}");
            ContactSubmitError::InvalidForm(err)
        })?;

        let email = self.render(message).map_err(|err| {
            error!("Failed to render contact message: {err:#}");
            ContactSubmitError::Delivery
        })?;

        match self.deliverer.send(email).await {
            Ok(Delivery::Sent) => Ok(ContactDelivery::Sent),
            Ok(Delivery::Logged) => Ok(ContactDelivery::Logged),
            Err(err) => {
                error!("Failed to deliver contact message: {err:#}");
                Err(ContactSubmitError::Delivery)
            }
        }
    }
}

impl<D, T> ContactServiceImpl<D, T>
where
    T: TemplateService,
{
    fn render(&self, message: ContactMessage) -> anyhow::Result<Email> {
        let ContactMessage {
            author,
            subject,
            content,
        } = message;

        let text = format!(
            "Name: {}\nEmail: {}\nSubject: {}\n\nMessage:\n{}\n",
            *author.name, author.email, *subject, *content
        );

        let html = self.template.render(&ContactTemplate {
            name: author.name.into_inner(),
            email: author.email.to_string(),
            subject: (*subject).clone(),
            message: content.into_inner(),
        })?;

        let reply_to = author.email.without_name();
        let from = match &self.config.from {
            Some(from) => (**from).clone(),
            None => reply_to.clone(),
        };

        Ok(Email {
            from,
            recipient: (*self.config.recipient).clone(),
            reply_to: Some(reply_to),
            subject: format!("{SUBJECT_PREFIX}{}", *subject),
            body: EmailBody {
                text,
                html: Some(html),
            },
        })
    }
}

#[cfg(test)]
mod tests;
