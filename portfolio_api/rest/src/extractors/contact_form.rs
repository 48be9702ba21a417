//! Decode a contact form from a multipart, urlencoded or json request body.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use portfolio_models::contact::ContactForm;
use tracing::debug;

/// Contact form submitted by the client.
///
/// A body that cannot be decoded yields an empty form, which then fails
/// validation like any other incomplete submission.
pub struct ApiContactForm(pub ContactForm);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ApiContactForm {
    type Rejection = Infallible;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let form = if content_type.starts_with("multipart/form-data") {
            match Multipart::from_request(request, state).await {
                Ok(multipart) => read_multipart(multipart).await,
                Err(err) => Err(err.to_string()),
            }
        } else if content_type.starts_with("application/json") {
            Json::<ContactForm>::from_request(request, state)
                .await
                .map(|Json(form)| form)
                .map_err(|err| err.to_string())
        } else {
            Form::<ContactForm>::from_request(request, state)
                .await
                .map(|Form(form)| form)
                .map_err(|err| err.to_string())
        };

        Ok(Self(form.unwrap_or_else(|err| {
            debug!("Failed to decode contact form: {err}");
            ContactForm::default()
        })))
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<ContactForm, String> {
    let [mut name, mut email, mut subject, mut message] = [None, None, None, None];
    while let Some(field) = multipart.next_field().await.map_err(|err| err.to_string())? {
        let target = match field.name() {
            Some("name") => &mut name,
            Some("email") => &mut email,
            Some("subject") => &mut subject,
            Some("message") => &mut message,
            _ => continue,
        };
        let value = field.text().await.map_err(|err| err.to_string())?;
        // first occurrence wins, even if it is empty
        if target.is_none() {
            *target = Some(value);
        }
    }

    Ok(ContactForm {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        subject: subject.unwrap_or_default(),
        message: message.unwrap_or_default(),
    })
}
