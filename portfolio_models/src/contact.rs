use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::{email_address::EmailAddress, macros::nutype_string};

/// Addresses a contact form accepts: a dot-separated local part and a dotted
/// domain whose top level label has at least two letters. Quoted local parts,
/// IP literals and single-label domains are rejected.
pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[A-Za-z0-9_'+-]+\.)*[A-Za-z0-9_'+-]*[A-Za-z0-9_+-]@(?:[A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$",
    )
    .unwrap()
});

/// Contact form exactly as submitted by the client. Missing fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

nutype_string!(ContactMessageAuthorName(validate(len_char_min = 2)));
nutype_string!(ContactMessageSubject(validate(len_char_min = 5)));
nutype_string!(ContactMessageContent(validate(len_char_min = 10)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactFormViolation {
    /// The name is shorter than 2 characters.
    Name,
    /// The email address is not syntactically valid.
    Email,
    /// The subject is shorter than 5 characters.
    Subject,
    /// The message is shorter than 10 characters.
    Message,
}

impl ContactFormViolation {
    pub fn field(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact form fields: {}", .violations.iter().map(|v| v.field()).collect::<Vec<_>>().join(", "))]
pub struct ContactFormError {
    pub violations: Vec<ContactFormViolation>,
}

impl TryFrom<ContactForm> for ContactMessage {
    type Error = ContactFormError;

    /// Validates every field before giving up, so the error lists all violations.
    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        let name = ContactMessageAuthorName::try_new(form.name);
        let email = CONTACT_EMAIL_REGEX
            .is_match(&form.email)
            .then(|| form.email.parse::<EmailAddress>().ok())
            .flatten();
        let subject = ContactMessageSubject::try_new(form.subject);
        let content = ContactMessageContent::try_new(form.message);

        match (name, email, subject, content) {
            (Ok(name), Some(email), Ok(subject), Ok(content)) => Ok(Self {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            (name, email, subject, content) => {
                let violations = [
                    name.is_err().then_some(ContactFormViolation::Name),
                    email.is_none().then_some(ContactFormViolation::Email),
                    subject.is_err().then_some(ContactFormViolation::Subject),
                    content.is_err().then_some(ContactFormViolation::Message),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(ContactFormError { violations })
            }
        }
    }
}
