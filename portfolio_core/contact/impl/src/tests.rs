use portfolio_core_contact_contracts::SubmissionResult;
use portfolio_email_contracts::MockDeliverer;
use portfolio_email_impl::LoggingDeliverer;
use portfolio_templates_contracts::MockTemplateService;
use portfolio_templates_impl::TemplateServiceImpl;
use portfolio_utils::assert_matches;
use pretty_assertions::assert_eq;

use super::*;

fn config() -> ContactServiceConfig {
    ContactServiceConfig {
        from: Some(Arc::new("Portfolio <portfolio@example.com>".parse().unwrap())),
        recipient: Arc::new("owner@example.com".parse().unwrap()),
    }
}

fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.into(),
        email: email.into(),
        subject: subject.into(),
        message: message.into(),
    }
}

fn valid_form() -> ContactForm {
    form("Al", "al@x.com", "Hi there", "Let's talk soon")
}

const HTML: &str = "<p>Let's talk soon</p>";

fn contact_template() -> ContactTemplate {
    ContactTemplate {
        name: "Al".into(),
        email: "al@x.com".into(),
        subject: "Hi there".into(),
        message: "Let's talk soon".into(),
    }
}

fn templates(times: usize) -> MockTemplateService {
    let mut template = MockTemplateService::new();
    template
        .expect_render::<ContactTemplate>()
        .times(times)
        .returning(|_| Ok(HTML.into()));
    template
}

fn expected_email() -> Email {
    Email {
        from: "Portfolio <portfolio@example.com>".parse().unwrap(),
        recipient: "owner@example.com".parse().unwrap(),
        reply_to: Some("al@x.com".parse().unwrap()),
        subject: "Portfolio Contact: Hi there".into(),
        body: EmailBody {
            text: "Name: Al\nEmail: al@x.com\nSubject: Hi there\n\nMessage:\nLet's talk soon\n"
                .into(),
            html: Some(HTML.into()),
        },
    }
}

#[tokio::test]
async fn ok() {
    // Arrange
    let deliverer = MockDeliverer::new().with_send(expected_email(), Delivery::Sent);
    let template = MockTemplateService::new().with_render(contact_template(), HTML.into());
    let sut = ContactServiceImpl::new(deliverer, template, config());

    // Act
    let result = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(&result, Ok(ContactDelivery::Sent)));
    assert_eq!(
        SubmissionResult::from(&result),
        SubmissionResult {
            success: true,
            detail: "Email sent successfully!".into(),
        }
    );
}

#[tokio::test]
async fn invalid_form() {
    for form in [
        form("A", "al@x.com", "Hi there", "Let's talk soon"),
        form("Al", "al(at)x.com", "Hi there", "Let's talk soon"),
        form("Al", "al@x.com", "Hi", "Let's talk soon"),
        form("Al", "al@x.com", "Hi there", "Soon"),
        ContactForm::default(),
    ] {
        // Arrange
        let sut =
            ContactServiceImpl::new(MockDeliverer::new(), MockTemplateService::new(), config());

        // Act
        let result = sut.submit(form).await;

        // Assert
        assert!(matches!(&result, Err(ContactSubmitError::InvalidForm(_))));
        let result = SubmissionResult::from(&result);
        assert!(!result.success);
        assert_eq!(result.detail, "Invalid form data. Please check your inputs.");
    }
}

#[tokio::test]
async fn invalid_form_reports_all_violations() {
    use portfolio_models::contact::ContactFormViolation;

    // Arrange
    let sut =
        ContactServiceImpl::new(MockDeliverer::new(), MockTemplateService::new(), config());

    // Act
    let result = sut.submit(form("A", "al@x.com", "Hi", "Let's talk soon")).await;

    // Assert
    assert_matches!(
        result,
        Err(ContactSubmitError::InvalidForm(err))
            if err.violations == [ContactFormViolation::Name, ContactFormViolation::Subject]
    );
}

#[tokio::test]
async fn logged_in_development() {
    // Arrange
    let sut = ContactServiceImpl::new(LoggingDeliverer, templates(1), config());

    // Act
    let result = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(&result, Ok(ContactDelivery::Logged)));
    let result = SubmissionResult::from(&result);
    assert!(result.success);
    assert_eq!(
        result.detail,
        "Email sent successfully! (Development mode - email logged to console)"
    );
}

#[tokio::test]
async fn relayed_to_owner() {
    // Arrange
    let mut deliverer = MockDeliverer::new();
    deliverer
        .expect_send()
        .once()
        .withf(|email| {
            email.recipient.email() == "owner@example.com" && email.subject.contains("Hi there")
        })
        .return_once(|_| Box::pin(std::future::ready(Ok(Delivery::Sent))));
    let sut = ContactServiceImpl::new(deliverer, templates(1), config());

    // Act
    let result = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(result, Ok(ContactDelivery::Sent)));
}

#[tokio::test]
async fn delivery_error_is_not_leaked() {
    // Arrange
    let transport_error = "535 5.7.8 Username and Password not accepted";
    let deliverer = MockDeliverer::new().with_send_error(expected_email(), transport_error);
    let sut = ContactServiceImpl::new(deliverer, templates(1), config());

    // Act
    let result = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(&result, Err(ContactSubmitError::Delivery)));
    let result = SubmissionResult::from(&result);
    assert!(!result.success);
    assert_eq!(result.detail, "Failed to send email. Please try again later.");
    assert!(!result.detail.contains("535"));
    assert!(!result.detail.contains("Password"));
}

#[tokio::test]
async fn no_deduplication() {
    // Arrange
    let mut deliverer = MockDeliverer::new();
    deliverer
        .expect_send()
        .times(2)
        .returning(|_| Box::pin(std::future::ready(Ok(Delivery::Sent))));
    let sut = ContactServiceImpl::new(deliverer, templates(2), config());

    // Act
    let first = sut.submit(valid_form()).await;
    let second = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(first, Ok(ContactDelivery::Sent)));
    assert!(matches!(second, Ok(ContactDelivery::Sent)));
}

#[tokio::test]
async fn sender_defaults_to_author() {
    // Arrange
    let config = ContactServiceConfig {
        from: None,
        ..config()
    };
    let deliverer = MockDeliverer::new().with_send(
        Email {
            from: "al@x.com".parse().unwrap(),
            ..expected_email()
        },
        Delivery::Sent,
    );
    let sut = ContactServiceImpl::new(deliverer, templates(1), config);

    // Act
    let result = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(result, Ok(ContactDelivery::Sent)));
}

#[tokio::test]
async fn render_error_is_not_delivered() {
    // Arrange
    let mut template = MockTemplateService::new();
    template
        .expect_render::<ContactTemplate>()
        .once()
        .returning(|_| Err(anyhow::anyhow!("Template 'contact.html' not found")));
    let sut = ContactServiceImpl::new(MockDeliverer::new(), template, config());

    // Act
    let result = sut.submit(valid_form()).await;

    // Assert
    assert!(matches!(&result, Err(ContactSubmitError::Delivery)));
    assert_eq!(
        SubmissionResult::from(&result).detail,
        "Failed to send email. Please try again later."
    );
}

#[test]
fn html_body_escapes_user_input() {
    let sut = ContactServiceImpl::new(
        MockDeliverer::new(),
        TemplateServiceImpl::new().unwrap(),
        config(),
    );
    let message = ContactMessage::try_from(form(
        "<b>Al",
        "al@x.com",
        "Hi & bye",
        "line one\nline <two>",
    ))
    .unwrap();

    let email = sut.render(message).unwrap();

    let html = email.body.html.unwrap();
    assert!(html.contains("<p><strong>Name:</strong> &lt;b&gt;Al</p>"));
    assert!(html.contains("<p><strong>Subject:</strong> Hi &amp; bye</p>"));
    assert!(html.contains("<p>line one<br>line &lt;two&gt;</p>"));
    assert!(email.body.text.contains("line one\nline <two>"));
    assert_eq!(email.subject, "Portfolio Contact: Hi & bye");
}
