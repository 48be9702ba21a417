#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderMap, Request, StatusCode},
    Router,
};
use portfolio_api_rest::{RestServer, RestServerConfig};
use portfolio_core_contact_impl::{ContactServiceConfig, ContactServiceImpl};
use portfolio_core_health_contracts::{HealthService, MockHealthService};
use portfolio_email_contracts::Deliverer;
use portfolio_templates_impl::TemplateServiceImpl;
use tower::ServiceExt;

pub fn config() -> RestServerConfig {
    RestServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
    }
}

pub fn contact_app(deliverer: impl Deliverer) -> Router {
    let contact = ContactServiceImpl::new(
        deliverer,
        TemplateServiceImpl::new().unwrap(),
        ContactServiceConfig {
            from: Some(Arc::new("portfolio@example.com".parse().unwrap())),
            recipient: Arc::new("owner@example.com".parse().unwrap()),
        },
    );
    RestServer::new(MockHealthService::new(), contact, config()).router()
}

pub fn health_app(health: impl HealthService) -> Router {
    let contact = ContactServiceImpl::new(
        portfolio_email_impl::LoggingDeliverer,
        TemplateServiceImpl::new().unwrap(),
        ContactServiceConfig {
            from: None,
            recipient: Arc::new("owner@example.com".parse().unwrap()),
        },
    );
    RestServer::new(health, contact, config()).router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: serde_json::from_slice(&body).unwrap(),
    }
}

pub fn post_contact(content_type: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut request = Request::builder().method("POST").uri("/api/contact");
    if let Some(content_type) = content_type {
        request = request.header(CONTENT_TYPE, content_type);
    }
    request.body(body.into()).unwrap()
}

pub const BOUNDARY: &str = "portfolio-test-boundary";

pub fn multipart(fields: &[(&str, &str)]) -> (String, String) {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
