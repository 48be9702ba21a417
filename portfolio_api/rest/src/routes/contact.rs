use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_contact_contracts::{ContactService, ContactSubmitError, SubmissionResult};

use super::error;
use crate::{extractors::contact_form::ApiContactForm, models::ApiMessage};

pub fn router(service: Arc<impl ContactService>) -> Router<()> {
    Router::new()
        .route("/api/contact", routing::post(submit))
        .with_state(service)
}

async fn submit(
    service: State<Arc<impl ContactService>>,
    ApiContactForm(form): ApiContactForm,
) -> Response {
    let outcome = service.submit(form).await;

    let status = match &outcome {
        Ok(_) => StatusCode::OK,
        Err(ContactSubmitError::InvalidForm(_)) => StatusCode::BAD_REQUEST,
        Err(ContactSubmitError::Delivery) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    match SubmissionResult::from(&outcome) {
        SubmissionResult {
            success: true,
            detail,
        } => (status, Json(ApiMessage { message: detail })).into_response(),
        SubmissionResult {
            success: false,
            detail,
        } => error(status, detail),
    }
}
