use serde::Serialize;

#[derive(Serialize)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}
