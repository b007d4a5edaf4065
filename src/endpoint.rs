use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::generate_core::{
    completion::CompletionService, GenerateError, GenerateRequest, Generator,
};

impl GenerateError {
    pub fn status(&self) -> StatusCode {
        match self {
            GenerateError::InvalidRequest => StatusCode::BAD_REQUEST,
            GenerateError::CredentialRejected(_) => StatusCode::UNAUTHORIZED,
            GenerateError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            GenerateError::ServiceMisconfigured | GenerateError::Unclassified(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /api/generate`
pub fn router<S>(generator: Arc<Generator<S>>) -> Router
where
    S: CompletionService + 'static,
{
    Router::new()
        .route("/api/generate", post(generate::<S>))
        .with_state(generator)
}

// The body is taken raw so malformed JSON is reported like a missing prompt.
async fn generate<S>(State(generator): State<Arc<Generator<S>>>, body: Bytes) -> Response
where
    S: CompletionService + 'static,
{
    let result = match GenerateRequest::from_slice(&body) {
        Ok(request) => generator.generate(request).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => err.into_response(),
    }
}
