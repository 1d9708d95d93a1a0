//! Error responses.
//!
//! Every failure leaving a handler becomes `{"error": <code>, "message": <text>}`
//! where `error` is one of a fixed set of codes clients can match on.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::ValidationError;
use crate::http::response::ErrorBody;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or blank required field.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Body or path could not be decoded.
    #[error("{0}")]
    BadRequest(String),

    /// Referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Unexpected store failure. Detail is logged, never returned.
    #[error("internal server error")]
    Persistence(#[source] StoreError),

    /// No handler for this method on a known path.
    #[error("method {0} not allowed here")]
    MethodNotAllowed(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("request timed out")]
    Timeout,

    #[error("service unavailable")]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Stable code for the `error` field.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::MethodNotAllowed(_) => "method_not_allowed",
            ApiError::PayloadTooLarge => "payload_too_large",
            ApiError::Timeout => "timeout",
            ApiError::Persistence(_) => "internal_error",
            ApiError::Unavailable => "unavailable",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound(err.to_string())
        } else {
            ApiError::Persistence(err)
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // A streamed body over the limit surfaces here rather than in the limit layer.
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge;
        }
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Persistence(source) => {
                tracing::error!(error = %source, "Persistence failure, transaction rolled back");
            }
            ApiError::Unavailable => tracing::warn!("Store unavailable"),
            other => tracing::debug!(error = %other, code = other.code(), "Request rejected"),
        }

        let body = ErrorBody {
            error: self.code(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Response middleware giving the timeout and body-limit layers' bare
/// responses the same JSON body as handler errors.
pub async fn envelope_errors(response: Response) -> Response {
    let replacement = match response.status() {
        StatusCode::REQUEST_TIMEOUT => ApiError::Timeout,
        StatusCode::PAYLOAD_TOO_LARGE => ApiError::PayloadTooLarge,
        _ => return response,
    };
    if is_json(&response) {
        return response;
    }

    let mut enveloped = replacement.into_response();
    let headers = enveloped.headers_mut();
    for (name, value) in response.headers() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            headers.append(name.clone(), value.clone());
        }
    }
    enveloped
}

fn is_json(response: &Response) -> bool {
    response.headers().get(header::CONTENT_TYPE)
        == Some(&HeaderValue::from_static("application/json"))
}
