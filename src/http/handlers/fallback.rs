//! Responses for requests no route handles.

use axum::http::{Method, Uri};

use crate::http::error::ApiError;

/// Unknown path.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

/// Known path, unsupported method.
pub async fn method_not_allowed(method: Method) -> ApiError {
    ApiError::MethodNotAllowed(method.to_string())
}
