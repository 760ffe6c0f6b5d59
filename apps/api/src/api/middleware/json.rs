use axum::extract::FromRequest;

use crate::api::errors::ApiError;

/// JSON body extractor that rejects with an [`ApiError`]
///
/// Malformed JSON, a missing content type or a missing required field all
/// become a 400 `{"error": ...}` response instead of axum's plain-text
/// rejection.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(ApiJson(req): ApiJson<CreateCourseRequest>) -> Result<(), ApiError> {
///     Ok(())
/// }
/// ```
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
