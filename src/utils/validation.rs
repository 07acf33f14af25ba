use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use validator::ValidationErrors;

pub fn into_response(errors: ValidationErrors) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
}
