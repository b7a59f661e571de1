use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tracker_core::InventoryError;

/// Map a domain failure to a 4xx response: 409 for state conflicts, 400 otherwise.
pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    let status = if err.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    };
    json_error(status, err.code(), err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
