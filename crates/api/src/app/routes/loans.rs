use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use tracker_inventory::InventoryManager;

use crate::app::{dto, errors};

pub async fn checkout(
    Extension(manager): Extension<Arc<InventoryManager>>,
    dto::Params(params): dto::Params<dto::LoanParams>,
) -> axum::response::Response {
    match manager.checkout_item(&params.student_name, &params.item_name) {
        Ok(msg) => (StatusCode::OK, Json(dto::MessageResponse::from(msg))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn checkin(
    Extension(manager): Extension<Arc<InventoryManager>>,
    dto::Params(params): dto::Params<dto::LoanParams>,
) -> axum::response::Response {
    match manager.checkin_item(&params.student_name, &params.item_name) {
        Ok(msg) => (StatusCode::OK, Json(dto::MessageResponse::from(msg))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
