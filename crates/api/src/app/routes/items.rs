use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use tracker_inventory::InventoryManager;

use crate::app::{dto, errors};

pub async fn create_item(
    Extension(manager): Extension<Arc<InventoryManager>>,
    dto::Params(params): dto::Params<dto::CreateItemParams>,
) -> axum::response::Response {
    match manager.initialize_item(&params.name, params.total) {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn list_item_names(
    Extension(manager): Extension<Arc<InventoryManager>>,
) -> Json<Vec<String>> {
    Json(manager.tracked_item_names())
}

pub async fn update_quantity(
    Extension(manager): Extension<Arc<InventoryManager>>,
    Path(item_name): Path<String>,
    dto::Params(params): dto::Params<dto::UpdateQuantityParams>,
) -> axum::response::Response {
    match manager.update_item_total(&item_name, params.total) {
        Ok(msg) => (StatusCode::OK, Json(dto::MessageResponse::from(msg))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(manager): Extension<Arc<InventoryManager>>,
    Path(item_name): Path<String>,
) -> axum::response::Response {
    // Removal fails only against current catalog state, unknown item included.
    match manager.delete_item(&item_name) {
        Ok(msg) => (StatusCode::OK, Json(dto::MessageResponse::from(msg))).into_response(),
        Err(e) => errors::json_error(StatusCode::CONFLICT, e.code(), e.to_string()),
    }
}
