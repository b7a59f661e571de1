use std::sync::Arc;

use axum::{extract::Extension, Json};

use tracker_inventory::{InventoryManager, Summary};

/// Item availability plus every outstanding loan, as one consistent snapshot.
pub async fn summary(Extension(manager): Extension<Arc<InventoryManager>>) -> Json<Summary> {
    Json(manager.summary())
}
