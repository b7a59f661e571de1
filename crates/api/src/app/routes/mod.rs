use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub mod items;
pub mod loans;
pub mod reports;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .route("/items", post(items::create_item))
        .route("/items/names", get(items::list_item_names))
        .route("/items/:item_name/quantity", put(items::update_quantity))
        .route("/items/:item_name", delete(items::delete_item))
        .route("/checkout", post(loans::checkout))
        .route("/checkin", post(loans::checkin))
        .route("/summary", get(reports::summary))
}
