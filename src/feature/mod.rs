//! The features of the application, one module each.

use crate::infra::state::AppState;
use axum::Router;

pub mod home;
pub mod invoice;
pub mod item;

/// Constructs the REST API.
pub fn api(state: AppState) -> Router {
    Router::new()
        .merge(home::home_api::routes())
        .merge(item::item_api::routes())
        .merge(invoice::invoice_api::routes())
        .with_state(state)
}
