pub mod info;
pub mod random_destination;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(info::index))
        .route("/maps-api-key", get(info::maps_api_key))
        .route(
            "/random-destination",
            get(random_destination::random_destination),
        )
        .with_state(state)
}
