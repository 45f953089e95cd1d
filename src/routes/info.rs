use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET / - API description
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "ETA Guesser API",
        "endpoints": {
            "/random-destination": "Get a random origin/destination pair near Union Station with ETAs for every travel mode",
            "/maps-api-key": "Google Maps JS API key for the frontend"
        }
    }))
}

/// GET /maps-api-key - expose the browser key to the frontend
pub async fn maps_api_key(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "googleMapsApiKey": state.maps_api_key }))
}
