use axum::Router;
use etaguess::config::Config;
use etaguess::services::{CandidatePipeline, GoogleMapsClient, MapsProvider};
use etaguess::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "etaguess=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Missing credentials stop the process before anything is served
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting ETA Guesser API server");
    tracing::info!(
        lat = config.pipeline.landmark.lat,
        lng = config.pipeline.landmark.lng,
        "Landmark: Union Station, Toronto ({}, {})",
        config.pipeline.landmark.lat, config.pipeline.landmark.lng
    );
    tracing::info!(
        radius_km = config.pipeline.max_radius_m / 1000.0,
        strategy = ?config.pipeline.origin_strategy,
        max_attempts = config.pipeline.max_attempts,
        min_walking_minutes = ?config.pipeline.min_walking_minutes,
        "Max radius: {} km, only destinations with all 4 transport modes, ferry routes excluded",
        config.pipeline.max_radius_m / 1000.0
    );

    let maps_client = if let Some(ref base_url) = config.google_maps_base_url {
        GoogleMapsClient::with_config(
            config.google_maps_api_key.clone(),
            base_url.clone(),
            config.maps_request_timeout(),
        )?
    } else {
        GoogleMapsClient::new(
            config.google_maps_api_key.clone(),
            config.maps_request_timeout(),
        )?
    };
    let maps: Arc<dyn MapsProvider> = Arc::new(maps_client);
    let pipeline = CandidatePipeline::new(maps, config.pipeline.clone());

    // Create application state
    let state = Arc::new(AppState {
        pipeline,
        maps_api_key: config.google_maps_api_key.clone(),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .merge(etaguess::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
