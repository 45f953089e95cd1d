use crate::error::Result;
use crate::models::AcceptedResult;
use crate::services::candidate_pipeline::UniformDiscSampler;
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /random-destination
/// Pick an origin/destination pair reachable by all four travel modes and
/// return the ETAs for each
pub async fn random_destination(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AcceptedResult>> {
    let config = state.pipeline.config();
    tracing::info!(
        strategy = ?config.origin_strategy,
        max_attempts = config.max_attempts,
        radius_m = config.max_radius_m,
        "Random destination request: strategy={:?}, up to {} attempts within {:.0}m",
        config.origin_strategy, config.max_attempts, config.max_radius_m
    );

    let mut sampler = UniformDiscSampler::from_entropy();
    let result = state.pipeline.find_destination(&mut sampler).await?;

    Ok(Json(result))
}
