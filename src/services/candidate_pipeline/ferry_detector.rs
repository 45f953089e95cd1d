use crate::config::{LookupFailurePolicy, PipelineConfig};
use crate::models::{GeoPoint, TravelMode};
use crate::services::maps::{DirectionsRoute, MapsProvider};
use std::sync::Arc;
use time::OffsetDateTime;

/// Flags origin/destination pairs whose driving route uses a ferry
pub struct FerryDetector {
    maps: Arc<dyn MapsProvider>,
    on_failure: LookupFailurePolicy,
}

impl FerryDetector {
    pub fn new(maps: Arc<dyn MapsProvider>, config: &PipelineConfig) -> Self {
        Self {
            maps,
            on_failure: config.ferry_lookup_policy,
        }
    }

    pub async fn requires_ferry(&self, origin: &GeoPoint, destination: &GeoPoint) -> bool {
        match self
            .maps
            .directions(
                origin,
                destination,
                TravelMode::Driving,
                OffsetDateTime::now_utc(),
            )
            .await
        {
            Ok(Some(route)) => route_has_ferry(&route),
            Ok(None) => false,
            Err(e) => {
                let ferry = self.on_failure.rejects();
                tracing::warn!(
                    error = %e,
                    "Could not check for ferry, assuming {}",
                    if ferry { "ferry" } else { "no ferry" }
                );
                ferry
            }
        }
    }
}

/// Structured `FERRY` steps are not always present, so instruction text is
/// checked too.
pub fn route_has_ferry(route: &DirectionsRoute) -> bool {
    route.steps().any(|step| {
        step.travel_mode.eq_ignore_ascii_case("ferry")
            || step.instructions.to_lowercase().contains("ferry")
    })
}
