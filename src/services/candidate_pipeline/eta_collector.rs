use crate::constants::ROUTE_NOT_AVAILABLE;
use crate::models::{EtaMap, EtaResult, EtaSuccess, GeoPoint, TravelMode};
use crate::services::maps::{MapsProvider, MatrixElement};
use std::sync::Arc;
use time::OffsetDateTime;

/// Gathers a travel estimate for every [`TravelMode`]
pub struct EtaCollector {
    maps: Arc<dyn MapsProvider>,
}

impl EtaCollector {
    pub fn new(maps: Arc<dyn MapsProvider>) -> Self {
        Self { maps }
    }

    /// Always returns one entry per mode. A failing mode never stops the
    /// remaining ones from being queried.
    pub async fn collect_etas(&self, origin: &GeoPoint, destination: &GeoPoint) -> EtaMap {
        tracing::info!(
            origin = %origin,
            destination = %destination,
            "Collecting ETAs: ({}) -> ({})",
            origin, destination
        );

        let mut etas = EtaMap::new();

        for mode in TravelMode::ALL {
            let result = match self
                .maps
                .distance_matrix(origin, destination, mode, OffsetDateTime::now_utc())
                .await
            {
                Ok(element) => eta_from_element(&element),
                Err(e) => EtaResult::error(e.to_string()),
            };

            match &result {
                EtaResult::Success(eta) => tracing::info!(
                    mode = %mode,
                    duration = %eta.duration_text,
                    distance = %eta.distance_text,
                    "{:12} - {:15} ({})",
                    mode.api_name().to_uppercase(), eta.duration_text, eta.distance_text
                ),
                EtaResult::Error { error_reason } => tracing::info!(
                    mode = %mode,
                    error = %error_reason,
                    "{:12} - NOT AVAILABLE: {}",
                    mode.api_name().to_uppercase(), error_reason
                ),
            }

            etas.insert(mode, result);
        }

        etas
    }
}

/// Missing duration/distance on an `OK` element is treated like an
/// unavailable route.
pub fn eta_from_element(element: &MatrixElement) -> EtaResult {
    if !element.is_ok() {
        return EtaResult::error(ROUTE_NOT_AVAILABLE);
    }

    match (&element.duration, &element.distance) {
        (Some(duration), Some(distance)) => EtaResult::Success(EtaSuccess {
            duration_text: duration.text.clone(),
            distance_text: distance.text.clone(),
            duration_seconds: duration.value,
            distance_meters: distance.value,
        }),
        _ => EtaResult::error(ROUTE_NOT_AVAILABLE),
    }
}
