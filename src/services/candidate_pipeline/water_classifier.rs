use crate::config::{LookupFailurePolicy, PipelineConfig};
use crate::constants::{NATURAL_FEATURE_TAG, PREMISE_TAGS, ROUTE_TAG, STREET_LEVEL_TAGS};
use crate::models::GeoPoint;
use crate::services::maps::{GeocodeResult, MapsProvider};
use std::sync::Arc;

/// Decides whether a point sits on water from reverse geocoding specificity
pub struct WaterClassifier {
    maps: Arc<dyn MapsProvider>,
    on_failure: LookupFailurePolicy,
    include_premise: bool,
}

impl WaterClassifier {
    pub fn new(maps: Arc<dyn MapsProvider>, config: &PipelineConfig) -> Self {
        Self {
            maps,
            on_failure: config.water_lookup_policy,
            include_premise: config.water_include_premise,
        }
    }

    pub async fn is_on_water(&self, point: &GeoPoint) -> bool {
        match self.maps.reverse_geocode(point).await {
            Ok(results) => classify_water(&results, self.include_premise),
            Err(e) => {
                let on_water = self.on_failure.rejects();
                tracing::warn!(
                    error = %e,
                    lat = point.lat,
                    lng = point.lng,
                    "Could not check if on water, assuming {}",
                    if on_water { "water" } else { "land" }
                );
                on_water
            }
        }
    }
}

/// Water when there is no result, when the top result is a natural feature
/// without a street, or when it has no street-level address component.
pub fn classify_water(results: &[GeocodeResult], include_premise: bool) -> bool {
    let Some(first) = results.first() else {
        return true;
    };

    let has_street = first
        .address_components
        .iter()
        .any(|component| component.has_type(ROUTE_TAG));
    if first.has_type(NATURAL_FEATURE_TAG) && !has_street {
        return true;
    }

    let street_level = first.address_components.iter().any(|component| {
        STREET_LEVEL_TAGS.iter().any(|tag| component.has_type(tag))
            || (include_premise && PREMISE_TAGS.iter().any(|tag| component.has_type(tag)))
    });

    !street_level
}
