use crate::config::PipelineConfig;
use crate::constants::HUB_PLACE_CATEGORY;
use crate::models::GeoPoint;
use crate::services::maps::MapsProvider;
use std::fmt;
use std::sync::Arc;

use super::sampler::PointSampler;

/// Which branch produced an origin
#[derive(Debug, Clone, PartialEq)]
pub enum OriginSource {
    Hub { name: String },
    NearLandmark,
    AnywhereInRadius,
}

impl fmt::Display for OriginSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginSource::Hub { name } => write!(f, "near hub {}", name),
            OriginSource::NearLandmark => write!(f, "near landmark"),
            OriginSource::AnywhereInRadius => write!(f, "anywhere in radius"),
        }
    }
}

/// Picks origins with a bias toward transit hubs and the landmark
pub struct OriginSelector {
    maps: Arc<dyn MapsProvider>,
    hub_probability: f64,
    landmark_probability: f64,
    hub_radius_m: f64,
    landmark_radius_m: f64,
}

impl OriginSelector {
    pub fn new(maps: Arc<dyn MapsProvider>, config: &PipelineConfig) -> Self {
        Self {
            maps,
            hub_probability: config.hub_probability,
            landmark_probability: config.landmark_probability,
            hub_radius_m: config.hub_radius_m,
            landmark_radius_m: config.landmark_radius_m,
        }
    }

    /// Draw once and resolve the branch. Falls through from the hub branch to
    /// the landmark branch when no hub can be found.
    pub async fn choose_origin(
        &self,
        landmark: &GeoPoint,
        max_radius_m: f64,
        sampler: &mut dyn PointSampler,
    ) -> (GeoPoint, OriginSource) {
        let draw = sampler.next_unit();

        if draw < self.hub_probability {
            if let Some(origin) = self.near_hub(landmark, max_radius_m, sampler).await {
                return origin;
            }
        }

        if draw < self.hub_probability + self.landmark_probability {
            let origin = sampler.sample_point(landmark, self.landmark_radius_m);
            return (origin, OriginSource::NearLandmark);
        }

        let origin = sampler.sample_point(landmark, max_radius_m);
        (origin, OriginSource::AnywhereInRadius)
    }

    async fn near_hub(
        &self,
        landmark: &GeoPoint,
        max_radius_m: f64,
        sampler: &mut dyn PointSampler,
    ) -> Option<(GeoPoint, OriginSource)> {
        let hubs = match self
            .maps
            .nearby_places(landmark, max_radius_m, HUB_PLACE_CATEGORY)
            .await
        {
            Ok(hubs) => hubs,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Hub lookup failed, falling back to landmark sampling"
                );
                return None;
            }
        };

        if hubs.is_empty() {
            tracing::debug!("No hubs within {:.0}m of landmark", max_radius_m);
            return None;
        }

        let index = ((sampler.next_unit() * hubs.len() as f64) as usize).min(hubs.len() - 1);
        let hub = &hubs[index];
        let origin = sampler.sample_point(&hub.location, self.hub_radius_m);

        Some((
            origin,
            OriginSource::Hub {
                name: hub.name.clone(),
            },
        ))
    }
}
