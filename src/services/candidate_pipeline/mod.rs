mod eta_collector;
mod ferry_detector;
mod origin_selection;
pub mod sampler;
mod water_classifier;

use crate::config::{OriginStrategy, PipelineConfig};
use crate::error::{AppError, Result};
use crate::models::{AcceptedResult, Candidate, GeoPoint, TravelMode};
use crate::services::maps::MapsProvider;
use std::fmt;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub use eta_collector::{eta_from_element, EtaCollector};
pub use ferry_detector::{route_has_ferry, FerryDetector};
pub use origin_selection::{OriginSelector, OriginSource};
pub use sampler::{point_in_disc, PointSampler, UniformDiscSampler};
pub use water_classifier::{classify_water, WaterClassifier};

/// Why a candidate was discarded
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    OriginOnWater,
    DestinationOnWater,
    RequiresFerry,
    MissingModes(Vec<TravelMode>),
    WalkTooShort { minutes: u32, required: u32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OriginOnWater => write!(f, "origin is on water"),
            Rejection::DestinationOnWater => write!(f, "destination is on water"),
            Rejection::RequiresFerry => write!(f, "requires ferry"),
            Rejection::MissingModes(modes) => {
                let names: Vec<&str> = modes.iter().map(|m| m.api_name()).collect();
                write!(f, "missing modes: [{}]", names.join(", "))
            }
            Rejection::WalkTooShort { minutes, required } => {
                write!(f, "walking time only {} mins (need {}+)", minutes, required)
            }
        }
    }
}

enum AttemptOutcome {
    Accepted(Box<AcceptedResult>),
    Rejected(Rejection),
}

/// Retry loop that samples origin/destination pairs and returns the first
/// one passing every acceptance check.
///
/// Checks run cheapest first (water, ferry, then four ETA lookups) and stop
/// at the first rejection.
pub struct CandidatePipeline {
    maps: Arc<dyn MapsProvider>,
    config: PipelineConfig,
    origin_selector: OriginSelector,
    water_classifier: WaterClassifier,
    ferry_detector: FerryDetector,
    eta_collector: EtaCollector,
}

impl CandidatePipeline {
    pub fn new(maps: Arc<dyn MapsProvider>, config: PipelineConfig) -> Self {
        let origin_selector = OriginSelector::new(maps.clone(), &config);
        let water_classifier = WaterClassifier::new(maps.clone(), &config);
        let ferry_detector = FerryDetector::new(maps.clone(), &config);
        let eta_collector = EtaCollector::new(maps.clone());

        CandidatePipeline {
            maps,
            config,
            origin_selector,
            water_classifier,
            ferry_detector,
            eta_collector,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline to completion: an accepted pair, or
    /// [`AppError::PipelineExhausted`] once the attempt budget is spent.
    pub async fn find_destination(&self, sampler: &mut dyn PointSampler) -> Result<AcceptedResult> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("candidate_pipeline", %run_id);
        self.run(sampler).instrument(span).await
    }

    async fn run(&self, sampler: &mut dyn PointSampler) -> Result<AcceptedResult> {
        let max_attempts = self.config.max_attempts;

        for attempt in 1..=max_attempts {
            match self.attempt(attempt, sampler).await {
                Ok(AttemptOutcome::Accepted(result)) => {
                    tracing::info!(
                        attempt,
                        walking_minutes = ?result.walking_minutes(),
                        "Found valid origin/destination pair on attempt {}",
                        attempt
                    );
                    return Ok(*result);
                }
                Ok(AttemptOutcome::Rejected(reason)) => {
                    tracing::info!(attempt, "Attempt {} skipped: {}", attempt, reason);
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "Attempt {} failed: {}", attempt, e);
                }
            }
        }

        Err(AppError::PipelineExhausted {
            attempts: max_attempts,
            requirement: self.config.requirement(),
        })
    }

    async fn attempt(
        &self,
        attempt: usize,
        sampler: &mut dyn PointSampler,
    ) -> Result<AttemptOutcome> {
        let landmark = self.config.landmark;

        let origin = match self.config.origin_strategy {
            OriginStrategy::FixedAtLandmark => landmark,
            OriginStrategy::BiasedRandom => {
                let (origin, source) = self
                    .origin_selector
                    .choose_origin(&landmark, self.config.max_radius_m, sampler)
                    .await;
                tracing::debug!(attempt, source = %source, "Generated origin {}", source);
                origin
            }
        };
        let origin = validated(origin)?;

        if self.config.checks_origin_water() && self.water_classifier.is_on_water(&origin).await {
            return Ok(AttemptOutcome::Rejected(Rejection::OriginOnWater));
        }

        let destination = validated(sampler.sample_point(&landmark, self.config.max_radius_m))?;
        let candidate = Candidate {
            origin,
            destination,
        };

        if self.water_classifier.is_on_water(&candidate.destination).await {
            return Ok(AttemptOutcome::Rejected(Rejection::DestinationOnWater));
        }

        if self
            .ferry_detector
            .requires_ferry(&candidate.origin, &candidate.destination)
            .await
        {
            return Ok(AttemptOutcome::Rejected(Rejection::RequiresFerry));
        }

        let etas = self
            .eta_collector
            .collect_etas(&candidate.origin, &candidate.destination)
            .await;

        let missing: Vec<TravelMode> = TravelMode::ALL
            .into_iter()
            .filter(|mode| etas.get(mode).map_or(true, |eta| eta.is_error()))
            .collect();
        if !missing.is_empty() {
            return Ok(AttemptOutcome::Rejected(Rejection::MissingModes(missing)));
        }

        if let Some(required) = self.config.min_walking_minutes {
            let minutes = etas
                .get(&TravelMode::Walking)
                .and_then(|eta| eta.as_success())
                .map(|eta| eta.duration_minutes())
                .ok_or_else(|| {
                    AppError::Internal("walking ETA missing after availability check".to_string())
                })?;
            if minutes < required {
                return Ok(AttemptOutcome::Rejected(Rejection::WalkTooShort {
                    minutes,
                    required,
                }));
            }
        }

        let origin_address = self.resolve_address(&candidate.origin).await;
        let destination_address = self.resolve_address(&candidate.destination).await;

        Ok(AttemptOutcome::Accepted(Box::new(AcceptedResult {
            origin: candidate.origin,
            origin_address,
            destination: candidate.destination,
            destination_address,
            etas,
            attempts: attempt,
        })))
    }

    /// Formatted address of the top reverse-geocoding result, or the
    /// coordinates themselves when there is none.
    pub async fn resolve_address(&self, point: &GeoPoint) -> String {
        match self.maps.reverse_geocode(point).await {
            Ok(results) => results
                .into_iter()
                .next()
                .map(|result| result.formatted_address)
                .filter(|address| !address.is_empty())
                .unwrap_or_else(|| point.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Error getting address for ({})", point);
                point.to_string()
            }
        }
    }
}

/// Samplers are injectable, so their output is re-checked before any lookup.
fn validated(point: GeoPoint) -> Result<GeoPoint> {
    GeoPoint::new(point.lat, point.lng)
        .map_err(|e| AppError::Internal(format!("Sampler produced an invalid point: {}", e)))
}
