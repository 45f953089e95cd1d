//! Stable application-wide constants.
//!
//! Values here are structural invariants, geographic anchors, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation, see
//! [`PipelineConfig`](crate::config::PipelineConfig) instead.

use crate::models::GeoPoint;

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "5001";

// --- Maps provider defaults ---

/// Base URL of the Google Maps web services. Overridden by `GOOGLE_MAPS_BASE_URL`.
pub const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";
/// Per-call timeout for maps requests. Overridden by `MAPS_REQUEST_TIMEOUT_SECS`.
pub const DEFAULT_MAPS_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Places category used to locate hubs for origin biasing.
pub const HUB_PLACE_CATEGORY: &str = "subway_station";

// --- Geographic anchor ---

/// Toronto Union Station. Every candidate is sampled around this point.
pub const UNION_STATION: GeoPoint = GeoPoint {
    lat: 43.6452,
    lng: -79.3806,
};

/// Meters per degree of latitude, used for the degree approximation when
/// sampling points in a disc.
pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;

// --- Sampling radii (meters) ---

/// Outer radius bounding every origin and destination.
pub const DEFAULT_MAX_RADIUS_METERS: f64 = 10_000.0;
/// Radius around a chosen hub when the origin is biased toward transit.
pub const DEFAULT_HUB_RADIUS_METERS: f64 = 500.0;
/// Radius around the landmark for the "near landmark" origin branch.
pub const DEFAULT_LANDMARK_RADIUS_METERS: f64 = 3_000.0;

// --- Origin bias probabilities ---
// One uniform draw per origin: below HUB -> near a hub, below HUB + LANDMARK ->
// near the landmark, otherwise anywhere in the max radius.

/// Probability of sampling the origin near a hub.
pub const DEFAULT_HUB_PROBABILITY: f64 = 0.6;
/// Probability of sampling the origin near the landmark.
pub const DEFAULT_LANDMARK_PROBABILITY: f64 = 0.2;

// --- Attempt budgets ---

/// Attempt budget when both origin and destination are randomized.
pub const BIASED_ORIGIN_MAX_ATTEMPTS: usize = 30;
/// Attempt budget when the origin is pinned to the landmark.
pub const LANDMARK_ORIGIN_MAX_ATTEMPTS: usize = 20;
/// Minimum walking time between origin and destination for randomized origins.
pub const DEFAULT_MIN_WALKING_MINUTES: u32 = 30;

// --- Reverse geocoding heuristics ---

/// Result type tag marking a natural feature (lakes, bays, ...).
pub const NATURAL_FEATURE_TAG: &str = "natural_feature";
/// Address component tag for a street.
pub const ROUTE_TAG: &str = "route";
/// Address component tags that count as street-level specificity.
pub const STREET_LEVEL_TAGS: &[&str] = &["street_number", "route"];
/// Extra tags counted as street-level when premise matching is enabled.
pub const PREMISE_TAGS: &[&str] = &["premise", "subpremise"];

/// Reason recorded for a mode whose matrix element is not `OK`.
pub const ROUTE_NOT_AVAILABLE: &str = "Route not available";
