//! Mapping provider seam.
//!
//! The candidate pipeline only talks to [`MapsProvider`]; the Google client
//! implements it for production and tests substitute an in-memory fake.

use crate::error::Result;
use crate::models::{GeoPoint, TravelMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Place {
    pub location: GeoPoint,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AddressComponent {
    pub long_name: String,
    pub types: Vec<String>,
}

impl AddressComponent {
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub types: Vec<String>,
    pub address_components: Vec<AddressComponent>,
}

impl GeocodeResult {
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|t| t == tag)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    /// Provider travel mode, e.g. `DRIVING` or `FERRY`
    pub travel_mode: String,
    /// Human-readable (possibly HTML) instruction text
    pub instructions: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub steps: Vec<RouteStep>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectionsRoute {
    pub legs: Vec<RouteLeg>,
}

impl DirectionsRoute {
    pub fn steps(&self) -> impl Iterator<Item = &RouteStep> {
        self.legs.iter().flat_map(|leg| leg.steps.iter())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextValue {
    pub text: String,
    pub value: u64,
}

/// One origin/destination cell of a distance matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatrixElement {
    pub status: String,
    #[serde(default)]
    pub duration: Option<TextValue>,
    #[serde(default)]
    pub distance: Option<TextValue>,
}

impl MatrixElement {
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }
}

#[async_trait]
pub trait MapsProvider: Send + Sync {
    /// Places of `category` within `radius_m` of `center`. An empty list is a
    /// valid answer.
    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_m: f64,
        category: &str,
    ) -> Result<Vec<Place>>;

    /// Reverse geocoding results, most specific first. Empty means no
    /// addressable result.
    async fn reverse_geocode(&self, point: &GeoPoint) -> Result<Vec<GeocodeResult>>;

    /// First route between the two points, or `None` if the provider found none.
    async fn directions(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        mode: TravelMode,
        departure: OffsetDateTime,
    ) -> Result<Option<DirectionsRoute>>;

    async fn distance_matrix(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        mode: TravelMode,
        departure: OffsetDateTime,
    ) -> Result<MatrixElement>;
}
