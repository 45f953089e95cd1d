use crate::constants::GOOGLE_MAPS_BASE_URL;
use crate::error::{AppError, Result};
use crate::models::{GeoPoint, TravelMode};
use crate::services::maps::{
    AddressComponent, DirectionsRoute, GeocodeResult, MapsProvider, MatrixElement, Place,
    RouteLeg, RouteStep,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use time::OffsetDateTime;

/// Client for the Google Maps JSON web services (Places, Geocoding,
/// Directions, Distance Matrix)
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GoogleMapsClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        Self::with_config(api_key, GOOGLE_MAPS_BASE_URL.to_string(), timeout)
    }

    pub fn with_config(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(GoogleMapsClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{base_url}/{endpoint}/json` with the API key appended
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}/{}/json", self.base_url, endpoint);

        tracing::debug!(endpoint, "Maps API request: {}", endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                endpoint,
                "Maps API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::MapsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::MapsApi(format!("Failed to parse {} response: {}", endpoint, e)))
    }
}

/// `OK` and `ZERO_RESULTS` are successful answers; anything else is an error.
fn check_status(endpoint: &str, status: &str, error_message: Option<&str>) -> Result<()> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(AppError::MapsApi(format!(
            "{} returned {}: {}",
            endpoint,
            other,
            error_message.unwrap_or("no details")
        ))),
    }
}

#[async_trait]
impl MapsProvider for GoogleMapsClient {
    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_m: f64,
        category: &str,
    ) -> Result<Vec<Place>> {
        let response: NearbySearchResponse = self
            .get_json(
                "place/nearbysearch",
                &[
                    ("location", center.to_query()),
                    ("radius", format!("{}", radius_m.round() as u64)),
                    ("type", category.to_string()),
                ],
            )
            .await?;
        check_status(
            "place/nearbysearch",
            &response.status,
            response.error_message.as_deref(),
        )?;

        Ok(response
            .results
            .into_iter()
            .filter_map(|place| {
                let location = GeoPoint::new(
                    place.geometry.location.lat,
                    place.geometry.location.lng,
                )
                .ok()?;
                Some(Place {
                    location,
                    name: place.name.unwrap_or_else(|| "Unknown Station".to_string()),
                })
            })
            .collect())
    }

    async fn reverse_geocode(&self, point: &GeoPoint) -> Result<Vec<GeocodeResult>> {
        let response: GeocodeResponse = self
            .get_json("geocode", &[("latlng", point.to_query())])
            .await?;
        check_status("geocode", &response.status, response.error_message.as_deref())?;

        Ok(response
            .results
            .into_iter()
            .map(|result| GeocodeResult {
                formatted_address: result.formatted_address,
                types: result.types,
                address_components: result
                    .address_components
                    .into_iter()
                    .map(|component| AddressComponent {
                        long_name: component.long_name,
                        types: component.types,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn directions(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        mode: TravelMode,
        departure: OffsetDateTime,
    ) -> Result<Option<DirectionsRoute>> {
        let response: DirectionsApiResponse = self
            .get_json(
                "directions",
                &[
                    ("origin", origin.to_query()),
                    ("destination", destination.to_query()),
                    ("mode", mode.api_name().to_string()),
                    ("departure_time", departure.unix_timestamp().to_string()),
                ],
            )
            .await?;

        if response.status == "NOT_FOUND" {
            return Ok(None);
        }
        check_status(
            "directions",
            &response.status,
            response.error_message.as_deref(),
        )?;

        Ok(response.routes.into_iter().next().map(|route| DirectionsRoute {
            legs: route
                .legs
                .into_iter()
                .map(|leg| RouteLeg {
                    steps: leg
                        .steps
                        .into_iter()
                        .map(|step| RouteStep {
                            travel_mode: step.travel_mode,
                            instructions: step.html_instructions,
                        })
                        .collect(),
                })
                .collect(),
        }))
    }

    async fn distance_matrix(
        &self,
        origin: &GeoPoint,
        destination: &GeoPoint,
        mode: TravelMode,
        departure: OffsetDateTime,
    ) -> Result<MatrixElement> {
        let response: DistanceMatrixResponse = self
            .get_json(
                "distancematrix",
                &[
                    ("origins", origin.to_query()),
                    ("destinations", destination.to_query()),
                    ("mode", mode.api_name().to_string()),
                    ("departure_time", departure.unix_timestamp().to_string()),
                ],
            )
            .await?;
        if response.status != "OK" {
            return Err(AppError::MapsApi(format!(
                "distancematrix returned {}: {}",
                response.status,
                response.error_message.as_deref().unwrap_or("no details")
            )));
        }

        response
            .rows
            .into_iter()
            .next()
            .and_then(|row| row.elements.into_iter().next())
            .ok_or_else(|| AppError::MapsApi("Empty distance matrix response".to_string()))
    }
}

// Google API response types

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct PlaceGeometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    geometry: PlaceGeometry,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleAddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleGeocodeResult {
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    address_components: Vec<GoogleAddressComponent>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GoogleGeocodeResult>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleStep {
    #[serde(default)]
    travel_mode: String,
    #[serde(default)]
    html_instructions: String,
}

#[derive(Debug, Deserialize)]
struct GoogleLeg {
    #[serde(default)]
    steps: Vec<GoogleStep>,
}

#[derive(Debug, Deserialize)]
struct GoogleRoute {
    #[serde(default)]
    legs: Vec<GoogleLeg>,
}

#[derive(Debug, Deserialize)]
struct DirectionsApiResponse {
    #[serde(default)]
    routes: Vec<GoogleRoute>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Debug, Deserialize)]
struct DistanceMatrixResponse {
    #[serde(default)]
    rows: Vec<MatrixRow>,
    status: String,
    #[serde(default)]
    error_message: Option<String>,
}
