use async_trait::async_trait;
use etaguess::config::PipelineConfig;
use etaguess::error::{AppError, Result};
use etaguess::models::{GeoPoint, TravelMode};
use etaguess::services::candidate_pipeline::{point_in_disc, PointSampler};
use etaguess::services::maps::{
    AddressComponent, DirectionsRoute, GeocodeResult, MapsProvider, MatrixElement, Place,
    RouteLeg, RouteStep, TextValue,
};
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;

/// In-memory maps provider with canned answers and a call log
#[allow(dead_code)]
pub struct FakeMaps {
    pub hubs: std::result::Result<Vec<Place>, String>,
    pub geocode: std::result::Result<Vec<GeocodeResult>, String>,
    pub route: std::result::Result<Option<DirectionsRoute>, String>,
    pub matrix: HashMap<TravelMode, std::result::Result<MatrixElement, String>>,
    pub calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeMaps {
    /// Land everywhere, no ferry, every mode available, walking takes `walking_minutes`
    pub fn happy(walking_minutes: u64) -> Self {
        let mut matrix = HashMap::new();
        matrix.insert(TravelMode::Driving, Ok(ok_element("12 mins", 720, "6.1 km", 6_100)));
        matrix.insert(TravelMode::Transit, Ok(ok_element("25 mins", 1_500, "6.4 km", 6_400)));
        matrix.insert(TravelMode::Bicycling, Ok(ok_element("20 mins", 1_200, "5.9 km", 5_900)));
        matrix.insert(
            TravelMode::Walking,
            Ok(ok_element(
                &format!("{} mins", walking_minutes),
                walking_minutes * 60,
                "5.7 km",
                5_700,
            )),
        );

        FakeMaps {
            hubs: Ok(vec![]),
            geocode: Ok(vec![land_result("65 Front St W, Toronto, ON M5J 1E6, Canada")]),
            route: Ok(Some(driving_route(&["Head north on <b>Bay St</b>"]))),
            matrix,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_geocode(mut self, geocode: std::result::Result<Vec<GeocodeResult>, String>) -> Self {
        self.geocode = geocode;
        self
    }

    pub fn with_route(mut self, route: std::result::Result<Option<DirectionsRoute>, String>) -> Self {
        self.route = route;
        self
    }

    pub fn with_hubs(mut self, hubs: std::result::Result<Vec<Place>, String>) -> Self {
        self.hubs = hubs;
        self
    }

    pub fn with_mode(
        mut self,
        mode: TravelMode,
        element: std::result::Result<MatrixElement, String>,
    ) -> Self {
        self.matrix.insert(mode, element);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls to `call`, ignoring any recorded arguments
    pub fn count(&self, call: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split('(').next() == Some(call))
            .count()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl MapsProvider for FakeMaps {
    async fn nearby_places(
        &self,
        center: &GeoPoint,
        radius_m: f64,
        category: &str,
    ) -> Result<Vec<Place>> {
        self.record(&format!(
            "nearby_places({},{},{})",
            center.to_query(),
            radius_m,
            category
        ));
        self.hubs.clone().map_err(AppError::MapsApi)
    }

    async fn reverse_geocode(&self, _point: &GeoPoint) -> Result<Vec<GeocodeResult>> {
        self.record("reverse_geocode");
        self.geocode.clone().map_err(AppError::MapsApi)
    }

    async fn directions(
        &self,
        _origin: &GeoPoint,
        _destination: &GeoPoint,
        _mode: TravelMode,
        _departure: OffsetDateTime,
    ) -> Result<Option<DirectionsRoute>> {
        self.record("directions");
        self.route.clone().map_err(AppError::MapsApi)
    }

    async fn distance_matrix(
        &self,
        _origin: &GeoPoint,
        _destination: &GeoPoint,
        mode: TravelMode,
        _departure: OffsetDateTime,
    ) -> Result<MatrixElement> {
        self.record("distance_matrix");
        self.matrix
            .get(&mode)
            .cloned()
            .unwrap_or_else(|| Err(format!("no canned answer for {}", mode)))
            .map_err(AppError::MapsApi)
    }
}

/// Sampler that replays fixed unit draws and fixed points in order, cycling
#[allow(dead_code)]
pub struct ScriptedSampler {
    units: Vec<f64>,
    points: Vec<GeoPoint>,
    unit_index: usize,
    point_index: usize,
}

#[allow(dead_code)]
impl ScriptedSampler {
    pub fn new(units: Vec<f64>, points: Vec<GeoPoint>) -> Self {
        Self {
            units,
            points,
            unit_index: 0,
            point_index: 0,
        }
    }

    /// Every sampled point is `point`; every unit draw is `unit`
    pub fn fixed(unit: f64, point: GeoPoint) -> Self {
        Self::new(vec![unit], vec![point])
    }
}

impl PointSampler for ScriptedSampler {
    fn next_unit(&mut self) -> f64 {
        let unit = self.units[self.unit_index % self.units.len()];
        self.unit_index += 1;
        unit
    }

    fn sample_point(&mut self, center: &GeoPoint, radius_meters: f64) -> GeoPoint {
        if self.points.is_empty() {
            let u_angle = self.next_unit();
            let u_radius = self.next_unit();
            return point_in_disc(center, radius_meters, u_angle, u_radius);
        }
        let point = self.points[self.point_index % self.points.len()];
        self.point_index += 1;
        point
    }
}

#[allow(dead_code)]
pub fn ok_element(duration: &str, seconds: u64, distance: &str, meters: u64) -> MatrixElement {
    MatrixElement {
        status: "OK".to_string(),
        duration: Some(TextValue {
            text: duration.to_string(),
            value: seconds,
        }),
        distance: Some(TextValue {
            text: distance.to_string(),
            value: meters,
        }),
    }
}

#[allow(dead_code)]
pub fn unavailable_element() -> MatrixElement {
    MatrixElement {
        status: "ZERO_RESULTS".to_string(),
        duration: None,
        distance: None,
    }
}

#[allow(dead_code)]
pub fn land_result(address: &str) -> GeocodeResult {
    GeocodeResult {
        formatted_address: address.to_string(),
        types: vec!["street_address".to_string()],
        address_components: vec![
            AddressComponent {
                long_name: "65".to_string(),
                types: vec!["street_number".to_string()],
            },
            AddressComponent {
                long_name: "Front Street West".to_string(),
                types: vec!["route".to_string()],
            },
        ],
    }
}

#[allow(dead_code)]
pub fn water_result() -> GeocodeResult {
    GeocodeResult {
        formatted_address: "Toronto, ON, Canada".to_string(),
        types: vec!["locality".to_string(), "political".to_string()],
        address_components: vec![],
    }
}

#[allow(dead_code)]
pub fn driving_route(instructions: &[&str]) -> DirectionsRoute {
    DirectionsRoute {
        legs: vec![RouteLeg {
            steps: instructions
                .iter()
                .map(|text| RouteStep {
                    travel_mode: "DRIVING".to_string(),
                    instructions: text.to_string(),
                })
                .collect(),
        }],
    }
}

#[allow(dead_code)]
pub fn hub(name: &str, lat: f64, lng: f64) -> Place {
    Place {
        location: GeoPoint::new(lat, lng).unwrap(),
        name: name.to_string(),
    }
}

/// Landmark-anchored config used by most scenarios
#[allow(dead_code)]
pub fn anchored_config() -> PipelineConfig {
    PipelineConfig::landmark_anchored()
}
