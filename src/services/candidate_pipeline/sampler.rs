use crate::constants::METERS_PER_DEGREE_LAT;
use crate::models::GeoPoint;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::TAU;

/// Source of randomness for candidate generation.
///
/// One sampler is created per pipeline run so concurrent requests never share
/// a generator.
pub trait PointSampler: Send {
    /// Uniform draw in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniformly distributed point within `radius_meters` of `center`
    fn sample_point(&mut self, center: &GeoPoint, radius_meters: f64) -> GeoPoint {
        let u_angle = self.next_unit();
        let u_radius = self.next_unit();
        point_in_disc(center, radius_meters, u_angle, u_radius)
    }
}

/// Production sampler backed by a seedable `StdRng`
pub struct UniformDiscSampler {
    rng: StdRng,
}

impl UniformDiscSampler {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self::from_seed(rand::random())
    }
}

impl PointSampler for UniformDiscSampler {
    fn next_unit(&mut self) -> f64 {
        StandardUniform.sample(&mut self.rng)
    }
}

/// Map two unit draws onto a point in a disc around `center`.
///
/// The radius is converted to degrees of latitude, the distance from the
/// centre is `sqrt(u_radius)` of it so density is uniform over the area, and
/// the longitude offset is widened by `1 / cos(lat)`.
pub fn point_in_disc(center: &GeoPoint, radius_meters: f64, u_angle: f64, u_radius: f64) -> GeoPoint {
    let radius_degrees = radius_meters / METERS_PER_DEGREE_LAT;

    let angle = u_angle * TAU;
    let distance = u_radius.sqrt() * radius_degrees;

    let delta_lat = distance * angle.cos();
    let delta_lng = distance * angle.sin() / center.lat.to_radians().cos();

    GeoPoint::normalized(center.lat + delta_lat, center.lng + delta_lng)
}
