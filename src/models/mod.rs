pub mod destination;
pub mod duration;
pub mod geo_point;
pub mod travel;

pub use destination::{AcceptedResult, Candidate};
pub use duration::parse_duration_minutes;
pub use geo_point::GeoPoint;
pub use travel::{EtaMap, EtaResult, EtaSuccess, TravelMode};
