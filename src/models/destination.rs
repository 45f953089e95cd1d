use crate::models::{EtaMap, GeoPoint, TravelMode};
use serde::{Deserialize, Serialize};

/// A tentative origin/destination pair under evaluation. Lives for a single
/// pipeline attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
}

/// A candidate that passed every acceptance check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedResult {
    pub origin: GeoPoint,
    pub origin_address: String,
    pub destination: GeoPoint,
    pub destination_address: String,
    pub etas: EtaMap,
    /// 1-based attempt on which the candidate was accepted
    pub attempts: usize,
}

impl AcceptedResult {
    pub fn walking_minutes(&self) -> Option<u32> {
        self.etas
            .get(&TravelMode::Walking)
            .and_then(|eta| eta.as_success())
            .map(|eta| eta.duration_minutes())
    }
}
