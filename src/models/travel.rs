use crate::models::duration::parse_duration_minutes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Declaration order is the iteration and display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Transit,
    Bicycling,
    Walking,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Transit,
        TravelMode::Bicycling,
        TravelMode::Walking,
    ];

    /// Returns the `mode` parameter value understood by the maps web services
    pub fn api_name(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Transit => "transit",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Walking => "walking",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// A successful distance/duration estimate for one mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EtaSuccess {
    #[serde(rename = "duration")]
    pub duration_text: String,
    #[serde(rename = "distance")]
    pub distance_text: String,
    pub duration_seconds: u64,
    pub distance_meters: u64,
}

impl EtaSuccess {
    /// Whole minutes of travel. Uses the machine-readable seconds and only
    /// falls back to the display text when no seconds were reported.
    pub fn duration_minutes(&self) -> u32 {
        if self.duration_seconds > 0 {
            (self.duration_seconds / 60) as u32
        } else {
            parse_duration_minutes(&self.duration_text).unwrap_or(0)
        }
    }
}

/// Outcome of one (origin, destination, mode) lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum EtaResult {
    Success(EtaSuccess),
    Error {
        #[serde(rename = "error")]
        error_reason: String,
    },
}

impl EtaResult {
    pub fn error(reason: impl Into<String>) -> Self {
        EtaResult::Error {
            error_reason: reason.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EtaResult::Error { .. })
    }

    pub fn as_success(&self) -> Option<&EtaSuccess> {
        match self {
            EtaResult::Success(success) => Some(success),
            EtaResult::Error { .. } => None,
        }
    }
}

pub type EtaMap = BTreeMap<TravelMode, EtaResult>;
