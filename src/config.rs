use crate::constants::*;
use crate::models::GeoPoint;
use std::env;
use std::time::Duration;

/// How the origin of each candidate is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OriginStrategy {
    /// Origin is always the landmark itself
    FixedAtLandmark,
    /// Origin is sampled near a hub, near the landmark, or anywhere in radius
    #[default]
    BiasedRandom,
}

impl std::str::FromStr for OriginStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "landmark" | "fixed" => Ok(OriginStrategy::FixedAtLandmark),
            "biased" | "random" => Ok(OriginStrategy::BiasedRandom),
            _ => Err(format!(
                "Invalid origin strategy: {}. Use 'landmark' or 'biased'",
                s
            )),
        }
    }
}

/// What a check concludes when its maps lookup fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupFailurePolicy {
    /// Treat the failure as a pass (land / no ferry)
    #[default]
    FailOpen,
    /// Treat the failure as a rejection (water / ferry)
    FailClosed,
}

impl LookupFailurePolicy {
    /// Whether a failed lookup should reject the candidate
    pub fn rejects(&self) -> bool {
        matches!(self, LookupFailurePolicy::FailClosed)
    }
}

impl std::str::FromStr for LookupFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail-open" | "open" => Ok(LookupFailurePolicy::FailOpen),
            "fail-closed" | "closed" => Ok(LookupFailurePolicy::FailClosed),
            _ => Err(format!(
                "Invalid lookup failure policy: {}. Use 'fail-open' or 'fail-closed'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_maps_api_key: String,
    pub google_maps_base_url: Option<String>,
    pub maps_request_timeout_secs: u64,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Anchor every sample is drawn around
    pub landmark: GeoPoint,

    pub origin_strategy: OriginStrategy,

    /// Attempts before the pipeline gives up
    pub max_attempts: usize,

    /// Reject candidates whose walk is shorter than this. `None` disables the check.
    pub min_walking_minutes: Option<u32>,

    /// Outer radius (m) for destinations and "anywhere" origins
    pub max_radius_m: f64,

    /// Radius (m) around a chosen hub
    pub hub_radius_m: f64,

    /// Radius (m) around the landmark for the "near landmark" origin branch
    pub landmark_radius_m: f64,

    /// Probability of biasing the origin toward a hub (0.0-1.0)
    pub hub_probability: f64,

    /// Probability of sampling the origin near the landmark (0.0-1.0)
    pub landmark_probability: f64,

    pub water_lookup_policy: LookupFailurePolicy,
    pub ferry_lookup_policy: LookupFailurePolicy,

    /// Count premise/subpremise components as street-level when classifying water
    pub water_include_premise: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::biased_random()
    }
}

impl PipelineConfig {
    /// Randomized origin and destination with a minimum walk
    pub fn biased_random() -> Self {
        Self {
            landmark: UNION_STATION,
            origin_strategy: OriginStrategy::BiasedRandom,
            max_attempts: BIASED_ORIGIN_MAX_ATTEMPTS,
            min_walking_minutes: Some(DEFAULT_MIN_WALKING_MINUTES),
            max_radius_m: DEFAULT_MAX_RADIUS_METERS,
            hub_radius_m: DEFAULT_HUB_RADIUS_METERS,
            landmark_radius_m: DEFAULT_LANDMARK_RADIUS_METERS,
            hub_probability: DEFAULT_HUB_PROBABILITY,
            landmark_probability: DEFAULT_LANDMARK_PROBABILITY,
            water_lookup_policy: LookupFailurePolicy::FailOpen,
            ferry_lookup_policy: LookupFailurePolicy::FailOpen,
            water_include_premise: false,
        }
    }

    /// Origin pinned to the landmark, no walking constraint
    pub fn landmark_anchored() -> Self {
        Self {
            origin_strategy: OriginStrategy::FixedAtLandmark,
            max_attempts: LANDMARK_ORIGIN_MAX_ATTEMPTS,
            min_walking_minutes: None,
            ..Self::biased_random()
        }
    }

    pub fn for_strategy(strategy: OriginStrategy) -> Self {
        match strategy {
            OriginStrategy::FixedAtLandmark => Self::landmark_anchored(),
            OriginStrategy::BiasedRandom => Self::biased_random(),
        }
    }

    /// The origin is only classified when it is randomized
    pub fn checks_origin_water(&self) -> bool {
        self.origin_strategy == OriginStrategy::BiasedRandom
    }

    /// Human-readable acceptance requirement, used in the exhaustion message
    pub fn requirement(&self) -> String {
        match self.min_walking_minutes {
            Some(minutes) => format!("all transport modes and {}+ min walk", minutes),
            None => "all transport modes".to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("PIPELINE_MAX_ATTEMPTS must be at least 1".to_string());
        }
        for (name, radius) in [
            ("PIPELINE_MAX_RADIUS_M", self.max_radius_m),
            ("PIPELINE_HUB_RADIUS_M", self.hub_radius_m),
            ("PIPELINE_LANDMARK_RADIUS_M", self.landmark_radius_m),
        ] {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(format!("{} must be a positive number of meters", name));
            }
        }
        for (name, p) in [
            ("PIPELINE_HUB_PROBABILITY", self.hub_probability),
            ("PIPELINE_LANDMARK_PROBABILITY", self.landmark_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} must be between 0 and 1", name));
            }
        }
        if self.hub_probability + self.landmark_probability > 1.0 {
            return Err(
                "PIPELINE_HUB_PROBABILITY + PIPELINE_LANDMARK_PROBABILITY must not exceed 1"
                    .to_string(),
            );
        }
        Ok(())
    }

    pub fn from_env() -> Result<Self, String> {
        let origin_strategy: OriginStrategy = env::var("PIPELINE_ORIGIN_STRATEGY")
            .unwrap_or_else(|_| "biased".to_string())
            .parse()?;
        let defaults = Self::for_strategy(origin_strategy);

        let min_walking_minutes: u32 = env::var("PIPELINE_MIN_WALKING_MINUTES")
            .unwrap_or_else(|_| defaults.min_walking_minutes.unwrap_or(0).to_string())
            .parse()
            .map_err(|_| "Invalid PIPELINE_MIN_WALKING_MINUTES")?;

        let config = Self {
            landmark: defaults.landmark,
            origin_strategy,

            max_attempts: env::var("PIPELINE_MAX_ATTEMPTS")
                .unwrap_or_else(|_| defaults.max_attempts.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_MAX_ATTEMPTS")?,

            min_walking_minutes: (min_walking_minutes > 0).then_some(min_walking_minutes),

            max_radius_m: env::var("PIPELINE_MAX_RADIUS_M")
                .unwrap_or_else(|_| defaults.max_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_MAX_RADIUS_M")?,

            hub_radius_m: env::var("PIPELINE_HUB_RADIUS_M")
                .unwrap_or_else(|_| defaults.hub_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_HUB_RADIUS_M")?,

            landmark_radius_m: env::var("PIPELINE_LANDMARK_RADIUS_M")
                .unwrap_or_else(|_| defaults.landmark_radius_m.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_LANDMARK_RADIUS_M")?,

            hub_probability: env::var("PIPELINE_HUB_PROBABILITY")
                .unwrap_or_else(|_| defaults.hub_probability.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_HUB_PROBABILITY")?,

            landmark_probability: env::var("PIPELINE_LANDMARK_PROBABILITY")
                .unwrap_or_else(|_| defaults.landmark_probability.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_LANDMARK_PROBABILITY")?,

            water_lookup_policy: env::var("PIPELINE_WATER_LOOKUP_POLICY")
                .unwrap_or_else(|_| "fail-open".to_string())
                .parse()?,

            ferry_lookup_policy: env::var("PIPELINE_FERRY_LOOKUP_POLICY")
                .unwrap_or_else(|_| "fail-open".to_string())
                .parse()?,

            water_include_premise: env::var("PIPELINE_WATER_INCLUDE_PREMISE")
                .unwrap_or_else(|_| defaults.water_include_premise.to_string())
                .parse()
                .map_err(|_| "Invalid PIPELINE_WATER_INCLUDE_PREMISE")?,
        };

        config.validate()?;
        Ok(config)
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let maps_request_timeout_secs: u64 = env::var("MAPS_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_MAPS_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid MAPS_REQUEST_TIMEOUT_SECS")?;

        if maps_request_timeout_secs == 0 {
            return Err("MAPS_REQUEST_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .ok_or(
                    "GOOGLE_MAPS_API_KEY must be set (server-side env var or a local .env file)",
                )?,
            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL").ok(),
            maps_request_timeout_secs,
            pipeline: PipelineConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn maps_request_timeout(&self) -> Duration {
        Duration::from_secs(self.maps_request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const PIPELINE_VARS: &[&str] = &[
        "PIPELINE_ORIGIN_STRATEGY",
        "PIPELINE_MAX_ATTEMPTS",
        "PIPELINE_MIN_WALKING_MINUTES",
        "PIPELINE_MAX_RADIUS_M",
        "PIPELINE_HUB_RADIUS_M",
        "PIPELINE_LANDMARK_RADIUS_M",
        "PIPELINE_HUB_PROBABILITY",
        "PIPELINE_LANDMARK_PROBABILITY",
        "PIPELINE_WATER_LOOKUP_POLICY",
        "PIPELINE_FERRY_LOOKUP_POLICY",
        "PIPELINE_WATER_INCLUDE_PREMISE",
    ];

    fn clear_pipeline_env() {
        for var in PIPELINE_VARS {
            unsafe { env::remove_var(var) };
        }
    }

    #[test]
    fn test_presets() {
        let biased = PipelineConfig::biased_random();
        assert_eq!(biased.max_attempts, 30);
        assert_eq!(biased.min_walking_minutes, Some(30));
        assert!(biased.checks_origin_water());
        assert_eq!(biased.requirement(), "all transport modes and 30+ min walk");

        let anchored = PipelineConfig::landmark_anchored();
        assert_eq!(anchored.max_attempts, 20);
        assert_eq!(anchored.min_walking_minutes, None);
        assert!(!anchored.checks_origin_water());
        assert_eq!(anchored.requirement(), "all transport modes");
        assert_eq!(anchored.max_radius_m, 10_000.0);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "fail-closed".parse::<LookupFailurePolicy>().unwrap(),
            LookupFailurePolicy::FailClosed
        );
        assert!(!LookupFailurePolicy::default().rejects());
        assert!(LookupFailurePolicy::FailClosed.rejects());
        assert!("maybe".parse::<LookupFailurePolicy>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PipelineConfig::biased_random();
        config.hub_probability = 0.9;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::biased_random();
        config.hub_radius_m = 0.0;
        assert!(config.validate().is_err());

        let mut config = PipelineConfig::landmark_anchored();
        config.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_pipeline_from_env_defaults() {
        clear_pipeline_env();
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.origin_strategy, OriginStrategy::BiasedRandom);
        assert_eq!(config.max_attempts, 30);
        assert_eq!(config.min_walking_minutes, Some(30));
        assert_eq!(config.water_lookup_policy, LookupFailurePolicy::FailOpen);
    }

    #[test]
    #[serial]
    fn test_pipeline_from_env_landmark_preset_with_overrides() {
        clear_pipeline_env();
        unsafe {
            env::set_var("PIPELINE_ORIGIN_STRATEGY", "landmark");
            env::set_var("PIPELINE_MAX_ATTEMPTS", "5");
            env::set_var("PIPELINE_FERRY_LOOKUP_POLICY", "fail-closed");
        }
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.origin_strategy, OriginStrategy::FixedAtLandmark);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.min_walking_minutes, None);
        assert_eq!(config.ferry_lookup_policy, LookupFailurePolicy::FailClosed);
        clear_pipeline_env();
    }

    #[test]
    #[serial]
    fn test_pipeline_from_env_zero_minutes_disables_walk_check() {
        clear_pipeline_env();
        unsafe { env::set_var("PIPELINE_MIN_WALKING_MINUTES", "0") };
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.min_walking_minutes, None);
        clear_pipeline_env();
    }

    #[test]
    #[serial]
    fn test_config_requires_api_key() {
        clear_pipeline_env();
        unsafe { env::set_var("GOOGLE_MAPS_API_KEY", "  ") };
        assert!(Config::from_env().is_err());

        unsafe { env::set_var("GOOGLE_MAPS_API_KEY", "test-key") };
        let config = Config::from_env().unwrap();
        assert_eq!(config.google_maps_api_key, "test-key");
        assert_eq!(config.maps_request_timeout(), Duration::from_secs(10));
        unsafe { env::remove_var("GOOGLE_MAPS_API_KEY") };
    }
}
