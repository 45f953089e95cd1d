pub mod candidate_pipeline;
pub mod google_maps;
pub mod maps;

pub use candidate_pipeline::CandidatePipeline;
pub use google_maps::GoogleMapsClient;
pub use maps::MapsProvider;
