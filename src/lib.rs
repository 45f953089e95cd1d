// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use services::CandidatePipeline;

// App state for sharing across the application
pub struct AppState {
    pub pipeline: CandidatePipeline,
    /// Browser key handed to the frontend map widget
    pub maps_api_key: String,
}
