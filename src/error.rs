use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Maps API error: {0}")]
    MapsApi(String),

    #[error("Could not find origin/destination pair with {requirement} after {attempts} attempts")]
    PipelineExhausted { attempts: usize, requirement: String },

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AppError::MapsApi(format!("Request timed out: {}", e))
        } else {
            AppError::MapsApi(format!("Request failed: {}", e))
        }
    }
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::MapsApi(ref e) => {
                tracing::error!("Maps API error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({
                        "error": "Bad Gateway",
                        "message": "Maps service error",
                    }),
                )
            }
            // Exhaustion puts its description under "error" so clients can
            // tell it apart from other server errors
            AppError::PipelineExhausted { attempts, .. } => {
                tracing::warn!(attempts, "Candidate pipeline exhausted: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": self.to_string(),
                        "attempts": attempts,
                    }),
                )
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "Internal Server Error",
                        "message": "Internal server error",
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustion_message_names_attempts() {
        let err = AppError::PipelineExhausted {
            attempts: 30,
            requirement: "all transport modes and 30+ min walk".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Could not find origin/destination pair with all transport modes and 30+ min walk after 30 attempts"
        );
    }

    #[test]
    fn test_status_codes() {
        let exhausted = AppError::PipelineExhausted {
            attempts: 20,
            requirement: "all transport modes".to_string(),
        }
        .into_response();
        assert_eq!(exhausted.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let maps = AppError::MapsApi("HTTP 403".to_string()).into_response();
        assert_eq!(maps.status(), StatusCode::BAD_GATEWAY);

        let internal = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_exhaustion_body_differs_from_internal() {
        async fn body_of(err: AppError) -> serde_json::Value {
            let body = axum::body::to_bytes(err.into_response().into_body(), usize::MAX)
                .await
                .unwrap();
            serde_json::from_slice(&body).unwrap()
        }

        let exhausted = body_of(AppError::PipelineExhausted {
            attempts: 20,
            requirement: "all transport modes".to_string(),
        })
        .await;
        assert_eq!(
            exhausted["error"],
            "Could not find origin/destination pair with all transport modes after 20 attempts"
        );
        assert_eq!(exhausted["attempts"], 20);

        let internal = body_of(AppError::Internal("boom".to_string())).await;
        assert_eq!(internal["error"], "Internal Server Error");
        assert!(internal.get("attempts").is_none());
        assert_ne!(exhausted["error"], internal["error"]);
    }
}
