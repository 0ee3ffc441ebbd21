//! Error taxonomy of the HTTP boundary.
//!
//! Engine-internal failures travel as `Result<_, String>`; this module is
//! where they are classified and mapped to HTTP status codes. The
//! classification is stable: the same bad input always yields the same
//! variant, and no error here is fatal to the process.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// malformed or unsupported input expression
    #[error("parse error: {0}")]
    ParseError(String),

    /// exactly one of the two bounds was supplied, or a bound is not finite
    #[error("invalid bounds: {0}")]
    InvalidBoundsError(String),

    /// the expression parsed but no integration rule applies, or the
    /// definite value is not finite on the requested interval
    #[error("integration error: {0}")]
    IntegrationError(String),

    /// plot rendering failed after a plot was explicitly requested
    #[error("plot render error: {0}")]
    PlotRenderError(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ParseError(_) | ApiError::InvalidBoundsError(_) => StatusCode::BAD_REQUEST,
            ApiError::IntegrationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PlotRenderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::ParseError("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidBoundsError("missing upper_bound".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::IntegrationError("no rule".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::PlotRenderError("backend".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_status_matches() {
        let error = ApiError::IntegrationError("divergent".to_string());
        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_error_message_names_the_problem() {
        let error = ApiError::InvalidBoundsError("upper_bound is missing".to_string());
        assert!(error.to_string().contains("upper_bound"));
    }
}
