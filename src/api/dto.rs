//! Request and response bodies of the integral endpoint.

use serde::{Deserialize, Serialize};

/// Body of `POST /integrate`.
///
/// `lower_bound` and `upper_bound` must be given together; a single bound is
/// rejected. `want_plot` defaults to false.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntegralRequest {
    pub expression: String,
    #[serde(default)]
    pub lower_bound: Option<f64>,
    #[serde(default)]
    pub upper_bound: Option<f64>,
    #[serde(default)]
    pub want_plot: Option<bool>,
}

/// Successful response of `POST /integrate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegralResponse {
    pub original_expression: String,
    pub integral_expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definite_value: Option<f64>,
    /// base64-encoded PNG, present only when a plot was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// step-by-step description of how the integral was resolved
    pub explanation: Vec<String>,
}
