//! HTTP handlers and route configuration for the integral service.

use actix_web::{HttpResponse, get, post, web};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use log::info;

use crate::api::dto::{IntegralRequest, IntegralResponse};
use crate::api::errors::ApiError;
use crate::api::service::IntegralService;

#[post("/integrate")]
pub async fn integrate(body: web::Json<IntegralRequest>) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    info!(
        "integrate request: '{}', bounds: {:?}..{:?}, plot: {:?}",
        request.expression, request.lower_bound, request.upper_bound, request.want_plot
    );
    let outcome = IntegralService::compute(&request)?;
    let response = IntegralResponse {
        original_expression: outcome.original_expression,
        integral_expression: outcome.integral_expression,
        definite_value: outcome.definite_value,
        plot: outcome.plot_png.map(|png| STANDARD.encode(png)),
        explanation: outcome.explanation,
    };
    Ok(HttpResponse::Ok().json(response))
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"status": "ok"}))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(integrate).service(health);
}
