//! HTTP surface for preparing EBANX requests
//!
//! The service only shapes requests and reads responses handed to it; it never
//! contacts the processor.

pub mod health;
pub mod requests;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::error::GatewayError;
use crate::payments::providers::EbanxGateway;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<EbanxGateway>,
    pub environment: Arc<str>,
}

impl AppState {
    pub fn new(gateway: EbanxGateway, environment: impl Into<Arc<str>>) -> Self {
        Self {
            gateway: Arc::new(gateway),
            environment: environment.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/requests", post(requests::prepare_request))
        .route("/authorizations", post(requests::extract_authorization))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        error!("Request preparation failed: {}", self);
        let body = Json(json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
