use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::AppState;
use crate::error::GatewayResult;
use crate::payments::traits::PaymentGateway;
use crate::payments::types::{CardBrand, Operation, OperationRequest, PreparedRequest};

const REDACTED: &str = "[REDACTED]";

#[derive(Debug, Deserialize)]
pub struct EnvironmentQuery {
    /// Overrides the configured test mode for this request
    pub test: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct PreparedRequestView {
    pub operation: Operation,
    pub url: String,
    pub method: String,
    /// Header values, with sensitive ones redacted
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl PreparedRequestView {
    fn from_prepared(prepared: PreparedRequest) -> GatewayResult<Self> {
        let headers = prepared
            .headers
            .iter()
            .map(|(name, value)| {
                let rendered = if value.is_sensitive() {
                    REDACTED.to_string()
                } else {
                    String::from_utf8_lossy(value.as_bytes()).into_owned()
                };
                (name.as_str().to_string(), rendered)
            })
            .collect();

        Ok(Self {
            operation: prepared.operation,
            url: prepared.url,
            method: prepared.method.to_string(),
            headers,
            body: serde_json::from_str(&prepared.body)?,
        })
    }
}

/// Response to read an authorization reference from
///
/// Only store references need the stored card's brand; card details are
/// never sent back. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct AuthorizationRequest {
    pub operation: Operation,
    /// Brand of the stored card, by name or processor code
    #[serde(default)]
    pub brand: Option<CardBrand>,
    /// Decoded processor response
    pub response: Value,
}

#[derive(Debug, Serialize)]
pub struct AuthorizationResponse {
    pub operation: Operation,
    pub authorization: Option<String>,
}

pub async fn prepare_request(
    State(state): State<AppState>,
    Query(query): Query<EnvironmentQuery>,
    Json(request): Json<OperationRequest>,
) -> GatewayResult<Json<PreparedRequestView>> {
    let is_test = query.test.unwrap_or_else(|| state.gateway.is_test());
    let prepared = state.gateway.prepare(is_test, request)?;
    Ok(Json(PreparedRequestView::from_prepared(prepared)?))
}

pub async fn extract_authorization(
    State(state): State<AppState>,
    Json(body): Json<AuthorizationRequest>,
) -> Json<AuthorizationResponse> {
    let authorization = state
        .gateway
        .reference_from(body.operation, body.brand, &body.response);

    Json(AuthorizationResponse {
        operation: body.operation,
        authorization,
    })
}
