// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP request handlers module
//!
//! This module provides HTTP request handlers for the coupon proxy server:
//! the health check and the coupon-check operation that proxies to the
//! upstream cart API.

use axum::{Json, extract::State, response::IntoResponse};
use jiomart_api::ApplyCouponRequest;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::{
    error::{ErrorBody, ServerError},
    extractors::JsonBody,
    state::{HealthCheck, ServerState},
};

/// Health check endpoint handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Health check endpoint",
    description = "Returns the current health status of the proxy, including version, environment, and the active upstream validation policy.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthCheck)
    )
)]
pub async fn health_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(state.health_check())
}

/// Fallback handler producing the JSON 405 contract for wrong-method requests
pub async fn method_not_allowed_handler() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Coupon check request
///
/// All five fields are required; the handler rejects requests where any is
/// absent, `null`, or empty. Values are forwarded to the upstream API
/// verbatim. `authToken` and `pin` are credentials and are never echoed
/// back or logged.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CouponCheckRequest {
    /// Opaque coupon code to apply
    #[serde(default)]
    #[schema(example = "SAVE20")]
    coupon: Option<String>,
    /// Shopping cart identifier
    #[serde(default)]
    cart_id: Option<String>,
    /// Authenticated user identifier
    #[serde(default)]
    user_id: Option<String>,
    /// Bearer credential for the upstream API
    #[serde(default)]
    auth_token: Option<String>,
    /// Secondary credential/location code
    #[serde(default)]
    pin: Option<String>,
}

impl CouponCheckRequest {
    /// Validate the request and convert it into the upstream call parameters
    ///
    /// # Errors
    ///
    /// Returns `ServerError::MissingFields` if any field is absent or empty.
    fn into_apply_request(self) -> Result<ApplyCouponRequest, ServerError> {
        let present = |field: Option<String>| field.filter(|value| !value.is_empty());

        match (
            present(self.coupon),
            present(self.cart_id),
            present(self.user_id),
            present(self.auth_token),
            present(self.pin),
        ) {
            (Some(coupon_code), Some(cart_id), Some(user_id), Some(auth_token), Some(pin)) => {
                Ok(ApplyCouponRequest {
                    coupon_code,
                    cart_id,
                    user_id,
                    auth_token,
                    pin,
                })
            }
            _ => Err(ServerError::MissingFields),
        }
    }
}

/// Response from the coupon check endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct CouponCheckResponse {
    /// The coupon code from the request, echoed back
    pub coupon: String,
    /// Raw upstream response body
    #[schema(value_type = Object)]
    pub result: serde_json::Value,
}

/// Coupon check
///
/// Validates the request fields, issues exactly one GET to the upstream
/// cart API with the coupon/cart mapped to query parameters and the
/// credentials mapped to headers, and relays the classified result.
///
/// # Errors
///
/// Returns `ServerError` with the contract's status/body mapping when
/// validation fails or the upstream call does.
#[utoipa::path(
    post,
    path = "/v1/coupon/check",
    tag = "coupon",
    summary = "Validate a coupon against a cart",
    description = "Proxies one coupon-application call to the upstream cart API and relays the outcome. Failure responses carry an advisory `retry` flag when the condition is likely transient.",
    request_body = CouponCheckRequest,
    responses(
        (status = 200, description = "Upstream produced a usable response", body = CouponCheckResponse),
        (status = 400, description = "Missing required fields or malformed JSON", body = ErrorBody),
        (status = 405, description = "Method not allowed", body = ErrorBody),
        (status = 429, description = "Upstream answered with a non-JSON block/challenge page", body = ErrorBody),
        (status = 502, description = "Upstream JSON carried no usable content", body = ErrorBody),
        (status = 500, description = "Upstream call failed (timeout, network error, non-2xx)", body = ErrorBody)
    )
)]
pub async fn coupon_check_handler(
    State(state): State<ServerState>,
    JsonBody(request): JsonBody<CouponCheckRequest>,
) -> Result<Json<CouponCheckResponse>, ServerError> {
    let upstream_request = request.into_apply_request()?;
    let coupon = upstream_request.coupon_code.clone();

    debug!(coupon, "proxying coupon check");

    let result = state.upstream().apply_coupon(&upstream_request).await?;

    Ok(Json(CouponCheckResponse { coupon, result }))
}
