// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Routes module
//!
//! This module provides route configuration and handlers for the coupon proxy
//! server.

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{coupon_check_handler, health_handler, method_not_allowed_handler};

use crate::{
    openapi::{openapi_spec, swagger_ui},
    state::ServerState,
};

/// Create application routes
pub fn create_routes() -> Router<ServerState> {
    // Health endpoint kept separate for monitoring purposes
    let health_routes = Router::new().route("/health", get(health_handler));

    let docs_routes = Router::new()
        .route("/api-doc/openapi.json", get(openapi_spec))
        .route("/swagger-ui", get(swagger_ui));

    let api_routes = Router::new().route("/coupon/check", post(coupon_check_handler));

    let v1 = Router::new().nest("/v1", api_routes);

    Router::new()
        .merge(health_routes)
        .merge(docs_routes)
        .merge(v1)
        // Wrong-method requests must get the JSON 405 contract, not an
        // empty axum default response
        .method_not_allowed_fallback(method_not_allowed_handler)
}
