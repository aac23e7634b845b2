// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! `OpenAPI` document definition
//!
//! Aggregates the annotated handlers and schemas into the served spec.

use utoipa::OpenApi;

use crate::{
    config::Environment,
    error::ErrorBody,
    routes::handlers::{CouponCheckRequest, CouponCheckResponse},
    state::{HealthCheck, HealthStatus},
};

/// `OpenAPI` documentation for the coupon proxy
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Coupon Proxy API",
        description = "Proxies coupon-validation requests to the JioMart cart API and relays normalized results."
    ),
    paths(
        crate::routes::handlers::health_handler,
        crate::routes::handlers::coupon_check_handler
    ),
    components(schemas(
        CouponCheckRequest,
        CouponCheckResponse,
        ErrorBody,
        HealthCheck,
        HealthStatus,
        Environment
    )),
    tags(
        (name = "coupon", description = "Coupon validation endpoints"),
        (name = "health", description = "Service health endpoints")
    )
)]
pub struct ApiDoc;
