// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Coupon Proxy Server Implementation
//!
//! This crate provides the HTTP server for the coupon proxy, built with Axum
//! and designed for production use with comprehensive configuration,
//! middleware, and graceful shutdown capabilities. The service exposes a
//! single coupon-check operation that proxies to the JioMart cart API via
//! the [`jiomart_api`] client crate.
//!
//! # Module Structure
//!
//! - [`config`]: Server configuration and environment management with hierarchical loading
//! - [`error`]: Error types and HTTP response handling with proper status codes
//! - [`state`]: Shared application state management with cancellation token support
//! - [`server`]: Main server implementation, lifecycle, and coordinated shutdown
//! - [`routes`]: Route configuration and HTTP request handlers
//! - [`extractors`]: JSON body extractor with detailed parse errors
//! - [`openapi`]: `OpenAPI` specification and Swagger UI endpoints for API documentation
//!
//! # Key Features
//!
//! - **Stateless Proxying**: exactly one outbound upstream call per inbound request
//! - **Typed Retry Hints**: transient failures carry an advisory `retry` flag
//! - **Graceful Shutdown**: coordinated termination using `CancellationToken`
//! - **Comprehensive Middleware**: request tracing, request ids, CORS, timeouts

pub mod config;
pub mod docs;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{Environment, ServerConfig, UpstreamConfig};
pub use error::{ServerError, ServerResult};
pub use server::{Server, ShutdownConfig};
pub use state::{HealthCheck, ServerState};
