// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error handling module
//!
//! This module provides error types for server operations, including the
//! mapping from upstream failures to the HTTP status codes and JSON bodies
//! the coupon-check contract promises. Every error surfaces as JSON; callers
//! never see a raw stack trace.

use std::net::SocketAddr;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jiomart_api::JioMartError;
use serde::Serialize;
use thiserror::Error;

/// Error types for server operations
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Network binding errors
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        /// Socket address that failed to bind
        address: SocketAddr,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server startup errors
    #[error("Server startup failed: {source}")]
    Startup {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Server shutdown errors
    #[error("Server shutdown failed: {source}")]
    Shutdown {
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Request used a method the route does not accept
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// One or more required request fields are absent or empty
    #[error("Missing required fields")]
    MissingFields,

    /// JSON parsing errors with detailed context
    #[error("Invalid JSON request: {message}")]
    JsonError {
        /// Detailed error message
        message: String,
    },

    /// Upstream coupon API failure
    #[error(transparent)]
    Upstream(#[from] JioMartError),
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;

/// JSON body returned for every error response
///
/// The `retry` flag is advisory: it marks conditions that are likely
/// transient and safe for the caller to retry. It is omitted (not `false`)
/// on client faults the caller must fix first.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,
    /// Advisory retry hint, present only on transient failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry: Option<bool>,
}

impl ErrorBody {
    fn terminal(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            retry: None,
        }
    }

    fn retryable(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            retry: Some(true),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::Config { .. }
            | ServerError::Bind { .. }
            | ServerError::Startup { .. }
            | ServerError::Shutdown { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::terminal(self.to_string()),
            ),
            ServerError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody::terminal("Method not allowed"),
            ),
            ServerError::MissingFields => (
                StatusCode::BAD_REQUEST,
                ErrorBody::terminal("Missing required fields"),
            ),
            ServerError::JsonError { message } => {
                (StatusCode::BAD_REQUEST, ErrorBody::terminal(message.clone()))
            }
            ServerError::Upstream(upstream) => upstream_response(upstream),
        };

        (status, Json(body)).into_response()
    }
}

/// Map an upstream failure onto the contract's status/body table
fn upstream_response(error: &JioMartError) -> (StatusCode, ErrorBody) {
    match error {
        // Non-JSON answer, most likely an anti-bot challenge page
        JioMartError::Blocked { .. } => (
            StatusCode::TOO_MANY_REQUESTS,
            ErrorBody::retryable("API blocked / non-JSON"),
        ),
        // 2xx JSON that carries no usable content
        JioMartError::UnexpectedPayload => (
            StatusCode::BAD_GATEWAY,
            ErrorBody::retryable("Unexpected API response"),
        ),
        // Non-2xx upstream status: relay the upstream body as the message
        JioMartError::Api { message, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::retryable(message.clone()),
        ),
        JioMartError::Http(_) | JioMartError::Timeout { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::retryable(error.to_string()),
        ),
        JioMartError::Config(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorBody::terminal(error.to_string()),
        ),
    }
}
