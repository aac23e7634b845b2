// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! JioMart cart API integration
//!
//! This module provides the client for the JioMart coupon-application endpoint.
//! One inbound coupon check maps to exactly one outbound GET request; no
//! retries are performed here, callers receive a retry hint instead.

use std::time::Duration;

use reqwest::{Client, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

/// How strictly 2xx upstream responses are vetted before being relayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseValidation {
    /// Reject non-JSON content types and shapeless JSON payloads
    #[default]
    Strict,
    /// Relay any successful response body unchanged
    Lenient,
}

/// Configuration for the JioMart API client
#[derive(Debug, Clone)]
pub struct JioMartConfig {
    /// Base URL for the JioMart cart API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Response classification policy
    pub validation: ResponseValidation,
}

impl Default for JioMartConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.jiomart.com/mst/rest/v1/5".to_string(),
            timeout_seconds: 15,
            validation: ResponseValidation::Strict,
        }
    }
}

/// JioMart API client
#[derive(Debug)]
pub struct JioMartClient {
    client: Client,
    config: JioMartConfig,
}

/// Errors specific to the JioMart API client
#[derive(Debug, Error)]
pub enum JioMartError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured deadline
    #[error("request timed out after {seconds} seconds")]
    Timeout {
        /// Configured timeout in seconds
        seconds: u64,
    },

    /// Upstream answered with a non-JSON payload, likely a challenge page
    #[error("API blocked / non-JSON")]
    Blocked {
        /// Content type the upstream actually returned
        content_type: String,
    },

    /// Upstream answered 2xx JSON that carries neither `result` nor `error`
    #[error("Unexpected API response")]
    UnexpectedPayload,

    /// Upstream answered with a non-success status
    #[error("{message}")]
    Api {
        /// HTTP status returned by the upstream
        status: u16,
        /// Upstream response body, or a status description when empty
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JioMartError {
    /// Whether the condition is likely transient and safe for the caller to retry
    pub fn retry_hint(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

/// Parameters for one coupon-application call
///
/// All values originate from the inbound request and are forwarded verbatim;
/// `auth_token` and `pin` are credentials and must never be logged.
#[derive(Debug, Clone)]
pub struct ApplyCouponRequest {
    /// Opaque coupon code
    pub coupon_code: String,
    /// Shopping cart identifier
    pub cart_id: String,
    /// Authenticated user identifier
    pub user_id: String,
    /// Bearer credential for the upstream API
    pub auth_token: String,
    /// Secondary credential/location code
    pub pin: String,
}

impl JioMartClient {
    /// Create a new JioMart API client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created or configuration is invalid
    pub fn new(config: JioMartConfig) -> Result<Self, JioMartError> {
        if config.base_url.trim().is_empty() {
            return Err(JioMartError::Config("base URL cannot be empty".to_string()));
        }

        if config.timeout_seconds == 0 {
            return Err(JioMartError::Config(
                "timeout must be greater than 0".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("coupon-proxy/0.1.0")
            .build()
            .map_err(JioMartError::Http)?;

        Ok(Self { client, config })
    }

    /// Apply a coupon to a cart via the upstream API
    ///
    /// Issues a single GET to `{base_url}/cart/apply_coupon` with the coupon
    /// and cart mapped to query parameters and the credentials mapped to
    /// headers, then classifies the response according to the configured
    /// [`ResponseValidation`] policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, is answered with a
    /// non-success status, or (under strict validation) the response is not
    /// usable JSON
    pub async fn apply_coupon(&self, request: &ApplyCouponRequest) -> Result<Value, JioMartError> {
        let url = format!("{}/cart/apply_coupon", self.config.base_url);

        debug!(
            url,
            cart_id = %request.cart_id,
            coupon_code = %request.coupon_code,
            "applying coupon via JioMart"
        );

        let call = self
            .client
            .get(&url)
            .query(&[
                ("coupon_code", request.coupon_code.as_str()),
                ("cart_id", request.cart_id.as_str()),
            ])
            .header("authtoken", &request.auth_token)
            .header("userid", &request.user_id)
            .header("pin", &request.pin)
            .header("accept", "application/json, text/plain, */*");

        let response = timeout(Duration::from_secs(self.config.timeout_seconds), call.send())
            .await
            .map_err(|_| JioMartError::Timeout {
                seconds: self.config.timeout_seconds,
            })?
            .map_err(JioMartError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("JioMart API error: {} - {}", status.as_u16(), body);
            let message = if body.trim().is_empty() {
                format!("upstream returned status {}", status.as_u16())
            } else {
                body
            };
            return Err(JioMartError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let strict = self.config.validation == ResponseValidation::Strict;

        if strict && !content_type.contains("application/json") {
            warn!(content_type, "JioMart returned a non-JSON payload");
            return Err(JioMartError::Blocked { content_type });
        }

        let text = response.text().await.map_err(JioMartError::Http)?;
        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            // Lenient mode relays whatever came back, mirroring a raw proxy
            Err(_) if !strict => Value::String(text),
            Err(_) => return Err(JioMartError::UnexpectedPayload),
        };

        if strict && !has_usable_field(&body) {
            warn!("JioMart response carries neither result nor error");
            return Err(JioMartError::UnexpectedPayload);
        }

        Ok(body)
    }

    /// Client configuration
    pub fn config(&self) -> &JioMartConfig {
        &self.config
    }
}

/// A payload is usable when `result` or `error` is present and not `null`
fn has_usable_field(body: &Value) -> bool {
    ["result", "error"]
        .iter()
        .any(|key| matches!(body.get(key), Some(value) if !value.is_null()))
}
