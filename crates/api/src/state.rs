// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Server state management module
//!
//! This module provides shared application state for the coupon proxy server,
//! including configuration, the upstream client, and coordinated cancellation.

use std::sync::Arc;

use jiomart_api::{JioMartClient, ResponseValidation};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use utoipa::ToSchema;

use crate::config::{Environment, ServerConfig};

/// Shared application state with cancellation token support
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Server configuration
    config: ServerConfig,
    /// Client for the upstream coupon API
    upstream: Arc<JioMartClient>,
    /// Cancellation token for coordinated shutdown
    pub cancellation_token: CancellationToken,
}

impl ServerState {
    /// Create new server state
    pub fn new(
        config: ServerConfig,
        upstream: Arc<JioMartClient>,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            upstream,
            cancellation_token,
        }
    }

    /// Server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Client for the upstream coupon API
    pub fn upstream(&self) -> &Arc<JioMartClient> {
        &self.upstream
    }

    /// Snapshot of the service's health
    ///
    /// The proxy holds no state and performs no upstream calls here; the
    /// check reports process-level liveness plus the active configuration.
    pub fn health_check(&self) -> HealthCheck {
        HealthCheck {
            status: HealthStatus::Up,
            version: Box::from(env!("CARGO_PKG_VERSION")),
            environment: self.config.environment,
            upstream_validation: self.upstream.config().validation,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Health status of the service
#[derive(Debug, Serialize, PartialEq, Eq, ToSchema)]
pub enum HealthStatus {
    /// Service is fully operational and responding normally
    Up,
}

/// Health check status
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheck {
    /// Service status
    pub status: HealthStatus,
    /// Service version
    pub version: Box<str>,
    /// Environment
    pub environment: Environment,
    /// Active upstream response-validation policy
    #[schema(value_type = String)]
    pub upstream_validation: ResponseValidation,
    /// Timestamp
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use jiomart_api::JioMartConfig;

    use super::*;

    fn test_state(token: CancellationToken) -> ServerState {
        let config = ServerConfig::for_testing();
        let upstream = Arc::new(JioMartClient::new(JioMartConfig::default()).unwrap());
        ServerState::new(config, upstream, token)
    }

    #[test]
    fn server_state_creation() {
        let state = test_state(CancellationToken::new());
        assert!(!state.cancellation_token.is_cancelled());
    }

    #[test]
    fn server_state_with_cancellation_token() {
        let token = CancellationToken::new();
        let state = test_state(token.clone());

        assert!(!state.cancellation_token.is_cancelled());

        // Test that the tokens are linked
        token.cancel();
        assert!(state.cancellation_token.is_cancelled());
    }

    #[test]
    fn health_check_reports_environment() {
        let state = test_state(CancellationToken::new());
        let health = state.health_check();

        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.environment, Environment::Testing);
        assert_eq!(health.upstream_validation, ResponseValidation::Strict);
    }
}
