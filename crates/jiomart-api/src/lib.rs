// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the JioMart cart API
//!
//! This crate wraps the JioMart storefront's coupon-application endpoint behind
//! a typed client. The upstream API is treated as opaque: the client forwards
//! caller-supplied credentials verbatim and classifies the response rather than
//! modeling its full shape.
//!
//! # Response classification
//!
//! The upstream service sits behind anti-bot infrastructure that sometimes
//! answers with an HTML challenge page instead of data. [`ResponseValidation`]
//! controls how aggressively responses are vetted:
//!
//! - **Strict**: non-JSON content types and JSON bodies carrying neither a
//!   `result` nor an `error` field are rejected as distinct error variants so
//!   callers can surface retryable conditions.
//! - **Lenient**: any 2xx body is relayed as-is.

pub mod jiomart;

pub use jiomart::{
    ApplyCouponRequest, JioMartClient, JioMartConfig, JioMartError, ResponseValidation,
};
