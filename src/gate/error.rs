// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gate failure taxonomy.
//!
//! Every variant here is internal: the controller collapses all of them to
//! the same observable outcome (a redirect into the login flow) so the
//! client cannot tell which check failed. The distinctions exist for tests
//! and debug logging only.

use thiserror::Error;

use super::base64url::DecodeError;

/// Why token verification failed.
///
/// Verification is purely structural and cryptographic; claim semantics
/// (expiry, entitlements) are judged afterwards by the authorization policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    /// Not exactly three non-empty dot-separated segments.
    #[error("token is not a three-part compact serialization")]
    Malformed,

    /// A segment is not valid base64url.
    #[error(transparent)]
    Encoding(#[from] DecodeError),

    /// Header or payload is not valid JSON.
    #[error("token header or payload is not valid JSON")]
    Json,

    /// Header `alg`/`typ` does not name the one supported algorithm.
    #[error("unsupported token algorithm or type")]
    Algorithm,

    /// Signature does not match the signing input under the shared secret.
    #[error("token signature mismatch")]
    Signature,
}

/// Why authorization denied a verified token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DenyReason {
    /// The `exp` claim is at or past the current time.
    #[error("session has expired")]
    Expired,

    /// The entitlement set does not contain the requested resource key.
    #[error("session is not entitled to this resource")]
    NotEntitled,
}
