// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for gate-verified session claims.
//!
//! The gate places [`SessionClaims`] into request extensions when it passes
//! a gated request through. Handlers behind the protected prefix use the
//! `Session` extractor to read them:
//!
//! ```rust,ignore
//! async fn my_handler(Session(claims): Session) -> impl IntoResponse {
//!     // claims.slugs lists the session's entitlements
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use super::token::SessionClaims;

/// Verified claims for the current request.
///
/// Only present on routes the gate actually vetted; on any other route the
/// extractor rejects with 401 rather than fabricating an anonymous session.
pub struct Session(pub SessionClaims);

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(Session)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}
