// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session introspection.
//!
//! Lets the portal SPA ask "who am I here" without tripping the gate: the
//! endpoint is public, reads the session cookie itself, and reports an
//! anonymous session rather than failing when the cookie is absent or
//! invalid.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::gate::{cookie, policy, token};
use crate::state::AppState;

/// Introspection result for the presented session cookie.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionInfo {
    /// Whether a valid, unexpired session was presented.
    pub authenticated: bool,
    /// Opaque subject identifier from the session, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Brand slugs this session is entitled to.
    pub slugs: Vec<String>,
    /// Session expiry as Unix seconds, if the token carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl SessionInfo {
    fn anonymous() -> Self {
        Self {
            authenticated: false,
            subject: None,
            slugs: Vec::new(),
            expires_at: None,
        }
    }
}

/// Report the state of the presented session cookie.
#[utoipa::path(
    get,
    path = "/v1/session",
    tag = "Session",
    responses(
        (status = 200, description = "Session state (authenticated or anonymous)", body = SessionInfo)
    )
)]
pub async fn session_info(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionInfo> {
    let claims = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| cookie::extract(raw, &state.gate.cookie_name))
        .and_then(|token_str| token::verify(&token_str, state.gate.secret.as_bytes()).ok())
        // An expired session reads as anonymous here too.
        .filter(|claims| policy::authorize(claims, "", Utc::now().timestamp_millis()).is_ok());

    let info = match claims {
        Some(claims) => SessionInfo {
            authenticated: true,
            subject: claims.sub,
            slugs: claims.slugs,
            expires_at: claims.exp,
        },
        None => SessionInfo::anonymous(),
    };

    Json(info)
}
