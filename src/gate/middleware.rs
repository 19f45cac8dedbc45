// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The gate controller: pass a request through or redirect to login.
//!
//! Mount with `axum::middleware::from_fn_with_state` over the whole router;
//! the gate classifies paths itself, so public routes stay cheap.
//!
//! Every failure mode - missing cookie, malformed token, wrong algorithm,
//! expired session, unauthorized resource - collapses to the same HTTP 302
//! into the login flow. The internal reason is logged at debug level but
//! never surfaced to the client.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use url::form_urlencoded;

use super::{cookie, policy, token};
use crate::config::GateConfig;
use crate::state::AppState;

/// Per-request gate decision.
///
/// 1. Public exact matches and prefixes pass through untouched.
/// 2. Paths outside the protected prefix pass through as well; only `/p/…`
///    is gated and everything else is implicitly public (deliberate
///    default-open, see [`GateConfig`]).
/// 3. Gated paths need a session cookie that verifies and is authorized for
///    the resource key; otherwise the request is redirected to the login
///    path with the brand hint and the original path+query attached.
pub async fn gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let config = &state.gate;
    let path = request.uri().path().to_owned();

    if config.is_public(&path) {
        return next.run(request).await;
    }
    let Some(resource_key) = policy::resource_key(&path, &config.protected_prefix) else {
        return next.run(request).await;
    };

    let original = match request.uri().query() {
        Some(query) => format!("{path}?{query}"),
        None => path.clone(),
    };

    let Some(token_str) = request
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| cookie::extract(raw, &config.cookie_name))
    else {
        tracing::debug!(%path, "gate: no session cookie");
        return login_redirect(config, &resource_key, &original);
    };

    let claims = match token::verify(&token_str, config.secret.as_bytes()) {
        Ok(claims) => claims,
        Err(reason) => {
            tracing::debug!(%path, %reason, "gate: token rejected");
            return login_redirect(config, &resource_key, &original);
        }
    };

    if let Err(reason) = policy::authorize(&claims, &resource_key, Utc::now().timestamp_millis()) {
        tracing::debug!(
            %path,
            %reason,
            subject = claims.sub.as_deref().unwrap_or("-"),
            "gate: denied"
        );
        return login_redirect(config, &resource_key, &original);
    }

    let mut request = request;
    request.extensions_mut().insert(claims);
    next.run(request).await
}

/// 302 into the login flow, preserving the brand hint and return target.
fn login_redirect(config: &GateConfig, resource_key: &str, original: &str) -> Response {
    let location = login_location(&config.login_path, resource_key, original);
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Build the redirect target: `<login>?brand=<key>&next=<original>`, with
/// `brand` omitted when the resource key is empty. Relative, so the client
/// resolves it against the request origin.
fn login_location(login_path: &str, resource_key: &str, original: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    if !resource_key.is_empty() {
        query.append_pair("brand", resource_key);
    }
    query.append_pair("next", original);
    format!("{}?{}", login_path, query.finish())
}
