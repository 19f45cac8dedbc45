// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end gate behavior over the assembled router.
//!
//! Drives the real middleware stack with `tower::ServiceExt::oneshot` and
//! asserts the externally observable contract: pass-through vs. a 302 into
//! the login flow with the brand hint and return target attached.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower::ServiceExt;

use portal_edge_gate::{config::GateConfig, routes::router, state::AppState};

const SECRET: &str = "integration-test-secret-0123456789abcdef";

fn app() -> Router {
    router(AppState::new(GateConfig::new(SECRET)))
}

/// Mint a signed session token the way the login flow would.
fn sign_token(payload: &str) -> String {
    sign_token_with_header(r#"{"alg":"HS256","typ":"JWT"}"#, payload)
}

fn sign_token_with_header(header: &str, payload: &str) -> String {
    let header64 = URL_SAFE_NO_PAD.encode(header.as_bytes());
    let payload64 = URL_SAFE_NO_PAD.encode(payload.as_bytes());
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).unwrap();
    mac.update(format!("{header64}.{payload64}").as_bytes());
    let signature64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{header64}.{payload64}.{signature64}")
}

fn entitled_token(slugs: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    sign_token(&format!(
        r#"{{"sub":"user_1","exp":{exp},"slugs":{slugs}}}"#
    ))
}

async fn get(uri: &str, cookie: Option<&str>) -> axum::response::Response {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = cookie {
        request = request.header(header::COOKIE, format!("um_session={token}"));
    }
    app()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

#[tokio::test]
async fn entitled_session_passes_through() {
    let token = entitled_token(r#"["widgetco"]"#);
    let response = get("/p/widgetco", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(report["slug"], "widgetco");
    assert_eq!(report["viewer"], "user_1");
}

#[tokio::test]
async fn unentitled_brand_redirects_with_context() {
    let token = entitled_token(r#"["widgetco"]"#);
    let response = get("/p/othercorp", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/?brand=othercorp&next=%2Fp%2Fothercorp"
    );
}

#[tokio::test]
async fn expired_session_redirects() {
    let exp = chrono::Utc::now().timestamp() - 60;
    let token = sign_token(&format!(r#"{{"exp":{exp},"slugs":["acme"]}}"#));
    let response = get("/p/acme", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/?brand=acme&next=%2Fp%2Facme");
}

#[tokio::test]
async fn malformed_cookie_header_is_treated_as_missing() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/p/acme")
                .header(header::COOKIE, "garbage-no-equals")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/?brand=acme&next=%2Fp%2Facme");
}

#[tokio::test]
async fn public_routes_bypass_the_gate() {
    let response = get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Prefix-matched public namespace: passed through even when nothing is
    // mounted there.
    let response = get("/assets/x.js", None).await;
    assert_ne!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn missing_cookie_redirect_preserves_return_target() {
    let response = get("/p/acme/report", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/?brand=acme&next=%2Fp%2Facme%2Freport"
    );
}

#[tokio::test]
async fn redirect_preserves_query_string() {
    let response = get("/p/acme/report?window=30d", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/?brand=acme&next=%2Fp%2Facme%2Freport%3Fwindow%3D30d"
    );
}

#[tokio::test]
async fn bare_protected_prefix_still_requires_a_session() {
    let response = get("/p/", None).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    // No brand hint for the bare prefix.
    assert_eq!(location(&response), "/?next=%2Fp%2F");

    // A valid session passes the empty resource key; there is simply no
    // content mounted at the bare prefix.
    let token = entitled_token(r#"[]"#);
    let response = get("/p/", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entitlement_is_case_insensitive() {
    let token = entitled_token(r#"["AcmeCo"]"#);
    for uri in ["/p/acmeco", "/p/ACMECO", "/p/AcmeCo"] {
        let response = get(uri, Some(token.as_str())).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn tampered_signature_redirects() {
    let token = entitled_token(r#"["acme"]"#);
    let tampered = {
        let (prefix, signature) = token.rsplit_once('.').unwrap();
        let mut raw = URL_SAFE_NO_PAD.decode(signature).unwrap();
        raw[0] ^= 0x01;
        format!("{prefix}.{}", URL_SAFE_NO_PAD.encode(raw))
    };
    let response = get("/p/acme", Some(tampered.as_str())).await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn downgraded_algorithm_redirects() {
    let exp = chrono::Utc::now().timestamp() + 3600;
    let token = sign_token_with_header(
        r#"{"alg":"HS384","typ":"JWT"}"#,
        &format!(r#"{{"exp":{exp},"slugs":["acme"]}}"#),
    );
    let response = get("/p/acme", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn unlisted_paths_pass_through_by_default() {
    // Deliberate default-open: not public, not under the protected prefix.
    let response = get("/totally/unknown", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn introspection_reports_authenticated_session() {
    let token = entitled_token(r#"["acmeco"]"#);
    let response = get("/v1/session", Some(token.as_str())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let info: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["authenticated"], true);
    assert_eq!(info["slugs"][0], "acmeco");
}

#[tokio::test]
async fn introspection_never_redirects() {
    let response = get("/v1/session", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let info: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["authenticated"], false);
}

#[tokio::test]
async fn health_probes_are_public() {
    let response = get("/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get("/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}
