// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{gate, state::AppState};

pub mod content;
pub mod health;
pub mod login;
pub mod session;

/// Assemble the full HTTP surface with the gate layered over everything.
///
/// The gate middleware wraps the entire router (including not-found
/// handling), so any future route under the protected prefix is gated
/// without further wiring. Layer order, outermost first: request-id
/// assignment, trace, request-id propagation, gate, routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(login::login_page))
        .route("/login", get(login::login_page))
        .route("/healthz", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .route("/v1/session", get(session::session_info))
        .route("/p/{slug}", get(content::brand_report))
        .with_state(state.clone())
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn_with_state(state, gate::gate)),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::liveness,
        health::readiness,
        session::session_info,
        content::brand_report
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks,
            session::SessionInfo,
            content::BrandReport
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Session", description = "Session introspection"),
        (name = "Content", description = "Gated brand content")
    )
)]
struct ApiDoc;
