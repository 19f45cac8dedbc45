// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stand-in gated content handler.
//!
//! The production content layer lives behind this gate as a separate
//! service; this handler demonstrates the pass-through side of the gate and
//! gives the integration suite something real to hit. It is only reachable
//! once the gate has verified and authorized the session, so it can assume
//! entitlement to `slug`.

use axum::{extract::Path, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::gate::Session;

/// Brand report placeholder served under the protected prefix.
#[derive(Debug, Serialize, ToSchema)]
pub struct BrandReport {
    /// Brand slug this report belongs to.
    pub slug: String,
    /// Subject of the viewing session, if the token carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewer: Option<String>,
    /// All slugs the viewing session is entitled to.
    pub entitlements: Vec<String>,
    /// Server-side generation timestamp.
    pub generated_at: DateTime<Utc>,
}

/// Serve the gated brand report.
#[utoipa::path(
    get,
    path = "/p/{slug}",
    params(
        ("slug" = String, Path, description = "Brand slug")
    ),
    tag = "Content",
    responses(
        (status = 200, description = "Brand report", body = BrandReport),
        (status = 302, description = "Redirected to the login flow")
    )
)]
pub async fn brand_report(
    Session(claims): Session,
    Path(slug): Path<String>,
) -> Json<BrandReport> {
    Json(BrandReport {
        slug: slug.to_lowercase(),
        viewer: claims.sub,
        entitlements: claims.slugs,
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::SessionClaims;

    #[tokio::test]
    async fn report_reflects_session() {
        let claims = SessionClaims {
            exp: None,
            slugs: vec!["acmeco".to_string(), "widgetco".to_string()],
            sub: Some("user_1".to_string()),
        };

        let Json(report) = brand_report(Session(claims), Path("AcmeCo".to_string())).await;
        assert_eq!(report.slug, "acmeco");
        assert_eq!(report.viewer.as_deref(), Some("user_1"));
        assert_eq!(report.entitlements, vec!["acmeco", "widgetco"]);
    }
}
