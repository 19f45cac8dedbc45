// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login landing stub.
//!
//! The real login experience is the portal SPA; the gate only needs a
//! stable target to redirect denials to. The SPA reads the `brand` and
//! `next` query parameters client-side, so this handler serves a static
//! page and echoes nothing back.

use axum::response::Html;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Sign in</title>
  </head>
  <body>
    <main>
      <h1>Sign in</h1>
      <p>Sign in to view your reports. You will be returned to the page you came from.</p>
    </main>
  </body>
</html>
"#;

/// Serve the login landing page.
pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_static_page() {
        let Html(body) = login_page().await;
        assert!(body.contains("Sign in"));
    }
}
