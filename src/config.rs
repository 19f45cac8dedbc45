// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! immutable gate policy object. Configuration is loaded from the
//! environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `SESSION_COOKIE` | Session cookie name | `um_session` |
//! | `SESSION_SECRET` | HMAC shared secret for session tokens | Required |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! The public allow-lists, the protected prefix, and the login path are
//! compiled-in policy rather than environment-driven; tests construct a
//! [`GateConfig`] directly to exercise alternate policies.

use thiserror::Error;

/// Environment variable naming the session cookie.
pub const SESSION_COOKIE_ENV: &str = "SESSION_COOKIE";

/// Environment variable carrying the HMAC shared secret.
///
/// There is intentionally no fallback value: a placeholder secret in
/// deployment would let anyone mint valid sessions, so startup refuses to
/// proceed without one.
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";

/// Default session cookie name.
pub const DEFAULT_COOKIE_NAME: &str = "um_session";

/// Login flow path; every denial redirects here.
const LOGIN_PATH: &str = "/";

/// Prefix under which brand content is gated. The segment after it is the
/// resource key checked against the session's entitlements.
const PROTECTED_PREFIX: &str = "/p/";

/// Paths that bypass the gate by exact match.
const PUBLIC_PATHS: &[&str] = &["/", "/login", "/healthz", "/favicon.ico", "/robots.txt"];

/// Path prefixes that bypass the gate.
const PUBLIC_PREFIXES: &[&str] = &[
    "/assets/",
    "/static/",
    "/health/",
    "/v1/",
    "/docs",
    "/api-doc",
];

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The shared secret is unset or empty.
    #[error("SESSION_SECRET must be set; the gate refuses to run without a real secret")]
    MissingSecret,
}

/// Immutable gate policy, constructed once at process start.
///
/// Holding the allow-lists here instead of module-level statics keeps the
/// policy swappable in tests and rules out hidden global state.
///
/// Note the classification default: a path that is neither public nor under
/// `protected_prefix` passes through. Only `/p/…` is gated, so new routes
/// are born public unless placed under the protected prefix - a deliberate
/// default-open posture inherited from the original policy.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Name of the session cookie.
    pub cookie_name: String,
    /// HMAC shared secret for session tokens.
    pub secret: String,
    /// Path every denial redirects to.
    pub login_path: String,
    /// Exact-match public paths.
    pub public_paths: Vec<String>,
    /// Prefix-match public paths.
    pub public_prefixes: Vec<String>,
    /// Prefix under which resource keys are extracted and gated.
    pub protected_prefix: String,
}

impl GateConfig {
    /// Create a config with the compiled-in policy and the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            secret: secret.into(),
            login_path: LOGIN_PATH.to_string(),
            public_paths: PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
            public_prefixes: PUBLIC_PREFIXES.iter().map(|p| p.to_string()).collect(),
            protected_prefix: PROTECTED_PREFIX.to_string(),
        }
    }

    /// Override the session cookie name.
    pub fn with_cookie_name(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = name.into();
        self
    }

    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var(SESSION_SECRET_ENV)
            .ok()
            .filter(|secret| !secret.is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        let cookie_name = std::env::var(SESSION_COOKIE_ENV)
            .ok()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());
        Ok(Self::new(secret).with_cookie_name(cookie_name))
    }

    /// Whether a path bypasses the gate entirely.
    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|public| public == path)
            || self
                .public_prefixes
                .iter()
                .any(|prefix| path.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_compiled_in_policy() {
        let config = GateConfig::new("secret");
        assert_eq!(config.cookie_name, "um_session");
        assert_eq!(config.login_path, "/");
        assert_eq!(config.protected_prefix, "/p/");
    }

    #[test]
    fn with_cookie_name_overrides_default() {
        let config = GateConfig::new("secret").with_cookie_name("portal_sid");
        assert_eq!(config.cookie_name, "portal_sid");
    }

    #[test]
    fn exact_public_paths_match_exactly() {
        let config = GateConfig::new("secret");
        assert!(config.is_public("/login"));
        assert!(config.is_public("/healthz"));
        assert!(!config.is_public("/login/extra"));
    }

    #[test]
    fn public_prefixes_match_by_prefix() {
        let config = GateConfig::new("secret");
        assert!(config.is_public("/assets/app.js"));
        assert!(config.is_public("/v1/session"));
        assert!(!config.is_public("/p/acme"));
    }

    #[test]
    fn alternate_policy_is_constructible() {
        let config = GateConfig {
            public_paths: vec!["/open".to_string()],
            public_prefixes: vec![],
            ..GateConfig::new("secret")
        };
        assert!(config.is_public("/open"));
        assert!(!config.is_public("/login"));
    }
}
