// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Edge Authentication Gate
//!
//! Request interception for gated brand content.
//!
//! ## Request Flow
//!
//! 1. Edge receives a request and runs the gate middleware first
//! 2. Public allow-lists short-circuit to pass-through; paths outside the
//!    protected prefix pass by default
//! 3. For gated paths the gate:
//!    - extracts the session cookie
//!    - verifies the HS256 compact token against the shared secret
//!    - authorizes the claims against expiry and the brand entitlement set
//! 4. Allow forwards the request unmodified; any denial answers 302 to the
//!    login path with `brand` and `next` query parameters attached
//!
//! ## Security
//!
//! - Signature comparison is constant-time
//! - `alg`/`typ` are matched exactly, failing closed on anything unexpected
//! - Every failure collapses to the same redirect; reasons stay internal
//! - The gate holds no per-request state and touches no storage

pub mod base64url;
pub mod cookie;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod policy;
pub mod token;

pub use error::{DenyReason, VerifyError};
pub use extract::Session;
pub use middleware::gate;
pub use token::SessionClaims;
