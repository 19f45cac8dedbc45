// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization policy over verified session claims.
//!
//! Rules are evaluated in order and the first failing rule wins:
//!
//! 1. **Expiry** - a numeric `exp` at or past the current time denies.
//! 2. **Entitlement** - a non-empty resource key must be in the claims'
//!    entitlement set (case-insensitive).
//!
//! The current time is a parameter so the expiry boundary is testable
//! without clock control.

use super::error::DenyReason;
use super::token::SessionClaims;

/// Decide whether verified claims may access the resource.
///
/// An absent or non-numeric `exp` never fires the expiry rule; an empty
/// resource key trivially satisfies the entitlement rule (the bare protected
/// prefix names no specific resource).
pub fn authorize(
    claims: &SessionClaims,
    resource_key: &str,
    now_ms: i64,
) -> Result<(), DenyReason> {
    if let Some(exp) = claims.exp {
        // Expiry at the exact millisecond boundary counts as expired.
        if exp.saturating_mul(1000) <= now_ms {
            return Err(DenyReason::Expired);
        }
    }

    if !resource_key.is_empty() {
        let wanted = resource_key.to_lowercase();
        if !claims.slugs.iter().any(|slug| *slug == wanted) {
            return Err(DenyReason::NotEntitled);
        }
    }

    Ok(())
}

/// Extract the resource key from a request path.
///
/// The key is the path segment immediately after `prefix`, up to the next
/// `/`, `?`, or `#`, lowercased. Returns `None` when the path is not under
/// the prefix at all; the bare prefix yields an empty key.
pub fn resource_key(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(rest[..end].to_lowercase())
}
