// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HMAC-SHA256 compact token verification.
//!
//! A session token is `header64.payload64.signature64`, each segment
//! unpadded base64url. The signature is HMAC-SHA256 over the UTF-8 bytes of
//! `header64 + "." + payload64`, keyed by the shared secret's UTF-8 bytes.
//!
//! The verifier is claim-schema agnostic: it checks structure, the
//! `alg`/`typ` gate, and the signature, then hands back whatever claims the
//! payload carried. Expiry and entitlement decisions live in
//! [`super::policy`], so this module is reusable across claim schemas.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;

use super::base64url;
use super::error::VerifyError;

type HmacSha256 = Hmac<Sha256>;

/// The single supported algorithm identifier. Anything else fails closed.
const EXPECTED_ALG: &str = "HS256";
/// The expected token type tag.
const EXPECTED_TYP: &str = "JWT";

/// Header segment of a compact token.
#[derive(Debug, Deserialize)]
struct TokenHeader {
    #[serde(default)]
    alg: Option<String>,
    #[serde(default)]
    typ: Option<String>,
}

/// Claims recognized by the gate, decoded permissively.
///
/// Unknown payload fields are ignored and wrong-typed known fields are
/// treated as absent, matching the issuer's loose JSON contract.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClaims {
    /// Expiry as Unix seconds. Absent or non-numeric means the expiry rule
    /// never fires; token lifetime is then entirely the issuer's business.
    pub exp: Option<i64>,

    /// Entitled resource keys, lowercased. Missing or non-array `slugs`
    /// yields an empty set.
    pub slugs: Vec<String>,

    /// Opaque subject identifier, carried for logging and introspection
    /// only. Never part of the gate decision.
    pub sub: Option<String>,
}

impl SessionClaims {
    fn from_payload(payload: &Value) -> Self {
        let exp = payload.get("exp").and_then(claim_seconds);
        let slugs = payload
            .get("slugs")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(scalar_to_lowercase).collect())
            .unwrap_or_default();
        let sub = payload
            .get("sub")
            .and_then(Value::as_str)
            .map(str::to_owned);
        Self { exp, slugs, sub }
    }
}

/// Extract a Unix-seconds claim, accepting any JSON number.
///
/// Non-integral values are truncated toward zero after range-checking;
/// anything that is not a finite in-range number reads as absent.
fn claim_seconds(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if !f.is_finite() || f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return None;
    }
    Some(f as i64)
}

/// Coerce a scalar entitlement entry to its lowercase string form.
///
/// Nulls, arrays, and objects are skipped rather than stringified.
fn scalar_to_lowercase(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_lowercase()),
        Value::Number(n) => Some(n.to_string().to_lowercase()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Verify a compact token against the shared secret.
///
/// 1. Split into exactly three non-empty segments.
/// 2. Decode the header and require `alg == "HS256"` and `typ == "JWT"`
///    exactly (case-sensitive, fail-closed on anything else).
/// 3. Decode the payload as JSON.
/// 4. Recompute HMAC-SHA256 over `header64.payload64` and compare with the
///    decoded signature in constant time.
///
/// Every failure mode maps to a [`VerifyError`] variant; this function never
/// panics on malformed input.
pub fn verify(token: &str, secret: &[u8]) -> Result<SessionClaims, VerifyError> {
    let mut segments = token.split('.');
    let (Some(header64), Some(payload64), Some(signature64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(VerifyError::Malformed);
    };
    if header64.is_empty() || payload64.is_empty() || signature64.is_empty() {
        return Err(VerifyError::Malformed);
    }

    let header_raw = base64url::decode(header64)?;
    let header: TokenHeader =
        serde_json::from_slice(&header_raw).map_err(|_| VerifyError::Json)?;
    if header.alg.as_deref() != Some(EXPECTED_ALG) || header.typ.as_deref() != Some(EXPECTED_TYP) {
        return Err(VerifyError::Algorithm);
    }

    let payload_raw = base64url::decode(payload64)?;
    let payload: Value = serde_json::from_slice(&payload_raw).map_err(|_| VerifyError::Json)?;

    let signature = base64url::decode(signature64)?;
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| VerifyError::Signature)?;
    mac.update(header64.as_bytes());
    mac.update(b".");
    mac.update(payload64.as_bytes());
    // verify_slice is a constant-time comparison; a plain == would leak a
    // timing side channel on the signature prefix.
    mac.verify_slice(&signature)
        .map_err(|_| VerifyError::Signature)?;

    Ok(SessionClaims::from_payload(&payload))
}
