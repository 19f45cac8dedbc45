// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Unpadded base64url codec for compact token segments.
//!
//! Token segments use the URL-safe alphabet (`A-Z a-z 0-9 - _`) without
//! padding. Decoding failures are surfaced as [`DecodeError`] so callers can
//! fold them into their own failure signal instead of propagating a panic.

use base64ct::{Base64UrlUnpadded, Encoding};
use thiserror::Error;

/// Input is not valid base64url.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid base64url encoding")]
pub struct DecodeError;

/// Decode a base64url string into raw bytes.
///
/// Trailing `=` padding is tolerated and stripped before decoding; the
/// alphabet itself is strict, and non-canonical trailing bits are rejected.
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    let unpadded = input.trim_end_matches('=');
    Base64UrlUnpadded::decode_vec(unpadded).map_err(|_| DecodeError)
}

/// Encode raw bytes as unpadded base64url.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}
