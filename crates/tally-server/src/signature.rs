//! Webhook signature verification.
//!
//! The platform signs mutating pushes with `SHA1(timestamp + nonce + token)`
//! carried in `x-lark-signature`, with the timestamp and nonce accepted
//! under both the `x-lark-request-*` and the bare `x-lark-*` header names.
//! When any of the three headers is absent the check is skipped, unless the
//! deployment opts into `require_signature`.

use axum::http::HeaderMap;
use sha1::{Digest, Sha1};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("computed signature does not match the supplied signature")]
    Mismatch,
    #[error("signature headers are required but incomplete")]
    MissingHeaders,
}

/// The three signature headers, as supplied (any may be absent).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub timestamp: Option<String>,
    pub nonce: Option<String>,
    pub signature: Option<String>,
}

impl SignatureHeaders {
    pub fn from_header_map(headers: &HeaderMap) -> Self {
        Self {
            timestamp: first_of(headers, &["x-lark-request-timestamp", "x-lark-timestamp"]),
            nonce: first_of(headers, &["x-lark-request-nonce", "x-lark-nonce"]),
            signature: first_of(headers, &["x-lark-signature"]),
        }
    }
}

/// Verify a supplied signature against the shared token.
pub fn verify(
    headers: &SignatureHeaders,
    token: &str,
    require_signature: bool,
) -> Result<(), SignatureError> {
    let (timestamp, nonce, signature) = match (
        headers.timestamp.as_deref(),
        headers.nonce.as_deref(),
        headers.signature.as_deref(),
    ) {
        (Some(t), Some(n), Some(s)) => (t, n, s),
        _ if require_signature => return Err(SignatureError::MissingHeaders),
        _ => {
            tracing::warn!("incomplete signature headers, skipping verification");
            return Ok(());
        }
    };

    if compute(timestamp, nonce, token) == signature {
        Ok(())
    } else {
        tracing::error!("signature verification failed");
        Err(SignatureError::Mismatch)
    }
}

/// Hex SHA-1 of the concatenated timestamp, nonce, and shared token.
pub fn compute(timestamp: &str, nonce: &str, token: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(timestamp.as_bytes());
    hasher.update(nonce.as_bytes());
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

fn first_of(headers: &HeaderMap, names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| headers.get(*name))
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
