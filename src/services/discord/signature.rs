//! Ed25519 verification of Discord interaction webhooks.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),
    #[error("signature is not hex")]
    InvalidHex,
    #[error("signature has invalid length")]
    InvalidLength,
    #[error("signature verification failed")]
    Mismatch,
}

/// Checks `timestamp || body` against the application's public key.
pub fn verify_signature(
    public_key: &VerifyingKey,
    signature_hex: Option<&str>,
    timestamp: Option<&str>,
    body: &[u8],
) -> Result<(), SignatureError> {
    let signature_hex = signature_hex
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingHeader(SIGNATURE_HEADER))?;
    let timestamp = timestamp
        .filter(|s| !s.is_empty())
        .ok_or(SignatureError::MissingHeader(TIMESTAMP_HEADER))?;

    let signature_bytes = hex::decode(signature_hex).map_err(|_| SignatureError::InvalidHex)?;
    let signature =
        Signature::from_slice(&signature_bytes).map_err(|_| SignatureError::InvalidLength)?;

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    public_key
        .verify(&message, &signature)
        .map_err(|_| SignatureError::Mismatch)
}
