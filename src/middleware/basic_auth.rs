//! HTTP Basic Auth guard for the device endpoints.

use crate::config::{DeviceCredentials, RelayConfig};
use crate::responses::RelayResponse;
use crate::types::InboundRequest;
use crate::utils::constant_time_eq;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::ExposeSecret;
use std::fmt;
use std::future::Future;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

pub const AUTHORIZATION_HEADER: &str = "authorization";
pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";
pub const WWW_AUTHENTICATE: &str = r#"Basic realm="esp32-realm""#;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("HTTPS Only")]
    InsecureTransport,
    #[error("Unauthorized")]
    MissingHeader,
    #[error("Malformed Authorization Header")]
    Malformed,
    #[error("Unauthorized")]
    InvalidCredentials,
}

impl BasicAuthError {
    pub fn status(&self) -> u16 {
        match self {
            BasicAuthError::InsecureTransport | BasicAuthError::Malformed => 400,
            BasicAuthError::MissingHeader | BasicAuthError::InvalidCredentials => 401,
        }
    }

    pub fn to_response(self) -> RelayResponse {
        let response = RelayResponse::text(self.status(), self.to_string());
        if self.status() == 401 {
            response.with_header("WWW-Authenticate", WWW_AUTHENTICATE)
        } else {
            response
        }
    }
}

/// Decoded `user:password` pair from an Authorization header
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Parses `Basic <base64(user:password)>`. The password is everything after
/// the first colon. Both parts come back NFC-normalized (RFC 7613).
pub fn parse_basic_header(value: &str) -> Result<BasicCredentials, BasicAuthError> {
    let (scheme, encoded) = value.split_once(' ').ok_or(BasicAuthError::Malformed)?;
    let encoded = encoded.trim();
    if scheme != "Basic" || encoded.is_empty() {
        return Err(BasicAuthError::Malformed);
    }

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| BasicAuthError::Malformed)?;
    let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::Malformed)?;
    let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::Malformed)?;

    Ok(BasicCredentials {
        username: nfc(username),
        password: nfc(password),
    })
}

fn nfc(value: &str) -> String {
    value.nfc().collect()
}

/// Both fields are always compared so a user mismatch takes as long as a
/// password mismatch.
pub fn credentials_match(provided: &BasicCredentials, expected: &DeviceCredentials) -> bool {
    let user_ok = constant_time_eq(
        provided.username.as_bytes(),
        nfc(expected.username.expose_secret()).as_bytes(),
    );
    let pass_ok = constant_time_eq(
        provided.password.as_bytes(),
        nfc(expected.password.expose_secret()).as_bytes(),
    );
    user_ok & pass_ok
}

fn check_transport(req: &InboundRequest) -> Result<(), BasicAuthError> {
    let forwarded_https = req
        .header(FORWARDED_PROTO_HEADER)
        .map(|p| p.eq_ignore_ascii_case("https"))
        .unwrap_or(false);
    if !req.scheme.eq_ignore_ascii_case("https") || !forwarded_https {
        return Err(BasicAuthError::InsecureTransport);
    }
    Ok(())
}

pub fn authorize(req: &InboundRequest, config: &RelayConfig) -> Result<(), BasicAuthError> {
    if config.require_https {
        check_transport(req)?;
    }

    let header = req
        .header(AUTHORIZATION_HEADER)
        .ok_or(BasicAuthError::MissingHeader)?;
    let provided = parse_basic_header(header)?;

    if !credentials_match(&provided, &config.device) {
        return Err(BasicAuthError::InvalidCredentials);
    }
    Ok(())
}

/// Runs `handler` only when the request carries the device credential.
pub async fn with_basic_auth<F, Fut>(
    req: InboundRequest,
    config: &RelayConfig,
    handler: F,
) -> RelayResponse
where
    F: FnOnce(InboundRequest) -> Fut,
    Fut: Future<Output = RelayResponse>,
{
    match authorize(&req, config) {
        Ok(()) => handler(req).await,
        Err(err) => {
            crate::log_warn!(
                "Rejected device request",
                serde_json::json!({ "path": req.path, "reason": format!("{:?}", err) })
            );
            err.to_response()
        }
    }
}
