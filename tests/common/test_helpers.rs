// Common Test Helper Functions
// Builders for signed webhook calls and authenticated device calls

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signer, SigningKey};
use serde_json::{json, Value};
use wake_relay::config::RelayConfig;
use wake_relay::types::{HttpMethod, InboundRequest};

pub const APP_ID: &str = "app-123";
pub const ALLOWED_USER: &str = "user-1";
pub const ALLOWED_CHANNEL: &str = "channel-1";
pub const DEVICE_USER: &str = "esp32";
pub const DEVICE_PASS: &str = "s3cret-pass";
pub const TIMESTAMP: &str = "1700000000";

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[42u8; 32])
}

pub fn test_config() -> RelayConfig {
    let public_key = hex::encode(signing_key().verifying_key().to_bytes());
    RelayConfig::from_lookup(|name| {
        let value = match name {
            "DISCORD_APPLICATION_ID" => APP_ID,
            "DISCORD_BOT_TOKEN" => "bot-token",
            "DISCORD_PUBLIC_KEY" => public_key.as_str(),
            "ALLOWED_USER_ID" => ALLOWED_USER,
            "ALLOWED_CHANNEL_ID" => ALLOWED_CHANNEL,
            "DEVICE_USER" => DEVICE_USER,
            "DEVICE_PASS" => DEVICE_PASS,
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("complete test configuration")
}

pub fn wake_interaction(id: &str, token: &str, channel: &str, user: &str) -> Value {
    json!({
        "id": id,
        "application_id": APP_ID,
        "type": 2,
        "token": token,
        "version": 1,
        "channel_id": channel,
        "member": {"user": {"id": user, "username": "someone"}},
        "data": {"id": "cmd-1", "name": "wake", "type": 1}
    })
}

pub fn discord_request(body: &Value) -> InboundRequest {
    let body = body.to_string();
    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(body.as_bytes());
    let signature = hex::encode(signing_key().sign(&message).to_bytes());

    InboundRequest::new(HttpMethod::Post, "/discord")
        .with_header("X-Signature-Ed25519", signature)
        .with_header("X-Signature-Timestamp", TIMESTAMP)
        .with_body(body)
}

pub fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
}

/// Device request over HTTPS as Cloudflare forwards it
pub fn device_request(method: HttpMethod, path: &str) -> InboundRequest {
    InboundRequest::new(method, path)
        .with_scheme("https")
        .with_header("X-Forwarded-Proto", "https")
        .with_header("Authorization", basic_auth(DEVICE_USER, DEVICE_PASS))
}

pub fn poll_request() -> InboundRequest {
    device_request(HttpMethod::Get, "/poll")
}

pub fn report_request(message: &str) -> InboundRequest {
    device_request(HttpMethod::Post, "/report").with_body(message.as_bytes().to_vec())
}
