// src/test_utils/mod.rs

#[cfg(test)]
pub mod mock_discord;

#[cfg(test)]
pub use mock_discord::RecordingEditor;

#[cfg(test)]
pub fn test_signing_key() -> ed25519_dalek::SigningKey {
    ed25519_dalek::SigningKey::from_bytes(&[7u8; 32])
}

/// Hex signature over `timestamp || body`, as Discord sends it
#[cfg(test)]
pub fn sign_body(key: &ed25519_dalek::SigningKey, timestamp: &str, body: &[u8]) -> String {
    use ed25519_dalek::Signer;

    let mut message = timestamp.as_bytes().to_vec();
    message.extend_from_slice(body);
    hex::encode(key.sign(&message).to_bytes())
}

#[cfg(test)]
pub fn test_config_values() -> std::collections::HashMap<String, String> {
    use crate::config::*;

    [
        (ENV_APPLICATION_ID, "app-123".to_string()),
        (ENV_BOT_TOKEN, "bot-token".to_string()),
        (
            ENV_PUBLIC_KEY,
            hex::encode(test_signing_key().verifying_key().to_bytes()),
        ),
        (ENV_ALLOWED_USER_ID, "user-1".to_string()),
        (ENV_ALLOWED_CHANNEL_ID, "channel-1".to_string()),
        (ENV_DEVICE_USER, "esp32".to_string()),
        (ENV_DEVICE_PASS, "s3cret-pass".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[cfg(test)]
pub fn test_config() -> crate::config::RelayConfig {
    let values = test_config_values();
    crate::config::RelayConfig::from_lookup(|name| values.get(name).cloned())
        .expect("test config is complete")
}

#[cfg(test)]
pub fn basic_auth_header(user: &str, pass: &str) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    format!("Basic {}", STANDARD.encode(format!("{}:{}", user, pass)))
}
