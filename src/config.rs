//! Relay configuration, read once per isolate from the Worker environment.
//!
//! Every value is looked up as a secret first and as a plain var second, so
//! the same name can be provisioned either way with wrangler.

use crate::utils::{parse_bool_flag, LogLevel, RelayError, RelayResult};
use ed25519_dalek::VerifyingKey;
use secrecy::SecretString;

pub const DEFAULT_DISCORD_API_BASE: &str = "https://discord.com/api/v10";

pub const ENV_APPLICATION_ID: &str = "DISCORD_APPLICATION_ID";
pub const ENV_BOT_TOKEN: &str = "DISCORD_BOT_TOKEN";
pub const ENV_PUBLIC_KEY: &str = "DISCORD_PUBLIC_KEY";
pub const ENV_ALLOWED_USER_ID: &str = "ALLOWED_USER_ID";
pub const ENV_ALLOWED_CHANNEL_ID: &str = "ALLOWED_CHANNEL_ID";
pub const ENV_DEVICE_USER: &str = "DEVICE_USER";
pub const ENV_DEVICE_PASS: &str = "DEVICE_PASS";
pub const ENV_REQUIRE_HTTPS: &str = "REQUIRE_HTTPS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_DISCORD_API_BASE: &str = "DISCORD_API_BASE";

/// Shared credential the polling device presents on `/poll` and `/report`
#[derive(Debug)]
pub struct DeviceCredentials {
    pub username: SecretString,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct RelayConfig {
    pub application_id: String,
    pub bot_token: SecretString,
    pub public_key: VerifyingKey,
    pub allowed_user_id: String,
    pub allowed_channel_id: String,
    pub device: DeviceCredentials,
    pub require_https: bool,
    pub log_level: LogLevel,
    pub discord_api_base: String,
}

impl RelayConfig {
    /// Builds the configuration from any name → value lookup.
    pub fn from_lookup<F>(lookup: F) -> RelayResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> RelayResult<String> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| RelayError::config_error(format!("Missing {}", name)))
        };

        let public_key = parse_public_key(&required(ENV_PUBLIC_KEY)?)?;
        let discord_api_base = lookup(ENV_DISCORD_API_BASE)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DISCORD_API_BASE.to_string());

        Ok(Self {
            application_id: required(ENV_APPLICATION_ID)?,
            bot_token: SecretString::new(required(ENV_BOT_TOKEN)?),
            public_key,
            allowed_user_id: required(ENV_ALLOWED_USER_ID)?,
            allowed_channel_id: required(ENV_ALLOWED_CHANNEL_ID)?,
            device: DeviceCredentials {
                username: SecretString::new(required(ENV_DEVICE_USER)?),
                password: SecretString::new(required(ENV_DEVICE_PASS)?),
            },
            require_https: parse_bool_flag(lookup(ENV_REQUIRE_HTTPS).as_deref(), true),
            log_level: lookup(ENV_LOG_LEVEL)
                .map(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Info),
            discord_api_base,
        })
    }

    pub fn from_env(env: &worker::Env) -> RelayResult<Self> {
        Self::from_lookup(|name| {
            env.secret(name)
                .map(|s| s.to_string())
                .or_else(|_| env.var(name).map(|v| v.to_string()))
                .ok()
        })
    }
}

/// Parses the hex-encoded Ed25519 application public key.
pub fn parse_public_key(hex_key: &str) -> RelayResult<VerifyingKey> {
    let bytes = hex::decode(hex_key)
        .map_err(|e| RelayError::config_error(format!("Public key is not hex: {}", e)))?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| RelayError::config_error("Public key must be 32 bytes"))?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| RelayError::config_error(format!("Invalid public key: {}", e)))
}
