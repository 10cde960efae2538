// src/services/discord/client.rs

//! Discord REST client
//!
//! Covers the two calls the relay makes against Discord's API:
//! - editing the original response of a deferred interaction
//! - bulk-overwriting the application's global slash commands

use crate::config::RelayConfig;
use crate::types::{CommandDefinition, InteractionCallbackData};
use crate::utils::{RelayError, RelayResult};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

/// Anything that can replace the content of a deferred interaction response
#[async_trait(?Send)]
pub trait InteractionEditor {
    /// Returns the response body Discord sent back.
    async fn edit_original_response(&self, token: &str, content: &str) -> RelayResult<String>;
}

pub struct DiscordClient {
    http_client: Client,
    api_base: Url,
    application_id: String,
    bot_token: SecretString,
}

impl DiscordClient {
    pub fn new(api_base: &str, application_id: &str, bot_token: SecretString) -> RelayResult<Self> {
        let api_base = Url::parse(api_base)?;
        if api_base.cannot_be_a_base() {
            return Err(RelayError::config_error(format!(
                "Discord API base is not a base URL: {}",
                api_base
            )));
        }
        Ok(Self {
            http_client: Client::new(),
            api_base,
            application_id: application_id.to_string(),
            bot_token,
        })
    }

    pub fn from_config(config: &RelayConfig) -> RelayResult<Self> {
        Self::new(
            &config.discord_api_base,
            &config.application_id,
            SecretString::new(config.bot_token.expose_secret().clone()),
        )
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// `PATCH /webhooks/{application_id}/{token}/messages/@original`
    pub fn original_response_url(&self, token: &str) -> Url {
        self.endpoint(&[
            "webhooks",
            &self.application_id,
            token,
            "messages",
            "@original",
        ])
    }

    /// `PUT /applications/{application_id}/commands`
    pub fn commands_url(&self) -> Url {
        self.endpoint(&["applications", &self.application_id, "commands"])
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.bot_token.expose_secret())
    }

    async fn read_response(
        &self,
        response: reqwest::Response,
        action: &str,
    ) -> RelayResult<String> {
        let status = response.status();
        let body = response.text().await.map_err(|e| {
            RelayError::discord_error(format!("Failed to read {} response: {}", action, e))
        })?;

        if !status.is_success() {
            return Err(RelayError::discord_error(format!(
                "Discord {} failed with {}: {}",
                action, status, body
            ))
            .with_status(status.as_u16()));
        }
        Ok(body)
    }

    /// `PATCH` replacing the content of the deferred response behind `token`
    pub fn edit_request(&self, token: &str, content: &str) -> RequestBuilder {
        let payload = InteractionCallbackData {
            content: content.to_string(),
        };
        self.http_client
            .patch(self.original_response_url(token))
            .header(AUTHORIZATION, self.authorization())
            .json(&payload)
    }

    /// Bulk-overwrite `PUT` of the application's global commands
    pub fn register_request(&self, commands: &[CommandDefinition]) -> RequestBuilder {
        self.http_client
            .put(self.commands_url())
            .header(AUTHORIZATION, self.authorization())
            .json(commands)
    }

    /// Overwrites the application's global commands with `commands`.
    pub async fn register_commands(&self, commands: &[CommandDefinition]) -> RelayResult<String> {
        let response = self.register_request(commands).send().await?;
        self.read_response(response, "command registration").await
    }
}

#[async_trait(?Send)]
impl InteractionEditor for DiscordClient {
    async fn edit_original_response(&self, token: &str, content: &str) -> RelayResult<String> {
        let response = self.edit_request(token, content).send().await?;
        self.read_response(response, "interaction edit").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_DISCORD_API_BASE;
    use crate::services::discord::relay_commands;
    use reqwest::header::CONTENT_TYPE;
    use reqwest::Method;
    use serde_json::{json, Value};

    fn body_json(request: &reqwest::Request) -> Value {
        let bytes = request
            .body()
            .and_then(|body| body.as_bytes())
            .expect("buffered JSON body");
        serde_json::from_slice(bytes).unwrap()
    }

    fn client() -> DiscordClient {
        DiscordClient::new(
            DEFAULT_DISCORD_API_BASE,
            "app-123",
            SecretString::new("bot-token".to_string()),
        )
        .unwrap()
    }

    #[test]
    fn test_original_response_url() {
        assert_eq!(
            client().original_response_url("t1").as_str(),
            "https://discord.com/api/v10/webhooks/app-123/t1/messages/@original"
        );
    }

    #[test]
    fn test_commands_url() {
        assert_eq!(
            client().commands_url().as_str(),
            "https://discord.com/api/v10/applications/app-123/commands"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_is_tolerated() {
        let client = DiscordClient::new(
            "http://localhost:9000/api/",
            "app-123",
            SecretString::new("bot-token".to_string()),
        )
        .unwrap();
        assert_eq!(
            client.commands_url().as_str(),
            "http://localhost:9000/api/applications/app-123/commands"
        );
    }

    #[test]
    fn test_edit_request_shape() {
        let request = client().edit_request("t1", "PC is awake").build().unwrap();

        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(
            request.url().as_str(),
            "https://discord.com/api/v10/webhooks/app-123/t1/messages/@original"
        );
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bot bot-token"
        );
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_json(&request), json!({"content": "PC is awake"}));
    }

    #[test]
    fn test_register_request_shape() {
        let request = client()
            .register_request(&relay_commands())
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::PUT);
        assert_eq!(
            request.url().as_str(),
            "https://discord.com/api/v10/applications/app-123/commands"
        );
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bot bot-token"
        );
        assert_eq!(
            request.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(
            body_json(&request),
            json!([{"name": "wake", "type": 1, "description": "Wake a device on the network"}])
        );
    }

    #[test]
    fn test_authorization_header_uses_bot_scheme() {
        assert_eq!(client().authorization(), "Bot bot-token");
    }

    #[test]
    fn test_invalid_base_is_config_error() {
        let err = DiscordClient::new(
            "not a url",
            "app-123",
            SecretString::new("bot-token".to_string()),
        )
        .err()
        .unwrap();
        assert_eq!(err.kind, crate::utils::ErrorKind::ConfigurationError);
    }
}
