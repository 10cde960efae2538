// Mock Service Implementations
// Stand-in for the Discord REST API

use async_trait::async_trait;
use parking_lot::Mutex;
use secrecy::SecretString;
use wake_relay::config::DEFAULT_DISCORD_API_BASE;
use wake_relay::services::discord::{DiscordClient, InteractionEditor};
use wake_relay::utils::{RelayError, RelayResult};

/// One request the relay would have sent
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEdit {
    pub method: String,
    pub url: String,
    pub authorization: String,
    pub body: serde_json::Value,
}

/// Builds every edit with the real client and records it instead of sending
pub struct MockDiscordApi {
    client: DiscordClient,
    pub edits: Mutex<Vec<RecordedEdit>>,
    pub failing_tokens: Vec<String>,
}

impl MockDiscordApi {
    pub fn new(application_id: &str) -> Self {
        Self {
            client: DiscordClient::new(
                DEFAULT_DISCORD_API_BASE,
                application_id,
                SecretString::new("bot-token".to_string()),
            )
            .expect("valid api base"),
            edits: Mutex::new(Vec::new()),
            failing_tokens: Vec::new(),
        }
    }

    pub fn failing_for(mut self, token: &str) -> Self {
        self.failing_tokens.push(token.to_string());
        self
    }

    pub fn sorted_edits(&self) -> Vec<RecordedEdit> {
        let mut edits = self.edits.lock().clone();
        edits.sort_by(|a, b| a.url.cmp(&b.url));
        edits
    }
}

#[async_trait(?Send)]
impl InteractionEditor for MockDiscordApi {
    async fn edit_original_response(&self, token: &str, content: &str) -> RelayResult<String> {
        let request = self.client.edit_request(token, content).build()?;
        let body: serde_json::Value = request
            .body()
            .and_then(|b| b.as_bytes())
            .map(serde_json::from_slice)
            .transpose()?
            .unwrap_or(serde_json::Value::Null);
        let authorization = request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.edits.lock().push(RecordedEdit {
            method: request.method().to_string(),
            url: request.url().to_string(),
            authorization,
            body: body.clone(),
        });

        if self.failing_tokens.iter().any(|t| t == token) {
            return Err(RelayError::discord_error("Unknown Webhook").with_status(404));
        }
        Ok(body.to_string())
    }
}
