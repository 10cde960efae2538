use crate::services::discord::InteractionEditor;
use crate::utils::{RelayError, RelayResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Records every edit instead of calling Discord
#[derive(Default)]
pub struct RecordingEditor {
    pub edits: Mutex<Vec<(String, String)>>,
    failing_tokens: HashSet<String>,
}

impl RecordingEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Edits for `token` are recorded and then fail.
    pub fn failing_for(mut self, token: &str) -> Self {
        self.failing_tokens.insert(token.to_string());
        self
    }

    pub fn edits(&self) -> Vec<(String, String)> {
        self.edits.lock().clone()
    }
}

#[async_trait(?Send)]
impl InteractionEditor for RecordingEditor {
    async fn edit_original_response(&self, token: &str, content: &str) -> RelayResult<String> {
        self.edits
            .lock()
            .push((token.to_string(), content.to_string()));
        if self.failing_tokens.contains(token) {
            return Err(RelayError::discord_error("Unknown Webhook").with_status(404));
        }
        Ok(format!(r#"{{"content":"{}"}}"#, content))
    }
}
