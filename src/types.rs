// src/types.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// Discord interaction types

/// Interaction types Discord sends to the webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionType {
    Ping,
    ApplicationCommand,
    MessageComponent,
    Autocomplete,
    ModalSubmit,
    Unknown(u8),
}

impl From<u8> for InteractionType {
    fn from(value: u8) -> Self {
        match value {
            1 => InteractionType::Ping,
            2 => InteractionType::ApplicationCommand,
            3 => InteractionType::MessageComponent,
            4 => InteractionType::Autocomplete,
            5 => InteractionType::ModalSubmit,
            other => InteractionType::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionResponseType {
    Pong = 1,
    ChannelMessageWithSource = 4,
    DeferredChannelMessageWithSource = 5,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordUser {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuildMember {
    pub user: DiscordUser,
}

/// `data` of an interaction. Only application commands carry `name`;
/// components and modals send `custom_id` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub custom_id: Option<String>,
}

/// The subset of Discord's Interaction object the relay reads
#[derive(Clone, Deserialize)]
pub struct Interaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub token: String,
    #[serde(default)]
    pub data: Option<CommandData>,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub member: Option<GuildMember>,
    #[serde(default)]
    pub user: Option<DiscordUser>,
}

impl Interaction {
    pub fn interaction_type(&self) -> InteractionType {
        InteractionType::from(self.kind)
    }

    /// Guild invocations carry the user under `member`, DMs under `user`.
    pub fn invoking_user_id(&self) -> Option<&str> {
        self.member
            .as_ref()
            .map(|m| m.user.id.as_str())
            .or_else(|| self.user.as_ref().map(|u| u.id.as_str()))
    }

    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().and_then(|d| d.name.as_deref())
    }
}

impl fmt::Debug for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("token", &"[REDACTED]")
            .field("data", &self.data)
            .field("channel_id", &self.channel_id)
            .field("user_id", &self.invoking_user_id())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionCallbackData {
    pub content: String,
}

/// Body returned to Discord on the interaction webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InteractionCallbackData>,
}

impl InteractionResponse {
    pub fn pong() -> Self {
        Self {
            kind: InteractionResponseType::Pong as u8,
            data: None,
        }
    }

    pub fn deferred() -> Self {
        Self {
            kind: InteractionResponseType::DeferredChannelMessageWithSource as u8,
            data: None,
        }
    }

    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: InteractionResponseType::ChannelMessageWithSource as u8,
            data: Some(InteractionCallbackData {
                content: content.into(),
            }),
        }
    }
}

/// A slash command definition for the registration API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    pub description: String,
}

// Queue types

/// One deferred interaction waiting for the device's report
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub id: String,
    pub token: String,
}

impl InteractionRecord {
    pub fn new(id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for InteractionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionRecord")
            .field("id", &self.id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl From<&Interaction> for InteractionRecord {
    fn from(interaction: &Interaction) -> Self {
        Self::new(interaction.id.clone(), interaction.token.clone())
    }
}

// Runtime-independent HTTP types

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Other,
}

/// Runtime-independent view of an inbound request
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: HttpMethod,
    pub path: String,
    pub scheme: String,
    headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl InboundRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            scheme: "https".to_string(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Header names are case-insensitive; they are stored lowercased.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
