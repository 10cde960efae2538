use super::client::DiscordClient;
use crate::types::CommandDefinition;
use crate::utils::RelayResult;

pub const WAKE_COMMAND_NAME: &str = "wake";
pub const WAKE_COMMAND_DESCRIPTION: &str = "Wake a device on the network";

/// Discord's `CHAT_INPUT` command type
pub const CHAT_INPUT_COMMAND_TYPE: u8 = 1;

pub fn wake_command() -> CommandDefinition {
    CommandDefinition {
        name: WAKE_COMMAND_NAME.to_string(),
        kind: CHAT_INPUT_COMMAND_TYPE,
        description: WAKE_COMMAND_DESCRIPTION.to_string(),
    }
}

/// Every command the relay answers to
pub fn relay_commands() -> Vec<CommandDefinition> {
    vec![wake_command()]
}

/// Replaces the application's global commands with [`relay_commands`].
pub async fn register_relay_commands(client: &DiscordClient) -> RelayResult<String> {
    client.register_commands(&relay_commands()).await
}
