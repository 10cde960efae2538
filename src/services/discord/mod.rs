pub mod client;
pub mod commands;
pub mod signature;

pub use client::{DiscordClient, InteractionEditor};
pub use commands::{register_relay_commands, relay_commands, wake_command, WAKE_COMMAND_NAME};
pub use signature::{verify_signature, SignatureError};
