// src/services/mod.rs

pub mod discord;
pub mod queue;

pub use discord::{DiscordClient, InteractionEditor};
pub use queue::{D1QueueStore, InMemoryQueueStore, QueueStore, QueueTransaction};
