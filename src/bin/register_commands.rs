//! One-shot registration of the relay's slash commands.
//!
//! Reads `DISCORD_APPLICATION_ID`, `DISCORD_BOT_TOKEN` and optionally
//! `DISCORD_API_BASE` from the process environment.

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main(flavor = "current_thread")]
async fn main() {
    use secrecy::SecretString;
    use wake_relay::config::{
        DEFAULT_DISCORD_API_BASE, ENV_APPLICATION_ID, ENV_BOT_TOKEN, ENV_DISCORD_API_BASE,
    };
    use wake_relay::services::discord::{register_relay_commands, DiscordClient};

    let read = |name: &str| match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => {
            eprintln!("Missing {}", name);
            std::process::exit(2);
        }
    };

    let application_id = read(ENV_APPLICATION_ID);
    let bot_token = SecretString::new(read(ENV_BOT_TOKEN));
    let api_base =
        std::env::var(ENV_DISCORD_API_BASE).unwrap_or_else(|_| DEFAULT_DISCORD_API_BASE.to_string());

    let client = match DiscordClient::new(&api_base, &application_id, bot_token) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Invalid Discord client configuration: {}", e);
            std::process::exit(2);
        }
    };

    match register_relay_commands(&client).await {
        Ok(_) => println!("ok."),
        Err(e) => {
            eprintln!("Error registering commands");
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
