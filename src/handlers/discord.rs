use crate::config::RelayConfig;
use crate::responses::RelayResponse;
use crate::services::discord::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::services::discord::{verify_signature, WAKE_COMMAND_NAME};
use crate::services::queue::{EnqueueOutcome, QueueStore};
use crate::types::{InboundRequest, Interaction, InteractionRecord, InteractionResponse, InteractionType};
use serde_json::json;

pub const WRONG_CHANNEL_MESSAGE: &str = "You can't use this command in this channel.";
pub const WRONG_USER_MESSAGE: &str = "You can't use this command.";

/// `POST /discord`: Discord interaction webhook
pub async fn handle_interaction<S>(
    config: &RelayConfig,
    store: &S,
    req: &InboundRequest,
) -> RelayResponse
where
    S: QueueStore + ?Sized,
{
    if let Err(err) = verify_signature(
        &config.public_key,
        req.header(SIGNATURE_HEADER),
        req.header(TIMESTAMP_HEADER),
        &req.body,
    ) {
        crate::log_warn!(
            "Rejected interaction webhook",
            json!({ "reason": err.to_string() })
        );
        return RelayResponse::text(401, "Bad Request Signature");
    }

    let interaction: Interaction = match serde_json::from_slice(&req.body) {
        Ok(interaction) => interaction,
        Err(e) => {
            crate::log_warn!(
                "Signed body is not an interaction",
                json!({ "error": e.to_string() })
            );
            return RelayResponse::json(400, &json!({ "error": "Malformed Interaction" }));
        }
    };

    match interaction.interaction_type() {
        InteractionType::Ping => RelayResponse::json(200, &InteractionResponse::pong()),
        InteractionType::ApplicationCommand
            if interaction
                .command_name()
                .map(|name| name.eq_ignore_ascii_case(WAKE_COMMAND_NAME))
                .unwrap_or(false) =>
        {
            handle_wake(config, store, &interaction).await
        }
        _ => {
            crate::log_info!(
                "Unhandled interaction",
                json!({
                    "type": interaction.kind,
                    "command": interaction.command_name(),
                    "custom_id": interaction.data.as_ref().and_then(|d| d.custom_id.as_deref()),
                })
            );
            RelayResponse::json(400, &json!({ "error": "Unknown Type" }))
        }
    }
}

async fn handle_wake<S>(
    config: &RelayConfig,
    store: &S,
    interaction: &Interaction,
) -> RelayResponse
where
    S: QueueStore + ?Sized,
{
    if interaction.channel_id.as_deref() != Some(config.allowed_channel_id.as_str()) {
        crate::log_info!(
            "Wake denied: channel not allowed",
            json!({ "interaction_id": interaction.id, "channel_id": interaction.channel_id })
        );
        return RelayResponse::json(200, &InteractionResponse::message(WRONG_CHANNEL_MESSAGE));
    }

    if interaction.invoking_user_id() != Some(config.allowed_user_id.as_str()) {
        crate::log_info!(
            "Wake denied: user not allowed",
            json!({ "interaction_id": interaction.id, "user_id": interaction.invoking_user_id() })
        );
        return RelayResponse::json(200, &InteractionResponse::message(WRONG_USER_MESSAGE));
    }

    match store.enqueue(&InteractionRecord::from(interaction)).await {
        Ok(outcome) => {
            crate::log_info!(
                "Wake request queued",
                json!({
                    "interaction_id": interaction.id,
                    "duplicate": outcome == EnqueueOutcome::Duplicate,
                })
            );
            RelayResponse::json(200, &InteractionResponse::deferred())
        }
        Err(e) => {
            crate::log_error!(
                "Failed to queue wake request",
                json!({ "interaction_id": interaction.id, "error": e.to_string() })
            );
            RelayResponse::internal_error()
        }
    }
}
