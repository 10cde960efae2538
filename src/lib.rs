use worker::*;

// Module declarations
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod services;
pub mod types;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

use config::RelayConfig;
use middleware::with_basic_auth;
use once_cell::sync::OnceCell;
use responses::RelayResponse;
use services::discord::{DiscordClient, InteractionEditor};
use services::queue::{D1QueueStore, QueueStore};
use std::sync::Arc;
use types::{HttpMethod, InboundRequest};

static RELAY_CONFIG: OnceCell<Arc<RelayConfig>> = OnceCell::new();

/// Reads the configuration on the first request of an isolate and reuses it.
fn get_relay_config(env: &Env) -> utils::RelayResult<Arc<RelayConfig>> {
    if let Some(config) = RELAY_CONFIG.get() {
        return Ok(config.clone());
    }

    let config = Arc::new(RelayConfig::from_env(env)?);
    utils::init_logger(config.log_level);
    Ok(RELAY_CONFIG.get_or_init(|| config).clone())
}

/// Dispatches a request to the matching handler.
pub async fn route_request<S, E>(
    config: &RelayConfig,
    store: &S,
    editor: &E,
    req: InboundRequest,
) -> RelayResponse
where
    S: QueueStore + ?Sized,
    E: InteractionEditor + ?Sized,
{
    let path = req.path.clone();
    match (req.method, path.as_str()) {
        (HttpMethod::Post, "/discord") => {
            handlers::handle_interaction(config, store, &req).await
        }
        (HttpMethod::Get, "/poll") => {
            with_basic_auth(req, config, |_| handlers::handle_poll(store)).await
        }
        (HttpMethod::Post, "/report") => {
            with_basic_auth(req, config, |req| async move {
                let message = req.body_text();
                handlers::handle_report(store, editor, &message).await
            })
            .await
        }
        _ => RelayResponse::not_found(),
    }
}

async fn to_inbound_request(mut req: Request) -> Result<InboundRequest> {
    let method = match req.method() {
        Method::Get => HttpMethod::Get,
        Method::Post => HttpMethod::Post,
        _ => HttpMethod::Other,
    };
    let url = req.url()?;

    let mut inbound = InboundRequest::new(method, url.path()).with_scheme(url.scheme());
    for (name, value) in req.headers().entries() {
        inbound = inbound.with_header(&name, value);
    }
    Ok(inbound.with_body(req.bytes().await?))
}

#[event(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[event(fetch)]
pub async fn main(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let config = match get_relay_config(&env) {
        Ok(config) => config,
        Err(e) => {
            crate::log_error!(
                "Relay configuration failed",
                serde_json::json!({ "error": e.to_string() })
            );
            return RelayResponse::internal_error().into_worker_response();
        }
    };

    let inbound = to_inbound_request(req).await?;
    crate::log_debug!(
        "Inbound request",
        serde_json::json!({ "method": format!("{:?}", inbound.method), "path": inbound.path })
    );

    let store = match D1QueueStore::from_env(&env) {
        Ok(store) => store,
        Err(e) => {
            crate::log_error!(
                "Queue store unavailable",
                serde_json::json!({ "error": e.to_string() })
            );
            return RelayResponse::internal_error().into_worker_response();
        }
    };
    let editor = DiscordClient::from_config(&config)?;

    route_request(&config, &store, &editor, inbound)
        .await
        .into_worker_response()
}
