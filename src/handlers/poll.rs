use crate::responses::RelayResponse;
use crate::services::queue::QueueStore;
use serde_json::json;

pub const POLL_WAKE: &str = "wake";
pub const POLL_NOOP: &str = "noop";

/// `GET /poll`: tells the device whether anything is waiting.
/// Must sit behind the Basic-Auth guard.
pub async fn handle_poll<S>(store: &S) -> RelayResponse
where
    S: QueueStore + ?Sized,
{
    match store.peek_any().await {
        Ok(true) => RelayResponse::ok_text(POLL_WAKE),
        Ok(false) => RelayResponse::ok_text(POLL_NOOP),
        Err(e) => {
            crate::log_error!("poll: queue query failed", json!({ "error": e.to_string() }));
            RelayResponse::internal_error()
        }
    }
}
