use crate::responses::RelayResponse;
use crate::services::discord::InteractionEditor;
use crate::services::queue::QueueStore;
use futures::future::join_all;
use serde_json::{json, Value};

pub fn report_summary(responded: usize) -> String {
    format!("ok (responded to {} interactions)", responded)
}

/// `POST /report`: drains the queue and edits every drained interaction
/// with `message`. Must sit behind the Basic-Auth guard.
pub async fn handle_report<S, E>(store: &S, editor: &E, message: &str) -> RelayResponse
where
    S: QueueStore + ?Sized,
    E: InteractionEditor + ?Sized,
{
    let records = match store.drain_all().await {
        Ok(records) => records,
        Err(e) => {
            crate::log_error!("report: drain failed", json!({ "error": e.to_string() }));
            return RelayResponse::internal_error();
        }
    };

    let edits = records
        .iter()
        .map(|record| editor.edit_original_response(&record.token, message));
    let results = join_all(edits).await;

    let mut failed = 0usize;
    let outcomes = records
        .iter()
        .zip(results)
        .map(|(record, result)| match result {
            Ok(body) => json!({ "interaction_id": record.id, "ok": true, "response": body }),
            Err(e) => {
                failed += 1;
                json!({ "interaction_id": record.id, "ok": false, "error": e.to_string() })
            }
        })
        .collect::<Vec<Value>>();

    let meta = json!({ "drained": records.len(), "failed": failed, "outcomes": outcomes });
    if failed > 0 {
        crate::log_warn!("report: some interaction edits failed", meta);
    } else {
        crate::log_info!("report: interactions edited", meta);
    }

    RelayResponse::ok_text(report_summary(records.len()))
}
