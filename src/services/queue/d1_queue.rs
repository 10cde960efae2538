use super::{EnqueueOutcome, QueueOperation, QueueStore, QueueTransaction};
use crate::types::InteractionRecord;
use crate::utils::{RelayError, RelayResult};
use async_trait::async_trait;
use serde::Deserialize;
use worker::{D1Database, D1PreparedStatement, D1Result, Env};

/// Binding name of the queue database in wrangler.toml
pub const QUEUE_DB_BINDING: &str = "DB";

const INSERT_INTERACTION: &str =
    "INSERT OR IGNORE INTO interactions (id, token) VALUES (?, ?) RETURNING id";
const SELECT_ANY_INTERACTION: &str = "SELECT id FROM interactions LIMIT 1";
const SELECT_ALL_INTERACTIONS: &str =
    "SELECT id, token FROM interactions ORDER BY created_at ASC, id ASC";
const DELETE_ALL_INTERACTIONS: &str = "DELETE FROM interactions";

#[derive(Debug, Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: String,
}

/// Queue backed by the `interactions` table in Cloudflare D1
pub struct D1QueueStore {
    db: D1Database,
}

impl D1QueueStore {
    pub fn new(db: D1Database) -> Self {
        Self { db }
    }

    pub fn from_env(env: &Env) -> RelayResult<Self> {
        let db = env.d1(QUEUE_DB_BINDING).map_err(|e| {
            RelayError::config_error(format!("Missing D1 binding {}: {}", QUEUE_DB_BINDING, e))
        })?;
        Ok(Self::new(db))
    }

    fn statement_for(&self, operation: QueueOperation) -> D1PreparedStatement {
        match operation {
            QueueOperation::ReadAll => self.db.prepare(SELECT_ALL_INTERACTIONS),
            QueueOperation::DeleteAll => self.db.prepare(DELETE_ALL_INTERACTIONS),
        }
    }
}

fn ensure_success(result: &D1Result) -> RelayResult<()> {
    if result.success() {
        return Ok(());
    }
    Err(RelayError::database_error(format!(
        "D1 statement failed: {}",
        result.error().unwrap_or_else(|| "unknown error".to_string())
    )))
}

#[async_trait(?Send)]
impl QueueStore for D1QueueStore {
    async fn enqueue(&self, record: &InteractionRecord) -> RelayResult<EnqueueOutcome> {
        let result = self
            .db
            .prepare(INSERT_INTERACTION)
            .bind(&[record.id.as_str().into(), record.token.as_str().into()])
            .map_err(|e| {
                RelayError::database_error(format!("Failed to bind parameters: {}", e))
            })?
            .all()
            .await
            .map_err(|e| RelayError::database_error(format!("Failed to execute query: {}", e)))?;
        ensure_success(&result)?;

        let inserted = result.results::<IdRow>().map_err(|e| {
            RelayError::database_error(format!("Failed to parse results: {}", e))
        })?;
        if inserted.is_empty() {
            Ok(EnqueueOutcome::Duplicate)
        } else {
            Ok(EnqueueOutcome::Inserted)
        }
    }

    async fn peek_any(&self) -> RelayResult<bool> {
        let row = self
            .db
            .prepare(SELECT_ANY_INTERACTION)
            .first::<IdRow>(None)
            .await
            .map_err(|e| RelayError::database_error(format!("Failed to execute query: {}", e)))?;
        Ok(row.is_some())
    }

    async fn commit(&self, transaction: QueueTransaction) -> RelayResult<Vec<InteractionRecord>> {
        if transaction.is_empty() {
            return Ok(Vec::new());
        }

        let statements = transaction
            .operations()
            .iter()
            .map(|op| self.statement_for(*op))
            .collect::<Vec<_>>();

        // D1 runs a batch as a single implicit transaction: all statements
        // commit together or the whole batch rolls back.
        let results = self
            .db
            .batch(statements)
            .await
            .map_err(|e| RelayError::database_error(format!("Failed to execute batch: {}", e)))?;

        if results.len() != transaction.operations().len() {
            return Err(RelayError::database_error(format!(
                "D1 batch returned {} results for {} statements",
                results.len(),
                transaction.operations().len()
            )));
        }

        let mut observed = Vec::new();
        for (operation, result) in transaction.operations().iter().zip(results.iter()) {
            ensure_success(result)?;
            if *operation == QueueOperation::ReadAll {
                let rows = result.results::<InteractionRecord>().map_err(|e| {
                    RelayError::database_error(format!("Failed to parse results: {}", e))
                })?;
                observed.extend(rows);
            }
        }
        Ok(observed)
    }
}
