//! Queue of deferred interactions awaiting the device's report.
//!
//! Reads that must be paired with deletes go through [`QueueTransaction`]:
//! operations are staged in order and [`QueueStore::commit`] applies all of
//! them as one atomic unit, or none of them.

pub mod d1_queue;
pub mod memory_queue;

pub use d1_queue::D1QueueStore;
pub use memory_queue::{InMemoryQueueStore, SimulatedFailure};

use crate::types::InteractionRecord;
use crate::utils::RelayResult;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOperation {
    ReadAll,
    DeleteAll,
}

/// Ordered list of staged queue operations
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueueTransaction {
    operations: Vec<QueueOperation>,
}

impl QueueTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_all(&mut self) -> &mut Self {
        self.operations.push(QueueOperation::ReadAll);
        self
    }

    pub fn delete_all(&mut self) -> &mut Self {
        self.operations.push(QueueOperation::DeleteAll);
        self
    }

    pub fn operations(&self) -> &[QueueOperation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Inserted,
    /// A record with the same interaction id was already queued.
    Duplicate,
}

#[async_trait(?Send)]
pub trait QueueStore {
    /// Queues a record unless its interaction id is already present.
    async fn enqueue(&self, record: &InteractionRecord) -> RelayResult<EnqueueOutcome>;

    /// True when at least one record is queued. Never consumes anything.
    async fn peek_any(&self) -> RelayResult<bool>;

    fn begin_transaction(&self) -> QueueTransaction {
        QueueTransaction::new()
    }

    /// Applies every staged operation atomically and returns the records
    /// observed by the `ReadAll` operations, in staging order.
    async fn commit(&self, transaction: QueueTransaction) -> RelayResult<Vec<InteractionRecord>>;

    /// Reads and deletes every queued record in one atomic step.
    async fn drain_all(&self) -> RelayResult<Vec<InteractionRecord>> {
        let mut transaction = self.begin_transaction();
        transaction.read_all().delete_all();
        self.commit(transaction).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_keeps_staging_order() {
        let mut tx = QueueTransaction::new();
        assert!(tx.is_empty());
        tx.read_all().delete_all();
        assert_eq!(
            tx.operations(),
            &[QueueOperation::ReadAll, QueueOperation::DeleteAll]
        );
    }
}
