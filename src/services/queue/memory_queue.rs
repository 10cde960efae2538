use super::{EnqueueOutcome, QueueOperation, QueueStore, QueueTransaction};
use crate::types::InteractionRecord;
use crate::utils::{RelayError, RelayResult};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;

/// Operations that can be made to fail on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulatedFailure {
    Enqueue,
    Peek,
    Commit,
}

/// Process-local queue. Records do not survive an isolate restart.
#[derive(Debug, Default)]
pub struct InMemoryQueueStore {
    records: Mutex<Vec<InteractionRecord>>,
    failures: Mutex<HashSet<SimulatedFailure>>,
    commit_count: Mutex<u32>,
}

impl InMemoryQueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<InteractionRecord>) -> Self {
        let store = Self::new();
        *store.records.lock() = records;
        store
    }

    pub fn simulate_failure(&self, failure: SimulatedFailure) {
        self.failures.lock().insert(failure);
    }

    pub fn reset_failures(&self) {
        self.failures.lock().clear();
    }

    pub fn snapshot(&self) -> Vec<InteractionRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn commit_count(&self) -> u32 {
        *self.commit_count.lock()
    }

    fn check(&self, failure: SimulatedFailure) -> RelayResult<()> {
        if self.failures.lock().contains(&failure) {
            return Err(RelayError::database_error(format!(
                "Simulated {:?} failure",
                failure
            )));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl QueueStore for InMemoryQueueStore {
    async fn enqueue(&self, record: &InteractionRecord) -> RelayResult<EnqueueOutcome> {
        self.check(SimulatedFailure::Enqueue)?;
        let mut records = self.records.lock();
        if records.iter().any(|r| r.id == record.id) {
            return Ok(EnqueueOutcome::Duplicate);
        }
        records.push(record.clone());
        Ok(EnqueueOutcome::Inserted)
    }

    async fn peek_any(&self) -> RelayResult<bool> {
        self.check(SimulatedFailure::Peek)?;
        Ok(!self.records.lock().is_empty())
    }

    async fn commit(&self, transaction: QueueTransaction) -> RelayResult<Vec<InteractionRecord>> {
        self.check(SimulatedFailure::Commit)?;

        // One lock for the whole batch keeps read+delete indivisible.
        let mut records = self.records.lock();
        let mut observed = Vec::new();
        for operation in transaction.operations() {
            match operation {
                QueueOperation::ReadAll => observed.extend(records.iter().cloned()),
                QueueOperation::DeleteAll => records.clear(),
            }
        }
        *self.commit_count.lock() += 1;
        Ok(observed)
    }
}
