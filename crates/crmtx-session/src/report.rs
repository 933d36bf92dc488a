use crmtx_gateway::{BatchFailure, BatchOutcome, GatewayError};
use crmtx_types::{OperationKind, RecordId, ResourceType};

/// What a rollback attempted and how each batch call fared.
///
/// The report is the only record of what could not be undone: drained
/// ledger entries are never re-queued.
#[derive(Clone, Debug, Default)]
pub struct RollbackReport {
    pub entries: Vec<CompensationEntry>,
}

impl RollbackReport {
    /// True when nothing needed compensating.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when every attempted compensation fully succeeded.
    pub fn is_clean(&self) -> bool {
        self.entries.iter().all(|entry| entry.outcome.is_success())
    }

    /// Entries whose compensation failed in part or in full.
    pub fn failures(&self) -> impl Iterator<Item = &CompensationEntry> {
        self.entries
            .iter()
            .filter(|entry| !entry.outcome.is_success())
    }

    /// The entry for one (type, operation) pair, if that pair was
    /// attempted.
    pub fn entry(
        &self,
        resource: ResourceType,
        operation: OperationKind,
    ) -> Option<&CompensationEntry> {
        self.entries
            .iter()
            .find(|entry| entry.resource == resource && entry.operation == operation)
    }

    pub(crate) fn push(
        &mut self,
        resource: ResourceType,
        operation: OperationKind,
        outcome: CompensationOutcome,
    ) {
        self.entries.push(CompensationEntry {
            resource,
            operation,
            outcome,
        });
    }
}

/// One batch compensation call: which ledger bucket it drained and how it
/// went.
#[derive(Clone, Debug)]
pub struct CompensationEntry {
    pub resource: ResourceType,
    pub operation: OperationKind,
    pub outcome: CompensationOutcome,
}

/// Result of one batch archive/restore call.
#[derive(Clone, Debug)]
pub enum CompensationOutcome {
    /// Every id in the batch was compensated.
    Success { compensated: usize },
    /// The batch reached the remote service but some ids failed.
    Partial {
        succeeded: Vec<RecordId>,
        failed: Vec<BatchFailure>,
    },
    /// The batch call itself failed; none of the ids were compensated.
    Failed {
        attempted: Vec<RecordId>,
        error: GatewayError,
    },
}

impl CompensationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub(crate) fn from_batch(outcome: BatchOutcome) -> Self {
        if outcome.is_total_success() {
            Self::Success {
                compensated: outcome.succeeded.len(),
            }
        } else {
            Self::Partial {
                succeeded: outcome.succeeded,
                failed: outcome.failed,
            }
        }
    }
}
