use tracing::{debug, error, info};

use crmtx_gateway::ResourceGateway;
use crmtx_types::{OperationKind, PropertyMap, Record, RecordId, ResourceType};

use crate::error::{SessionError, SessionResult};
use crate::ledger::MutationLedger;
use crate::report::{CompensationOutcome, RollbackReport};

/// One logical unit of work against the remote CRM.
///
/// Every successful mutation deposits a compensating fact in the owned
/// [`MutationLedger`]; [`rollback`](Self::rollback) replays those facts as
/// batch archive/restore calls. Dropping the coordinator without rolling
/// back commits the work.
///
/// A coordinator is driven by one caller at a time; independent sessions
/// get independent coordinators.
pub struct TxnCoordinator<G> {
    gateway: G,
    ledger: MutationLedger,
    rolled_back: bool,
}

impl<G: ResourceGateway> TxnCoordinator<G> {
    /// Begin a session over the given gateway.
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            ledger: MutationLedger::new(),
            rolled_back: false,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn ledger(&self) -> &MutationLedger {
        &self.ledger
    }

    /// False once [`rollback`](Self::rollback) has run.
    pub fn is_active(&self) -> bool {
        !self.rolled_back
    }

    fn ensure_active(&self) -> SessionResult<()> {
        if self.rolled_back {
            return Err(SessionError::SessionClosed);
        }
        Ok(())
    }

    /// Create one record and note its id for compensation.
    ///
    /// A failed create leaves the ledger untouched: nothing happened
    /// remotely, so there is nothing to undo.
    pub async fn create(
        &mut self,
        resource: ResourceType,
        properties: PropertyMap,
    ) -> SessionResult<Record> {
        self.ensure_active()?;
        let record = self
            .gateway
            .create(resource, properties)
            .await
            .map_err(|source| {
                error!(%resource, error = %source, "remote create failed");
                SessionError::RemoteCreate { resource, source }
            })?;
        self.ledger.record_create(resource, record.id.clone());
        Ok(record)
    }

    /// Update one record, capturing its before-image first.
    ///
    /// The read targets the same resource type as the update; without the
    /// before-image rollback is impossible, so a failed read aborts the
    /// whole operation. The ledger is written only after the update call
    /// succeeds — a failed update owes no compensation.
    pub async fn update(
        &mut self,
        resource: ResourceType,
        id: RecordId,
        properties: PropertyMap,
    ) -> SessionResult<Record> {
        self.ensure_active()?;
        let before = self
            .gateway
            .get_by_id(resource, &id)
            .await
            .map_err(|source| {
                error!(%resource, %id, error = %source, "before-image fetch failed");
                SessionError::RemoteRead {
                    resource,
                    id: id.clone(),
                    source,
                }
            })?;
        let record = self
            .gateway
            .update(resource, &id, properties)
            .await
            .map_err(|source| {
                error!(%resource, %id, error = %source, "remote update failed");
                SessionError::RemoteUpdate {
                    resource,
                    id: id.clone(),
                    source,
                }
            })?;
        self.ledger.record_update(resource, id, before.properties);
        Ok(record)
    }

    /// Undo every recorded mutation, one batch call per (type, operation).
    ///
    /// Resource types are compensated in [`ResourceType::ALL`] order, each
    /// independently: one type's failure is recorded in the report and the
    /// walk continues. Terminal — the ledger is empty afterwards whatever
    /// the outcomes, and a second call performs no gateway calls.
    pub async fn rollback(&mut self) -> RollbackReport {
        let mut report = RollbackReport::default();
        if self.rolled_back || self.ledger.is_empty() {
            self.rolled_back = true;
            return report;
        }
        info!(pending = self.ledger.pending(), "rolling back session");

        for resource in ResourceType::ALL {
            let created = self.ledger.drain_creates(resource);
            if !created.is_empty() {
                debug!(%resource, count = created.len(), "archiving created records");
                let outcome = match self.gateway.batch_archive(resource, &created).await {
                    Ok(batch) => CompensationOutcome::from_batch(batch),
                    Err(error) => {
                        error!(%resource, %error, "batch archive failed");
                        CompensationOutcome::Failed {
                            attempted: created,
                            error,
                        }
                    }
                };
                report.push(resource, OperationKind::Create, outcome);
            }

            let updates = self.ledger.drain_updates(resource);
            if !updates.is_empty() {
                debug!(%resource, count = updates.len(), "restoring updated records");
                let outcome = match self.gateway.batch_update(resource, &updates).await {
                    Ok(batch) => CompensationOutcome::from_batch(batch),
                    Err(error) => {
                        error!(%resource, %error, "batch restore failed");
                        CompensationOutcome::Failed {
                            attempted: updates.into_keys().collect(),
                            error,
                        }
                    }
                };
                report.push(resource, OperationKind::Update, outcome);
            }
        }

        self.rolled_back = true;
        report
    }
}
