use std::collections::BTreeMap;

use async_trait::async_trait;

use crmtx_types::{PropertyMap, Record, RecordId, ResourceType};

use crate::error::GatewayResult;

/// Per-id result of a batch archive or batch restore call.
///
/// A batch call that reaches the remote service returns `Ok` with one of
/// these even when some ids fail; `Err` is reserved for calls that failed
/// as a whole (transport, auth, rejected request).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub succeeded: Vec<RecordId>,
    pub failed: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// An outcome in which every id succeeded.
    pub fn success(ids: impl IntoIterator<Item = RecordId>) -> Self {
        Self {
            succeeded: ids.into_iter().collect(),
            failed: Vec::new(),
        }
    }

    pub fn is_total_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchFailure {
    pub id: RecordId,
    pub reason: String,
}

/// Operations the transaction core needs from one remote CRM.
///
/// Every operation takes the target [`ResourceType`] explicitly; one
/// gateway instance serves all collections. Retry and backoff are the
/// implementation's concern, never the caller's.
#[async_trait]
pub trait ResourceGateway: Send + Sync {
    /// Create one record; the remote service assigns the id.
    async fn create(
        &self,
        resource: ResourceType,
        properties: PropertyMap,
    ) -> GatewayResult<Record>;

    /// Fetch the full current property map of one record.
    async fn get_by_id(&self, resource: ResourceType, id: &RecordId) -> GatewayResult<Record>;

    /// Merge the given properties into one record.
    async fn update(
        &self,
        resource: ResourceType,
        id: &RecordId,
        properties: PropertyMap,
    ) -> GatewayResult<Record>;

    /// Archive many records in one call.
    async fn batch_archive(
        &self,
        resource: ResourceType,
        ids: &[RecordId],
    ) -> GatewayResult<BatchOutcome>;

    /// Restore many records' properties in one call.
    async fn batch_update(
        &self,
        resource: ResourceType,
        updates: &BTreeMap<RecordId, PropertyMap>,
    ) -> GatewayResult<BatchOutcome>;
}
