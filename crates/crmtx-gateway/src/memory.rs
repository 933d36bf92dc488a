use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use crmtx_types::{PropertyMap, Record, RecordId, ResourceType};

use crate::error::{GatewayError, GatewayResult};
use crate::traits::{BatchFailure, BatchOutcome, ResourceGateway};

/// In-memory CRM implementation for tests, local demos, and embedding.
///
/// Ids are assigned sequentially across all collections. Archived records
/// stay in the store but are invisible to reads and updates; archiving an
/// already-archived id is still a per-id success, the way the remote
/// service treats it.
pub struct InMemoryGateway {
    inner: RwLock<GatewayState>,
}

#[derive(Default)]
struct GatewayState {
    collections: HashMap<ResourceType, BTreeMap<RecordId, StoredRecord>>,
    next_id: u64,
}

#[derive(Clone, Default)]
struct StoredRecord {
    properties: PropertyMap,
    archived: bool,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(GatewayState::default()),
        }
    }

    /// Insert a record under a caller-chosen id, replacing any existing
    /// one. Intended for seeding test fixtures.
    pub fn seed(&self, resource: ResourceType, id: impl Into<RecordId>, properties: PropertyMap) {
        if let Ok(mut state) = self.inner.write() {
            state.collections.entry(resource).or_default().insert(
                id.into(),
                StoredRecord {
                    properties,
                    archived: false,
                },
            );
        }
    }

    /// Whether the given id exists and is archived.
    pub fn is_archived(&self, resource: ResourceType, id: &RecordId) -> bool {
        self.inner
            .read()
            .ok()
            .and_then(|state| {
                state
                    .collections
                    .get(&resource)
                    .and_then(|records| records.get(id))
                    .map(|record| record.archived)
            })
            .unwrap_or(false)
    }

    fn read_state(&self) -> GatewayResult<std::sync::RwLockReadGuard<'_, GatewayState>> {
        self.inner
            .read()
            .map_err(|_| GatewayError::Transport("gateway read lock poisoned".into()))
    }

    fn write_state(&self) -> GatewayResult<std::sync::RwLockWriteGuard<'_, GatewayState>> {
        self.inner
            .write()
            .map_err(|_| GatewayError::Transport("gateway write lock poisoned".into()))
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceGateway for InMemoryGateway {
    async fn create(
        &self,
        resource: ResourceType,
        properties: PropertyMap,
    ) -> GatewayResult<Record> {
        let mut state = self.write_state()?;
        state.next_id += 1;
        let id = RecordId::new(state.next_id.to_string());
        state.collections.entry(resource).or_default().insert(
            id.clone(),
            StoredRecord {
                properties: properties.clone(),
                archived: false,
            },
        );
        Ok(Record::new(id, properties))
    }

    async fn get_by_id(&self, resource: ResourceType, id: &RecordId) -> GatewayResult<Record> {
        let state = self.read_state()?;
        let record = state
            .collections
            .get(&resource)
            .and_then(|records| records.get(id))
            .filter(|record| !record.archived)
            .ok_or_else(|| GatewayError::NotFound {
                resource,
                id: id.clone(),
            })?;
        Ok(Record::new(id.clone(), record.properties.clone()))
    }

    async fn update(
        &self,
        resource: ResourceType,
        id: &RecordId,
        properties: PropertyMap,
    ) -> GatewayResult<Record> {
        let mut state = self.write_state()?;
        let record = state
            .collections
            .get_mut(&resource)
            .and_then(|records| records.get_mut(id))
            .filter(|record| !record.archived)
            .ok_or_else(|| GatewayError::NotFound {
                resource,
                id: id.clone(),
            })?;
        record.properties.extend(properties);
        Ok(Record::new(id.clone(), record.properties.clone()))
    }

    async fn batch_archive(
        &self,
        resource: ResourceType,
        ids: &[RecordId],
    ) -> GatewayResult<BatchOutcome> {
        let mut state = self.write_state()?;
        let records = state.collections.entry(resource).or_default();
        let mut outcome = BatchOutcome::default();
        for id in ids {
            match records.get_mut(id) {
                Some(record) => {
                    record.archived = true;
                    outcome.succeeded.push(id.clone());
                }
                None => outcome.failed.push(BatchFailure {
                    id: id.clone(),
                    reason: "unknown id".into(),
                }),
            }
        }
        Ok(outcome)
    }

    async fn batch_update(
        &self,
        resource: ResourceType,
        updates: &BTreeMap<RecordId, PropertyMap>,
    ) -> GatewayResult<BatchOutcome> {
        let mut state = self.write_state()?;
        let records = state.collections.entry(resource).or_default();
        let mut outcome = BatchOutcome::default();
        for (id, properties) in updates {
            match records.get_mut(id).filter(|record| !record.archived) {
                Some(record) => {
                    record.properties.extend(properties.clone());
                    outcome.succeeded.push(id.clone());
                }
                None => outcome.failed.push(BatchFailure {
                    id: id.clone(),
                    reason: "unknown or archived id".into(),
                }),
            }
        }
        Ok(outcome)
    }
}
