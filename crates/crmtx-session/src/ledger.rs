use std::collections::BTreeMap;

use crmtx_types::{PropertyMap, RecordId, ResourceType};

/// In-memory record of the compensations owed for one session.
///
/// Owned by exactly one [`TxnCoordinator`](crate::TxnCoordinator); never
/// persisted, never shared across sessions. Driving one ledger from
/// multiple tasks would break the first-write-wins capture rule, so there
/// is deliberately no interior locking here.
#[derive(Debug, Default)]
pub struct MutationLedger {
    buckets: BTreeMap<ResourceType, TypeBucket>,
}

#[derive(Debug, Default)]
struct TypeBucket {
    /// Created ids in creation order. Not deduplicated: compensation
    /// tolerates archiving an id twice.
    created: Vec<RecordId>,
    /// Before-images keyed by id, first write wins.
    updated: BTreeMap<RecordId, PropertyMap>,
}

impl MutationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful create for later archiving.
    pub fn record_create(&mut self, resource: ResourceType, id: RecordId) {
        self.buckets.entry(resource).or_default().created.push(id);
    }

    /// Record the before-image of a successful update.
    ///
    /// Only the first capture for a given id is kept: a later update in
    /// the same session must not overwrite the state the session found,
    /// or rollback would restore a mid-session value.
    pub fn record_update(&mut self, resource: ResourceType, id: RecordId, prior: PropertyMap) {
        self.buckets
            .entry(resource)
            .or_default()
            .updated
            .entry(id)
            .or_insert(prior);
    }

    /// Remove and return all recorded creates for one type.
    pub fn drain_creates(&mut self, resource: ResourceType) -> Vec<RecordId> {
        self.buckets
            .get_mut(&resource)
            .map(|bucket| std::mem::take(&mut bucket.created))
            .unwrap_or_default()
    }

    /// Remove and return all recorded before-images for one type.
    pub fn drain_updates(&mut self, resource: ResourceType) -> BTreeMap<RecordId, PropertyMap> {
        self.buckets
            .get_mut(&resource)
            .map(|bucket| std::mem::take(&mut bucket.updated))
            .unwrap_or_default()
    }

    /// True when no type has any pending compensation.
    pub fn is_empty(&self) -> bool {
        self.buckets
            .values()
            .all(|bucket| bucket.created.is_empty() && bucket.updated.is_empty())
    }

    /// Total number of pending compensation entries across all types.
    pub fn pending(&self) -> usize {
        self.buckets
            .values()
            .map(|bucket| bucket.created.len() + bucket.updated.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crmtx_types::record::properties;

    #[test]
    fn starts_empty() {
        let ledger = MutationLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.pending(), 0);
    }

    #[test]
    fn creates_keep_insertion_order_and_duplicates() {
        let mut ledger = MutationLedger::new();
        ledger.record_create(ResourceType::Company, RecordId::new("1"));
        ledger.record_create(ResourceType::Company, RecordId::new("2"));
        ledger.record_create(ResourceType::Company, RecordId::new("1"));
        assert_eq!(
            ledger.drain_creates(ResourceType::Company),
            vec![RecordId::new("1"), RecordId::new("2"), RecordId::new("1")]
        );
    }

    #[test]
    fn drain_clears_the_bucket() {
        let mut ledger = MutationLedger::new();
        ledger.record_create(ResourceType::Deal, RecordId::new("3"));
        ledger.record_update(ResourceType::Deal, RecordId::new("4"), PropertyMap::new());
        assert!(!ledger.is_empty());

        ledger.drain_creates(ResourceType::Deal);
        ledger.drain_updates(ResourceType::Deal);
        assert!(ledger.is_empty());
        assert!(ledger.drain_creates(ResourceType::Deal).is_empty());
    }

    #[test]
    fn first_before_image_wins() {
        let mut ledger = MutationLedger::new();
        ledger.record_update(
            ResourceType::Deal,
            RecordId::new("7"),
            properties([("stage", "open")]),
        );
        ledger.record_update(
            ResourceType::Deal,
            RecordId::new("7"),
            properties([("stage", "closed")]),
        );

        let updates = ledger.drain_updates(ResourceType::Deal);
        assert_eq!(
            updates.get(&RecordId::new("7")).unwrap(),
            &properties([("stage", "open")])
        );
    }

    #[test]
    fn buckets_are_independent_per_type() {
        let mut ledger = MutationLedger::new();
        ledger.record_create(ResourceType::Company, RecordId::new("1"));
        ledger.record_create(ResourceType::Contact, RecordId::new("2"));

        assert_eq!(ledger.drain_creates(ResourceType::Company).len(), 1);
        assert!(!ledger.is_empty());
        assert_eq!(ledger.drain_creates(ResourceType::Contact).len(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn pending_counts_both_kinds() {
        let mut ledger = MutationLedger::new();
        ledger.record_create(ResourceType::Company, RecordId::new("1"));
        ledger.record_update(ResourceType::Deal, RecordId::new("7"), PropertyMap::new());
        assert_eq!(ledger.pending(), 2);
    }
}
