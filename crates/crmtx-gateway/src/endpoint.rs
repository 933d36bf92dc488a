use crmtx_types::{RecordId, ResourceType};

/// Root of the object API.
pub const OBJECTS_ROOT: &str = "/crm/v3/objects";

/// Collection path, e.g. `/crm/v3/objects/companies`.
pub fn collection(resource: ResourceType) -> String {
    format!("{OBJECTS_ROOT}/{}", resource.collection())
}

/// Single-object path, e.g. `/crm/v3/objects/deals/7`.
pub fn object(resource: ResourceType, id: &RecordId) -> String {
    format!("{OBJECTS_ROOT}/{}/{id}", resource.collection())
}

/// Batch archive path for one collection.
pub fn batch_archive(resource: ResourceType) -> String {
    format!("{OBJECTS_ROOT}/{}/batch/archive", resource.collection())
}

/// Batch update path for one collection.
pub fn batch_update(resource: ResourceType) -> String {
    format!("{OBJECTS_ROOT}/{}/batch/update", resource.collection())
}
