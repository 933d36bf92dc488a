//! Request/response shapes of the CRM v3 object API.
//!
//! Single-object responses deserialize straight into [`Record`]; the types
//! here cover the request bodies and the multi-status batch response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crmtx_types::{PropertyMap, Record, RecordId};

use crate::traits::{BatchFailure, BatchOutcome};

/// Body of single-object create and update calls.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectInput {
    pub properties: PropertyMap,
}

/// A bare id reference, as batch archive inputs expect.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: RecordId,
}

/// Body of a batch archive call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchArchiveRequest {
    pub inputs: Vec<ObjectRef>,
}

impl BatchArchiveRequest {
    pub fn new(ids: &[RecordId]) -> Self {
        Self {
            inputs: ids.iter().cloned().map(|id| ObjectRef { id }).collect(),
        }
    }
}

/// One id-plus-properties entry of a batch update call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchUpdateEntry {
    pub id: RecordId,
    pub properties: PropertyMap,
}

/// Body of a batch update call.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchUpdateRequest {
    pub inputs: Vec<BatchUpdateEntry>,
}

impl BatchUpdateRequest {
    pub fn new(updates: &BTreeMap<RecordId, PropertyMap>) -> Self {
        Self {
            inputs: updates
                .iter()
                .map(|(id, properties)| BatchUpdateEntry {
                    id: id.clone(),
                    properties: properties.clone(),
                })
                .collect(),
        }
    }
}

/// Response of a batch call, including the multi-status case.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Record>,
    #[serde(default)]
    pub errors: Vec<BatchResponseError>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchResponseError {
    pub message: String,
    #[serde(default)]
    pub context: ErrorContext,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    #[serde(default)]
    pub ids: Vec<RecordId>,
}

impl BatchResponse {
    /// Collapse the response into per-id succeeded/failed lists.
    pub fn outcome(&self) -> BatchOutcome {
        let succeeded = self.results.iter().map(|r| r.id.clone()).collect();
        let failed = self
            .errors
            .iter()
            .flat_map(|error| {
                error.context.ids.iter().cloned().map(|id| BatchFailure {
                    id,
                    reason: error.message.clone(),
                })
            })
            .collect();
        BatchOutcome { succeeded, failed }
    }
}
