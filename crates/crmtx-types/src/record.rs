use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Flat property-name-to-value mapping, as the remote CRM stores it.
///
/// A `BTreeMap` keeps iteration deterministic, which keeps batch restore
/// payloads and test assertions stable.
pub type PropertyMap = BTreeMap<String, String>;

/// Opaque identifier assigned to a record by the remote service.
///
/// Ids are never parsed or generated locally; they are carried verbatim
/// between the create response and later update/archive calls.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// One remote object: its id, current properties, and archive state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub properties: PropertyMap,
    #[serde(default)]
    pub archived: bool,
}

impl Record {
    pub fn new(id: impl Into<RecordId>, properties: PropertyMap) -> Self {
        Self {
            id: id.into(),
            properties,
            archived: false,
        }
    }
}

/// Build a [`PropertyMap`] from string pairs.
pub fn properties<const N: usize>(pairs: [(&str, &str); N]) -> PropertyMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect()
}
