use std::fmt;

use serde::{Deserialize, Serialize};

/// The resource collections a session can mutate.
///
/// Every collection shares the same operation shape (single create/read/
/// update plus batch archive/restore), so code that dispatches on a
/// `ResourceType` should iterate [`ResourceType::ALL`] rather than match on
/// individual variants. Adding a collection means touching this type only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Company,
    Contact,
    Deal,
}

impl ResourceType {
    /// All resource types, in the declared order.
    ///
    /// Rollback walks this array, so the compensation order is stable
    /// across runs.
    pub const ALL: [ResourceType; 3] = [Self::Company, Self::Contact, Self::Deal];

    /// The REST collection path segment for this resource type.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Company => "companies",
            Self::Contact => "contacts",
            Self::Deal => "deals",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

/// The two mutation kinds a ledger can owe compensation for.
///
/// A `Create` is compensated by archiving the created record; an `Update`
/// by restoring the properties captured before the update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Update,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => f.write_str("create"),
            Self::Update => f.write_str("update"),
        }
    }
}
