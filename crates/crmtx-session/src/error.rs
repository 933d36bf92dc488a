use thiserror::Error;

use crmtx_gateway::GatewayError;
use crmtx_types::{RecordId, ResourceType};

/// Errors surfaced by the mutation path of a session.
///
/// Each variant names the operation that failed, the resource type it
/// addressed, and the gateway failure as its source. Compensation
/// failures are not represented here; they live in the
/// [`RollbackReport`](crate::RollbackReport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The gateway's create call failed; nothing was recorded.
    #[error("create failed for {resource}")]
    RemoteCreate {
        resource: ResourceType,
        #[source]
        source: GatewayError,
    },

    /// The before-image fetch failed; the update was never attempted.
    #[error("before-image fetch failed for {resource} record {id}")]
    RemoteRead {
        resource: ResourceType,
        id: RecordId,
        #[source]
        source: GatewayError,
    },

    /// The gateway's update call failed; no ledger entry was kept.
    #[error("update failed for {resource} record {id}")]
    RemoteUpdate {
        resource: ResourceType,
        id: RecordId,
        #[source]
        source: GatewayError,
    },

    /// The session was already rolled back; no further mutations are
    /// accepted.
    #[error("session already rolled back")]
    SessionClosed,
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn source_chains_to_gateway_error() {
        let err = SessionError::RemoteRead {
            resource: ResourceType::Deal,
            id: RecordId::new("7"),
            source: GatewayError::Unauthorized,
        };
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "credentials rejected by the remote service"
        );
    }

    #[test]
    fn display_names_resource_and_id() {
        let err = SessionError::RemoteUpdate {
            resource: ResourceType::Contact,
            id: RecordId::new("5"),
            source: GatewayError::Transport("reset".into()),
        };
        assert_eq!(err.to_string(), "update failed for contacts record 5");
    }
}
