use thiserror::Error;

use crmtx_types::{RecordId, ResourceType};

/// Errors produced by gateway operations.
///
/// Payloads are plain data so the error stays `Clone`; rollback reports
/// embed the error for compensations that could not be issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{resource} record {id} not found")]
    NotFound { resource: ResourceType, id: RecordId },

    #[error("remote call rejected with status {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("credentials rejected by the remote service")]
    Unauthorized,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("missing credential: {0}")]
    MissingCredential(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;
