//! Transaction core for crmtx.
//!
//! A [`TxnCoordinator`] is one logical unit of work against a remote CRM:
//! it performs create/update calls through a
//! [`ResourceGateway`](crmtx_gateway::ResourceGateway), records a
//! compensating fact for each successful mutation in its
//! [`MutationLedger`], and on [`TxnCoordinator::rollback`] replays the
//! ledger as batch archive/restore calls, resource type by resource type.
//!
//! Compensation is best-effort: one type's failure never blocks the
//! others, and the caller inspects the returned [`RollbackReport`] to
//! learn what could not be undone.

pub mod coordinator;
pub mod error;
pub mod ledger;
pub mod report;

pub use coordinator::TxnCoordinator;
pub use error::{SessionError, SessionResult};
pub use ledger::MutationLedger;
pub use report::{CompensationEntry, CompensationOutcome, RollbackReport};
