//! Foundation types for crmtx.
//!
//! This crate provides the resource and record types shared by every other
//! crmtx crate.
//!
//! # Key Types
//!
//! - [`ResourceType`] — The CRM collections a session can mutate
//! - [`OperationKind`] — Create vs. update, the two compensable mutations
//! - [`RecordId`] — Opaque identifier assigned by the remote service
//! - [`PropertyMap`] — Flat property-name-to-value mapping
//! - [`Record`] — One remote object: id plus its current properties

pub mod record;
pub mod resource;

pub use record::{PropertyMap, Record, RecordId};
pub use resource::{OperationKind, ResourceType};
