//! Resource gateway boundary for crmtx.
//!
//! A [`ResourceGateway`] performs single-object and batch calls against one
//! remote CRM, uniformly across resource collections. This crate provides:
//! - The `ResourceGateway` trait the transaction core depends on
//! - Wire shapes of the CRM v3 object API and per-collection endpoints
//! - [`RestGateway`], which assembles requests over an injected
//!   [`HttpTransport`] (connection setup and TLS live behind that seam)
//! - [`InMemoryGateway`], a complete in-memory CRM for tests and embedding

pub mod config;
pub mod endpoint;
pub mod error;
pub mod memory;
pub mod rest;
pub mod traits;
pub mod wire;

pub use config::{AccessToken, GatewayConfig};
pub use error::{GatewayError, GatewayResult};
pub use memory::InMemoryGateway;
pub use rest::{ApiRequest, ApiResponse, HttpTransport, Method, RestGateway};
pub use traits::{BatchFailure, BatchOutcome, ResourceGateway};
