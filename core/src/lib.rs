//! Synchronous client core for the Omeda REST API.
//!
//! # Overview
//! Validates a flat option map, composes brand- or client-scoped endpoint
//! paths, enforces an allowlist of request methods, marshals request bodies
//! and decodes JSON responses. Resource objects (`customer`, `brand`,
//! `omail`) format paths and funnel every call through
//! `OmedaClient::send`.
//!
//! # Design
//! - `OmedaClient` is immutable after construction; configuration errors
//!   surface from the constructor, never from the first call.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`);
//!   a `Transport` performs the I/O. `UreqTransport` is the blocking default.
//! - Resources depend on the `ResourceHost` trait rather than the concrete
//!   client, so they can be exercised without a network.
//! - No retries, timeouts or pagination are layered on top of the transport.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::{OmedaClient, APP_ID_HEADER, INPUT_ID_HEADER, REQUIRED_OPTIONS};
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, MethodPolicy};
pub use resources::{
    BrandResource, CustomerResource, OmailResource, Resource, ResourceHost, ResourceKind,
};
pub use transport::{Transport, TransportSettings, UreqTransport};
pub use types::{BehaviorSelector, DeploymentSearch, ProcessTransaction, RunProcessor};
