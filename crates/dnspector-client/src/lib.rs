//! HTTP client for passive subdomain sources.
//!
//! This crate provides [`PassiveClient`], a thin reqwest wrapper with a fixed
//! per-request timeout, the [`HttpFetcher`] seam used by the subdomain
//! aggregator, and the built-in source table.

mod client;
mod sources;

pub use client::{HttpFetcher, PassiveClient, PassiveClientBuilder, DEFAULT_TIMEOUT};
pub use dnspector_core::{DnspectorError, Result, SourceDescriptor};
pub use sources::default_sources;
