//! DNS reconnaissance: record queries, passive subdomain enumeration, WHOIS
//! and zone transfer probing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use dnspector::{query_records, RecordType, SubdomainAggregator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let types = RecordType::resolve_list(&["A", "MX"]);
//!     for block in query_records("example.com", "", &types, Duration::from_secs(5)).await? {
//!         println!("{} {}:", block.domain, block.record_type);
//!         for line in block.lines() {
//!             println!("  {line}");
//!         }
//!         if let Some(message) = block.message() {
//!             println!("  {message}");
//!         }
//!     }
//!
//!     let found = SubdomainAggregator::with_defaults().enumerate("example.com").await?;
//!     println!("{} subdomains", found.len());
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS
//! - `whois` - Enable WHOIS lookups
//! - `full` - Everything above

#![doc(html_root_url = "https://docs.rs/dnspector/1.0.0")]

pub use dnspector_core::*;

pub use dnspector_client::{default_sources, HttpFetcher, PassiveClient, PassiveClientBuilder};

pub use dnspector_recon as recon;
pub use dnspector_recon::{
    probe_axfr, probe_zone, query_records, Enumeration, EnumerationProgress, ReconError,
    SubdomainAggregator,
};

#[cfg(feature = "whois")]
pub use dnspector_recon::WhoisClient;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
