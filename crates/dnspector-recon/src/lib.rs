//! DNS reconnaissance operations for DNSpector.
//!
//! - [`dns`]: record queries against the system resolver or a chosen server
//! - [`axfr`]: zone transfer probing
//! - [`subdomains`]: concurrent passive subdomain aggregation
//! - [`whois`]: registration lookups (feature `whois`)

#![doc(html_root_url = "https://docs.rs/dnspector-recon/1.0.0")]

mod error;

pub mod axfr;
pub mod dns;
pub mod subdomains;

#[cfg(feature = "whois")]
pub mod whois;

pub use axfr::{probe_axfr, probe_zone};
pub use dns::{query_records, HickoryResolver, RecordQueryEngine, RecordResolver};
pub use error::{ReconError, ReconResult};
pub use subdomains::{extract_subdomains, Enumeration, EnumerationProgress, SubdomainAggregator};

#[cfg(feature = "whois")]
pub use whois::WhoisClient;
