//! # dnspector-cli
//!
//! Command-line front end for DNSpector.
//!
//! ## Features
//!
//! - **Record queries**: dig-style output for any of the supported types
//! - **Passive subdomains**: five public sources queried concurrently
//! - **WHOIS**: registration data with every field shown
//! - **Zone transfer check**: AXFR against one or all authoritative servers
//! - **Output formats**: colored text or JSON

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
