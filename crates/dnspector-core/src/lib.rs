//! Core types, validation and errors shared by the DNSpector crates.
//!
//! - **Types**: record types, query result blocks, passive source
//!   descriptors, WHOIS records and zone-transfer outcomes
//! - **Validation**: [`validate_domain`] and [`validate_nameserver`], applied
//!   before any network call
//! - **Errors**: [`DnspectorError`] and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use dnspector_core::{validate_domain, RecordType};
//!
//! assert!(validate_domain("example.com"));
//! assert!(!validate_domain("not a domain!"));
//!
//! let types = RecordType::resolve_list(&["mx", "a", "axfr"]);
//! assert_eq!(types, vec![RecordType::Mx, RecordType::A]);
//! ```

mod error;
pub mod types;
pub mod validate;

pub use error::{DnspectorError, Result};
pub use types::*;
pub use validate::{validate_domain, validate_nameserver, Domain};
