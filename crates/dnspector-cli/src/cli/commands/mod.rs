//! Operation implementations.

pub mod records;
pub mod subdomains;
pub mod whois;
pub mod zone;

use std::time::Duration;

use colored::Colorize;
use dnspector::{Domain, SourceDescriptor};

use crate::output::OutputFormat;

/// Shared context for all operations.
#[derive(Debug, Clone)]
pub struct Context {
    /// Validated target domain
    pub target: Domain,

    /// Nameserver override, empty for the system resolver
    pub nameserver: String,

    /// DNS and AXFR timeout
    pub dns_timeout: Duration,

    /// Passive source and WHOIS timeout
    pub http_timeout: Duration,

    /// Output format
    pub output_format: OutputFormat,

    /// Suppress informational output
    pub quiet: bool,

    /// Passive subdomain sources
    pub sources: Vec<SourceDescriptor>,
}

impl Context {
    /// Whether human-oriented extras (progress, info lines) should be shown
    #[must_use]
    pub fn chatty(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Pretty
    }

    /// Print an informational line unless quiet or machine output
    pub fn info(&self, message: &str) {
        if self.chatty() {
            println!("{}", message.cyan());
        }
    }
}
