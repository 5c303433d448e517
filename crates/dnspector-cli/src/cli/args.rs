//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;

/// DNS Enumeration and Analysis Tool
///
/// Query DNS records, enumerate subdomains from passive sources, look up
/// WHOIS data and check for open zone transfers. With no operation flag an
/// A record query is run.
#[derive(Parser, Debug)]
#[command(name = "dnspector")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Target domain
    pub target: String,

    /// Nameserver (IP or hostname) to use
    #[arg(short, long, env = "DNSPECTOR_NAMESERVER")]
    pub nameserver: Option<String>,

    /// DNS record types to query ("all" for every supported type)
    #[arg(short, long, num_args = 0.., value_name = "TYPE")]
    pub records: Option<Vec<String>>,

    /// Perform a WHOIS lookup
    #[arg(short, long)]
    pub whois: bool,

    /// Perform passive subdomain enumeration
    #[arg(short = 's', long = "subdomain", visible_alias = "sd")]
    pub subdomains: bool,

    /// Perform a zone transfer check
    #[arg(short = 'z', long = "zone-transfer", visible_alias = "zt")]
    pub zone_transfer: bool,

    /// DNS and zone transfer timeout in seconds
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// HTTP timeout for passive sources and WHOIS, in seconds
    #[arg(long, value_name = "SECS")]
    pub http_timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress the banner, progress and informational lines
    #[arg(short, long)]
    pub quiet: bool,

    /// Show debug logs on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// True when no operation flag was given
    #[must_use]
    pub fn no_operation_selected(&self) -> bool {
        !self.whois && !self.subdomains && !self.zone_transfer && self.records.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn records_take_multiple_values() {
        let cli = Cli::try_parse_from(["dnspector", "example.com", "-r", "a", "mx", "-w"]).unwrap();
        assert_eq!(cli.records, Some(vec!["a".to_string(), "mx".to_string()]));
        assert!(cli.whois);
        assert!(!cli.no_operation_selected());
    }

    #[test]
    fn long_aliases_match_short_flags() {
        let cli = Cli::try_parse_from(["dnspector", "example.com", "--sd", "--zt"]).unwrap();
        assert!(cli.subdomains);
        assert!(cli.zone_transfer);

        let cli = Cli::try_parse_from(["dnspector", "example.com", "-s", "-z"]).unwrap();
        assert!(cli.subdomains);
        assert!(cli.zone_transfer);
    }

    #[test]
    fn bare_target_selects_nothing() {
        let cli = Cli::try_parse_from(["dnspector", "example.com"]).unwrap();
        assert!(cli.no_operation_selected());
    }
}
