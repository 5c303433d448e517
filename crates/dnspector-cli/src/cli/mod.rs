//! CLI argument parsing and operation dispatch.

pub mod args;
pub mod commands;

use std::time::Duration;

use anyhow::Result;
use args::Cli;
use clap::Parser;
use colored::Colorize;
use dnspector::{default_sources, Domain};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::output::{self, OutputFormat};

/// Default DNS timeout in seconds
const DEFAULT_DNS_TIMEOUT: u64 = 5;

/// Default HTTP timeout in seconds
const DEFAULT_HTTP_TIMEOUT: u64 = 15;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.no_color {
        colored::control::set_override(false);
    }

    // The banner goes out before the target is validated.
    let format = cli.output.or(config.output_format).unwrap_or_default();
    if !(cli.quiet || config.quiet) && format == OutputFormat::Pretty {
        output::print_banner();
    }

    let ctx = commands::Context::from_sources(&cli, config)?;

    // Each operation reports its own failure; the rest still run.
    if cli.whois {
        report(commands::whois::execute(&ctx).await);
    }

    if let Some(tokens) = &cli.records {
        report(commands::records::execute(&ctx, tokens).await);
    } else if cli.no_operation_selected() {
        report(commands::records::execute(&ctx, &["A".to_string()]).await);
    }

    if cli.subdomains {
        report(commands::subdomains::execute(&ctx).await);
    }

    if cli.zone_transfer {
        report(commands::zone::execute(&ctx).await);
    }

    Ok(())
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("{} {e:#}", "Error:".red().bold());
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the level
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

impl commands::Context {
    /// Merge flags over the config file over built-in defaults.
    ///
    /// Fails if the target is not a valid domain name.
    fn from_sources(cli: &Cli, config: Config) -> dnspector::Result<Self> {
        Ok(Self {
            target: Domain::parse(cli.target.trim())?,
            nameserver: cli
                .nameserver
                .clone()
                .or(config.nameserver)
                .unwrap_or_default(),
            dns_timeout: Duration::from_secs(
                cli.timeout.or(config.timeout).unwrap_or(DEFAULT_DNS_TIMEOUT),
            ),
            http_timeout: Duration::from_secs(
                cli.http_timeout
                    .or(config.http_timeout)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT),
            ),
            output_format: cli.output.or(config.output_format).unwrap_or_default(),
            quiet: cli.quiet || config.quiet,
            sources: config.sources.unwrap_or_else(default_sources),
        })
    }
}
