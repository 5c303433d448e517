//! Zone transfer (AXFR) check.

use anyhow::Result;
use colored::Colorize;
use dnspector::probe_zone;

use super::Context;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: &Context) -> Result<()> {
    if ctx.nameserver.is_empty() {
        ctx.info("Looking up authoritative nameservers...");
    }

    let results = probe_zone(ctx.target.as_str(), &ctx.nameserver, ctx.dns_timeout).await;

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&results)?,
        OutputFormat::Pretty => {
            for result in &results {
                if result.ok {
                    println!(
                        "{}",
                        format!("\nZone Transfer Results ({}):", result.nameserver)
                            .magenta()
                            .bold()
                    );
                    println!("{}", result.detail);
                } else {
                    println!(
                        "{}",
                        format!(
                            "\nZone Transfer Failed ({}): {}",
                            result.nameserver, result.detail
                        )
                        .red()
                    );
                }
            }
        }
    }

    Ok(())
}
