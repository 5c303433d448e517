//! Passive subdomain enumeration.

use anyhow::Result;
use colored::Colorize;
use dnspector::{DnspectorError, EnumerationProgress, PassiveClient, SubdomainAggregator};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;

use super::Context;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: &Context) -> Result<()> {
    let client = PassiveClient::builder().timeout(ctx.http_timeout).build();
    let aggregator = SubdomainAggregator::new(client, ctx.sources.clone());

    let progress = ctx.chatty().then(|| progress_bar(ctx.sources.len()));
    let run = aggregator
        .enumerate_with_progress(ctx.target.as_str(), |p| {
            if let Some(bar) = &progress {
                update(bar, p);
            }
        })
        .await
        .map_err(DnspectorError::from)?;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&json!({
            "domain": ctx.target,
            "subdomains": run.subdomains,
            "sources": run.sources,
        }))?,
        OutputFormat::Pretty => {
            for name in &run.subdomains {
                println!("{name}");
            }
            if !ctx.quiet {
                let failed = run.sources.iter().filter(|s| s.error.is_some()).count();
                println!(
                    "{}",
                    format!(
                        "\nFound {} unique subdomains ({} of {} sources responded)",
                        run.subdomains.len(),
                        run.sources.len() - failed,
                        run.sources.len()
                    )
                    .dimmed()
                );
            }
        }
    }

    Ok(())
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar.set_message("querying passive sources");
    bar
}

fn update(bar: &ProgressBar, progress: &EnumerationProgress) {
    bar.inc(1);
    match &progress.error {
        Some(error) => bar.println(format!(
            "{} {} unavailable: {error}",
            "!".yellow().bold(),
            progress.source
        )),
        None => bar.println(format!(
            "{} {}: {} found",
            "+".green().bold(),
            progress.source,
            progress.found
        )),
    }
    bar.set_message(format!("{} unique", progress.unique));
}
