//! DNS record queries.

use anyhow::Result;
use colored::Colorize;
use dnspector::recon::dns::engine_for;
use dnspector::{DnspectorError, QueryOutcome, RecordType, ReconError, ResultBlock};
use tracing::debug;

use super::Context;
use crate::output::{self, OutputFormat};

pub async fn execute(ctx: &Context, tokens: &[String]) -> Result<()> {
    let record_types = RecordType::resolve_list(tokens);
    for token in tokens {
        if !token.eq_ignore_ascii_case("all") && token.parse::<RecordType>().is_err() {
            debug!(token = %token, "ignoring unsupported record type");
        }
    }
    if record_types.is_empty() {
        return Err(DnspectorError::from(ReconError::NoValidRecordTypes).into());
    }

    let engine = engine_for(ctx.target.as_str(), &ctx.nameserver, &record_types, ctx.dns_timeout)
        .await
        .map_err(DnspectorError::from)?;
    if engine.uses_default_nameserver() {
        ctx.info(&format!("Using default nameserver: {}", engine.nameserver()));
    } else {
        ctx.info(&format!("Using nameserver: {}", engine.nameserver()));
    }

    let blocks = engine
        .query(ctx.target.as_str(), &record_types)
        .await
        .map_err(DnspectorError::from)?;

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&blocks)?,
        OutputFormat::Pretty => {
            for block in &blocks {
                print_block(block);
            }
        }
    }

    Ok(())
}

fn print_block(block: &ResultBlock) {
    println!("{}", format!("\nRecord Type: {}", block.record_type).magenta().bold());

    if block.is_success() {
        println!("{}", "Processed Output:".cyan());
        for line in block.lines() {
            println!("{line}");
        }
        println!("{}", "-".repeat(40));
        return;
    }

    if let Some(message) = block.message() {
        match block.outcome {
            QueryOutcome::NoAnswer | QueryOutcome::NxDomain => println!("{}", message.yellow()),
            _ => println!("{}", message.red()),
        }
    }
}
