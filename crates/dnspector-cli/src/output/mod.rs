//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const BANNER: &str = r"
    ____  _   _______                 __
   / __ \/ | / / ___/____  ___  _____/ /_____  _____
  / / / /  |/ /\__ \/ __ \/ _ \/ ___/ __/ __ \/ ___/
 / /_/ / /|  /___/ / /_/ /  __/ /__/ /_/ /_/ / /
/_____/_/ |_//____/ .___/\___/\___/\__/\____/_/
                 /_/
";

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Colored, dig-style text
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {s}\n\
                 Valid formats: pretty, json"
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Print the ASCII banner and tool name
pub fn print_banner() {
    println!("{}", BANNER.cyan());
    println!("{}", "DNSpector - DNS Enumeration and Analysis Tool".bold());
}

/// Pretty-print any serializable value as JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> dnspector::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
