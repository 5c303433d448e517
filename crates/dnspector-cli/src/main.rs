//! dnspector - DNS enumeration and analysis tool

use std::process::ExitCode;

use colored::Colorize;

#[tokio::main]
async fn main() -> ExitCode {
    // Dropping the run future on Ctrl-C aborts any in-flight lookups.
    tokio::select! {
        result = dnspector_cli::run() => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{} {e:#}", "Error:".red().bold());
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\nOperation cancelled by user. Exiting DNSpector...");
            ExitCode::SUCCESS
        }
    }
}
