//! WHOIS lookup and formatting.

use anyhow::Result;
use colored::Colorize;
use dnspector::WhoisInfo;

use super::Context;

const NOT_AVAILABLE: &str = "Not Available";

#[cfg(feature = "whois")]
pub async fn execute(ctx: &Context) -> Result<()> {
    use crate::output::{self, OutputFormat};

    let client = dnspector::WhoisClient::new()
        .map_err(dnspector::DnspectorError::from)?
        .with_timeout(ctx.http_timeout);
    let info = client
        .lookup(ctx.target.as_str())
        .await
        .map_err(dnspector::DnspectorError::from)?;
    if info.is_empty() {
        ctx.info("WHOIS server returned no recognizable registration fields");
    }

    match ctx.output_format {
        OutputFormat::Json => output::print_json(&info)?,
        OutputFormat::Pretty => print!("{}", format_whois(&info)),
    }

    Ok(())
}

#[cfg(not(feature = "whois"))]
#[allow(clippy::unused_async)]
pub async fn execute(_ctx: &Context) -> Result<()> {
    anyhow::bail!("WHOIS support was not compiled in (enable the `whois` feature)")
}

fn field(value: Option<&String>) -> &str {
    value.map_or(NOT_AVAILABLE, String::as_str)
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        format!("\n - {NOT_AVAILABLE}")
    } else {
        values.iter().map(|v| format!("\n - {v}")).collect()
    }
}

/// Render every WHOIS field, substituting "Not Available" for absent ones
#[must_use]
pub fn format_whois(info: &WhoisInfo) -> String {
    let label = |s: &str| s.blue().to_string();
    let r = &info.registrant;

    let mut out = format!("{}\n", "WHOIS Data:".magenta().bold());
    out += &format!("{} {}\n", label("Domain Name:"), field(info.domain_name.as_ref()));
    out += &format!("{} {}\n", label("Registrar:"), field(info.registrar.as_ref()));
    out += &format!("{} {}\n", label("Updated Date:"), field(info.updated_date.as_ref()));
    out += &format!("{} {}\n", label("Creation Date:"), field(info.creation_date.as_ref()));
    out += &format!("{} {}\n", label("Expiration Date:"), field(info.expiration_date.as_ref()));
    out += &format!("{}{}\n", label("Name Servers:"), list(&info.name_servers));
    out += &format!("{}{}\n", label("Status:"), list(&info.status));
    out += &format!("{}{}\n", label("Emails:"), list(&info.emails));
    out += &format!("{} {}\n", label("DNSSEC:"), field(info.dnssec.as_ref()));
    out += &format!("{}\n", label("Registrant Info:"));
    out += &format!("  Name: {}\n", field(r.name.as_ref()));
    out += &format!("  Organization: {}\n", field(r.organization.as_ref()));
    out += &format!("  Address: {}\n", field(r.address.as_ref()));
    out += &format!("  City: {}\n", field(r.city.as_ref()));
    out += &format!("  State: {}\n", field(r.state.as_ref()));
    out += &format!("  Postal Code: {}\n", field(r.postal_code.as_ref()));
    out += &format!("  Country: {}\n", field(r.country.as_ref()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_read_not_available() {
        let text = format_whois(&WhoisInfo::default());

        assert!(text.contains("  Name: Not Available\n"));
        assert!(text.contains("  Postal Code: Not Available\n"));
        assert!(text.contains("\n - Not Available\n"));
        assert_eq!(text.matches(NOT_AVAILABLE).count(), 16);
    }

    #[test]
    fn lists_every_name_server() {
        let info = WhoisInfo {
            registrar: Some("Example Registrar".into()),
            name_servers: vec!["ns1.example.com".into(), "ns2.example.com".into()],
            ..WhoisInfo::default()
        };

        let text = format_whois(&info);

        assert!(text.contains(" Example Registrar\n"));
        assert!(text.contains("\n - ns1.example.com\n - ns2.example.com\n"));
    }
}
