//! WHOIS lookup integration using whois-rust.

use std::sync::OnceLock;
use std::time::Duration;

use dnspector_core::{validate_domain, RegistrantInfo, WhoisInfo};
use regex::Regex;
use tracing::debug;
use whois_rust::{WhoIs, WhoIsLookupOptions};

use crate::error::{ReconError, ReconResult};

/// Default WHOIS socket timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

const WHOIS_SERVERS: &str = include_str!("whois_servers.json");

/// WHOIS client
pub struct WhoisClient {
    whois: WhoIs,
    timeout: Duration,
}

impl WhoisClient {
    /// Create a client using the embedded TLD server table
    pub fn new() -> ReconResult<Self> {
        let whois = WhoIs::from_string(WHOIS_SERVERS)
            .map_err(|e| ReconError::Whois(format!("failed to load server list: {e}")))?;
        Ok(Self {
            whois,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set the socket timeout for lookups
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up registration data for a domain
    pub async fn lookup(&self, domain: &str) -> ReconResult<WhoisInfo> {
        if !validate_domain(domain) {
            return Err(ReconError::InvalidDomain(domain.to_string()));
        }

        let mut options =
            WhoIsLookupOptions::from_string(domain).map_err(|e| ReconError::Whois(e.to_string()))?;
        options.timeout = Some(self.timeout);

        debug!(domain, "WHOIS lookup");
        let raw = self
            .whois
            .lookup_async(options)
            .await
            .map_err(|e| ReconError::Whois(e.to_string()))?;

        Ok(parse_whois_response(&raw))
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email pattern")
    })
}

fn set_once(slot: &mut Option<String>, value: &str) {
    if slot.is_none() && !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !value.is_empty() && !list.contains(&value) {
        list.push(value);
    }
}

/// Parse raw WHOIS text into structured data.
///
/// Registries disagree on key names, so several aliases map to each field and
/// the first non-empty value wins.
pub fn parse_whois_response(raw: &str) -> WhoisInfo {
    let mut info = WhoisInfo {
        raw: raw.to_string(),
        ..WhoisInfo::default()
    };
    let mut registrant = RegistrantInfo::default();

    for line in raw.lines() {
        let line = line.trim();
        if line.starts_with('%') || line.starts_with('#') || line.starts_with(">>>") {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();

        match key.as_str() {
            "domain name" | "domain" => set_once(&mut info.domain_name, &value.to_lowercase()),
            "registrar" | "registrar name" | "sponsoring registrar" => {
                set_once(&mut info.registrar, value);
            }
            "updated date" | "last updated" | "last modified" | "changed" => {
                set_once(&mut info.updated_date, value);
            }
            "creation date" | "created" | "created date" | "registration date" => {
                set_once(&mut info.creation_date, value);
            }
            "registry expiry date" | "expiration date" | "expiry date" | "expires" | "paid-till" => {
                set_once(&mut info.expiration_date, value);
            }
            "name server" | "nserver" => {
                // Some registries append glue addresses after the host.
                let host = value.split_whitespace().next().unwrap_or_default();
                push_unique(&mut info.name_servers, host.trim_end_matches('.').to_lowercase());
            }
            "domain status" | "status" => {
                let code = value.split_whitespace().next().unwrap_or_default();
                push_unique(&mut info.status, code.to_string());
            }
            "dnssec" => set_once(&mut info.dnssec, value),
            "registrant name" | "registrant" => set_once(&mut registrant.name, value),
            "registrant organization" | "registrant organisation" => {
                set_once(&mut registrant.organization, value);
            }
            "registrant street" | "registrant address" => set_once(&mut registrant.address, value),
            "registrant city" => set_once(&mut registrant.city, value),
            "registrant state/province" | "registrant state" => set_once(&mut registrant.state, value),
            "registrant postal code" => set_once(&mut registrant.postal_code, value),
            "registrant country" | "registrant country code" => set_once(&mut registrant.country, value),
            _ => {}
        }
    }

    for email in email_pattern().find_iter(raw) {
        push_unique(&mut info.emails, email.as_str().to_lowercase());
    }

    info.registrant = registrant;
    info
}
