//! Syntax checks applied to user-supplied domains and nameservers.
//!
//! Both predicates are pure and run before any network activity. Values that
//! pass them are safe to hand to resolver configuration or argument vectors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DnspectorError;

/// Maximum length of a full domain name in presentation format
pub const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label
pub const MAX_LABEL_LEN: usize = 63;

/// Check a domain name against the label grammar.
///
/// Labels are 1-63 ASCII alphanumerics with internal hyphens, joined by
/// single dots. A trailing root dot is not accepted.
#[must_use]
pub fn validate_domain(s: &str) -> bool {
    if s.is_empty() || s.len() > MAX_DOMAIN_LEN {
        return false;
    }
    s.split('.').all(valid_label)
}

fn valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Check a nameserver override.
///
/// Empty means "system default". IPv6 checking is deliberately loose: only the
/// character class and the presence of a colon are verified.
#[must_use]
pub fn validate_nameserver(s: &str) -> bool {
    s.is_empty() || is_ipv4_literal(s) || is_loose_ipv6_literal(s) || validate_domain(s)
}

fn is_ipv4_literal(s: &str) -> bool {
    let octets: Vec<&str> = s.split('.').collect();
    octets.len() == 4
        && octets.iter().all(|octet| {
            !octet.is_empty()
                && octet.len() <= 3
                && octet.bytes().all(|b| b.is_ascii_digit())
                && octet.parse::<u16>().is_ok_and(|v| v <= 255)
        })
}

fn is_loose_ipv6_literal(s: &str) -> bool {
    s.contains(':') && s.chars().all(|c| c.is_ascii_hexdigit() || c == ':')
}

/// A domain name that has passed [`validate_domain`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Domain(String);

impl Domain {
    /// Validate and wrap a domain name
    pub fn parse(s: &str) -> crate::Result<Self> {
        if validate_domain(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(DnspectorError::Validation(format!("Invalid domain name: {s}")))
        }
    }

    /// The domain as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Domain {
    type Err = DnspectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Domain {
    type Error = DnspectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Domain> for String {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
