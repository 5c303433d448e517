use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DnspectorError;

/// Record types DNSpector knows how to query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name
    Cname,
    /// Mail exchanger
    Mx,
    /// Authoritative nameserver
    Ns,
    /// Pointer
    Ptr,
    /// Start of authority
    Soa,
    /// Service locator
    Srv,
    /// Text
    Txt,
    /// Certification authority authorization
    Caa,
    /// DNSSEC public key
    Dnskey,
    /// Delegation signer
    Ds,
    /// Naming authority pointer
    Naptr,
    /// DNSSEC signature
    Rrsig,
    /// Sender policy framework (legacy type 99)
    Spf,
    /// TLS certificate association
    Tlsa,
    /// Uniform resource identifier
    Uri,
}

impl RecordType {
    /// Every supported type, in the order `all` expands to
    pub const ALL: [Self; 17] = [
        Self::A,
        Self::Aaaa,
        Self::Cname,
        Self::Mx,
        Self::Ns,
        Self::Ptr,
        Self::Soa,
        Self::Srv,
        Self::Txt,
        Self::Caa,
        Self::Dnskey,
        Self::Ds,
        Self::Naptr,
        Self::Rrsig,
        Self::Spf,
        Self::Tlsa,
        Self::Uri,
    ];

    /// Uppercase mnemonic
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
            Self::Caa => "CAA",
            Self::Dnskey => "DNSKEY",
            Self::Ds => "DS",
            Self::Naptr => "NAPTR",
            Self::Rrsig => "RRSIG",
            Self::Spf => "SPF",
            Self::Tlsa => "TLSA",
            Self::Uri => "URI",
        }
    }

    /// IANA RR type code
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Ptr => 12,
            Self::Mx => 15,
            Self::Txt => 16,
            Self::Aaaa => 28,
            Self::Srv => 33,
            Self::Naptr => 35,
            Self::Ds => 43,
            Self::Rrsig => 46,
            Self::Dnskey => 48,
            Self::Tlsa => 52,
            Self::Spf => 99,
            Self::Uri => 256,
            Self::Caa => 257,
        }
    }

    /// Normalize a user-supplied list of type names.
    ///
    /// Matching is case-insensitive. Any `all` token expands to [`Self::ALL`].
    /// Unrecognized tokens (including `axfr`) are dropped, duplicates keep
    /// their first position.
    #[must_use]
    pub fn resolve_list<S: AsRef<str>>(tokens: &[S]) -> Vec<Self> {
        if tokens
            .iter()
            .any(|t| t.as_ref().trim().eq_ignore_ascii_case("all"))
        {
            return Self::ALL.to_vec();
        }

        let mut types = Vec::with_capacity(tokens.len());
        for token in tokens {
            if let Ok(rtype) = token.as_ref().parse::<Self>() {
                if !types.contains(&rtype) {
                    types.push(rtype);
                }
            }
        }
        types
    }
}

impl FromStr for RecordType {
    type Err = DnspectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DnspectorError::Validation(format!("unsupported record type: {s}")))
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
