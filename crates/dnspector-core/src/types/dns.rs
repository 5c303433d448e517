use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

use super::RecordType;

/// Decoded payload of a single resource record.
///
/// Names are stored without their trailing root dot; rendering adds it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RecordData {
    /// A / AAAA
    Address(IpAddr),

    /// MX
    Mx {
        /// Lower is preferred
        preference: u16,
        /// Mail host
        exchange: String,
    },

    /// NS / CNAME target
    Target(String),

    /// SOA
    Soa {
        /// Primary master
        mname: String,
        /// Responsible mailbox
        rname: String,
        /// Zone serial
        serial: u32,
        /// Refresh interval
        refresh: i32,
        /// Retry interval
        retry: i32,
        /// Expire limit
        expire: i32,
        /// Negative caching TTL
        minimum: u32,
    },

    /// TXT character strings
    Txt(Vec<String>),

    /// SRV
    Srv {
        /// Priority
        priority: u16,
        /// Weight
        weight: u16,
        /// Port
        port: u16,
        /// Target host
        target: String,
    },

    /// Any other type, in presentation format
    Other(String),
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(ip) => write!(f, "{ip}"),
            Self::Mx {
                preference,
                exchange,
            } => write!(f, "{preference} {exchange}."),
            Self::Target(target) => write!(f, "{target}."),
            Self::Soa {
                mname,
                rname,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{mname}. {rname}. {serial} {refresh} {retry} {expire} {minimum}"
            ),
            Self::Txt(strings) => write!(f, "\"{}\"", strings.join(" ")),
            Self::Srv {
                priority,
                weight,
                port,
                target,
            } => write!(f, "{priority} {weight} {port} {target}."),
            Self::Other(text) => f.write_str(text),
        }
    }
}

/// How a single record-type lookup ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum QueryOutcome {
    /// The server answered with records
    Records(Vec<RecordData>),
    /// The name exists but has no records of this type
    NoAnswer,
    /// The name does not exist
    NxDomain,
    /// No nameserver could answer
    NoNameservers,
    /// The configured timeout elapsed
    Timeout,
    /// Anything else, with its description
    Error(String),
}

/// Result of querying one record type for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultBlock {
    /// Domain that was queried
    pub domain: String,

    /// Record type this block answers
    pub record_type: RecordType,

    /// Lookup outcome
    #[serde(flatten)]
    pub outcome: QueryOutcome,
}

impl ResultBlock {
    /// Create a block
    #[must_use]
    pub fn new(domain: impl Into<String>, record_type: RecordType, outcome: QueryOutcome) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            outcome,
        }
    }

    /// Returns true if the lookup produced records
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, QueryOutcome::Records(_))
    }

    /// Records rendered as dig-style lines; empty for non-success outcomes
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        match &self.outcome {
            QueryOutcome::Records(records) => records
                .iter()
                .map(|r| format!("{}.\t\tIN\t{}\t{}", self.domain, self.record_type, r))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Human readable explanation for non-success outcomes
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let (domain, rtype) = (&self.domain, self.record_type);
        match &self.outcome {
            QueryOutcome::Records(_) => None,
            QueryOutcome::NoAnswer => Some(format!(
                "Query successful but no {rtype} records found for {domain}."
            )),
            QueryOutcome::NxDomain => Some(format!("Domain {domain} does not exist (NXDOMAIN).")),
            QueryOutcome::NoNameservers => Some(format!(
                "No nameservers available to answer query for {domain}."
            )),
            QueryOutcome::Timeout => Some(format!(
                "Query timeout while looking up {rtype} records for {domain}."
            )),
            QueryOutcome::Error(e) => Some(format!(
                "Error while querying {rtype} records for {domain}: {e}"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(rtype: RecordType, records: Vec<RecordData>) -> ResultBlock {
        ResultBlock::new("example.com", rtype, QueryOutcome::Records(records))
    }

    #[test]
    fn renders_dig_style_lines() {
        let a = block(RecordType::A, vec![RecordData::Address("93.184.216.34".parse().unwrap())]);
        assert_eq!(a.lines(), vec!["example.com.\t\tIN\tA\t93.184.216.34"]);

        let mx = block(
            RecordType::Mx,
            vec![RecordData::Mx {
                preference: 10,
                exchange: "mail.example.com".into(),
            }],
        );
        assert_eq!(mx.lines(), vec!["example.com.\t\tIN\tMX\t10 mail.example.com."]);

        let ns = block(RecordType::Ns, vec![RecordData::Target("a.iana-servers.net".into())]);
        assert_eq!(ns.lines(), vec!["example.com.\t\tIN\tNS\ta.iana-servers.net."]);
    }

    #[test]
    fn renders_soa_srv_and_txt() {
        let soa = RecordData::Soa {
            mname: "ns.icann.org".into(),
            rname: "noc.dns.icann.org".into(),
            serial: 2024081401,
            refresh: 7200,
            retry: 3600,
            expire: 1_209_600,
            minimum: 3600,
        };
        assert_eq!(
            soa.to_string(),
            "ns.icann.org. noc.dns.icann.org. 2024081401 7200 3600 1209600 3600"
        );

        let srv = RecordData::Srv {
            priority: 0,
            weight: 5,
            port: 5060,
            target: "sip.example.com".into(),
        };
        assert_eq!(srv.to_string(), "0 5 5060 sip.example.com.");

        let txt = RecordData::Txt(vec!["v=spf1".into(), "-all".into()]);
        assert_eq!(txt.to_string(), "\"v=spf1 -all\"");
    }

    #[test]
    fn failure_outcomes_have_messages_and_no_lines() {
        let cases = [
            (QueryOutcome::NoAnswer, "Query successful but no TXT records found for example.com."),
            (QueryOutcome::NxDomain, "Domain example.com does not exist (NXDOMAIN)."),
            (QueryOutcome::NoNameservers, "No nameservers available to answer query for example.com."),
            (QueryOutcome::Timeout, "Query timeout while looking up TXT records for example.com."),
        ];
        for (outcome, expected) in cases {
            let b = ResultBlock::new("example.com", RecordType::Txt, outcome);
            assert!(!b.is_success());
            assert!(b.lines().is_empty());
            assert_eq!(b.message().as_deref(), Some(expected));
        }
    }

    #[test]
    fn success_block_json_shape() {
        let b = block(RecordType::A, vec![RecordData::Address("127.0.0.1".parse().unwrap())]);
        let json = serde_json::to_value(&b).unwrap();
        assert_eq!(json["record_type"], "A");
        assert_eq!(json["status"], "records");
        assert_eq!(json["detail"][0]["kind"], "address");
    }
}
