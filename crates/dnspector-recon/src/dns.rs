//! Record query engine.
//!
//! Issues one lookup per requested record type, strictly in request order,
//! and turns every lookup into a [`ResultBlock`]. Resolution failures such as
//! NXDOMAIN or a timeout are outcomes, not errors.

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use dnspector_core::{
    validate_domain, validate_nameserver, QueryOutcome, RecordData, RecordType, ResultBlock,
};
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{Name, RData, RecordType as WireType};
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, TokioResolver};
use tracing::{debug, info, warn};

use crate::error::{ReconError, ReconResult};

/// Default DNS timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A DNS client that answers one (name, type) question at a time.
#[async_trait]
pub trait RecordResolver: Send + Sync {
    /// Address or name of the server being queried
    fn nameserver(&self) -> &str;

    /// Whether the server came from system configuration rather than an override
    fn is_default(&self) -> bool;

    /// Look up `record_type` for `domain`
    async fn resolve(&self, domain: &str, record_type: RecordType) -> QueryOutcome;
}

/// [`RecordResolver`] backed by hickory
pub struct HickoryResolver {
    resolver: TokioResolver,
    nameserver: String,
    is_default: bool,
    timeout: Duration,
}

impl HickoryResolver {
    /// Use the host's resolver configuration.
    ///
    /// Falls back to hickory's built-in upstreams when the system
    /// configuration cannot be read.
    #[must_use]
    pub fn system(timeout: Duration) -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                warn!(error = %e, "failed to read system DNS configuration, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };

        let nameserver = config
            .name_servers()
            .first()
            .map_or_else(|| "system default".to_string(), |ns| ns.socket_addr.ip().to_string());

        apply_timeout(&mut opts, timeout);
        Self {
            resolver: build(config, opts),
            nameserver,
            is_default: true,
            timeout,
        }
    }

    /// Query a single server directly
    #[must_use]
    pub fn for_address(ip: IpAddr, timeout: Duration) -> Self {
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(&[ip], 53, true),
        );
        let mut opts = ResolverOpts::default();
        apply_timeout(&mut opts, timeout);

        Self {
            resolver: build(config, opts),
            nameserver: ip.to_string(),
            is_default: false,
            timeout,
        }
    }

    /// Build a resolver for a validated nameserver override.
    ///
    /// An empty string selects the system resolver. Hostnames are resolved
    /// to their first address through the system resolver first.
    pub async fn for_nameserver(nameserver: &str, timeout: Duration) -> ReconResult<Self> {
        if nameserver.is_empty() {
            return Ok(Self::system(timeout));
        }
        let ip = resolve_host(nameserver, timeout).await?;
        let mut resolver = Self::for_address(ip, timeout);
        if ip.to_string() != nameserver {
            resolver.nameserver = format!("{nameserver} ({ip})");
        }
        Ok(resolver)
    }
}

/// Resolve a nameserver given as an IP literal or a hostname
pub(crate) async fn resolve_host(host: &str, timeout: Duration) -> ReconResult<IpAddr> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let system = HickoryResolver::system(timeout);
    let lookup = tokio::time::timeout(timeout, system.resolver.lookup_ip(fqdn(host)))
        .await
        .map_err(|_| ReconError::Timeout(timeout))?
        .map_err(|e| ReconError::Dns(format!("cannot resolve nameserver {host}: {e}")))?;

    lookup
        .iter()
        .next()
        .ok_or_else(|| ReconError::Dns(format!("nameserver {host} has no addresses")))
}

fn apply_timeout(opts: &mut ResolverOpts, timeout: Duration) {
    opts.timeout = timeout;
    opts.attempts = 1;
}

fn build(config: ResolverConfig, opts: ResolverOpts) -> TokioResolver {
    TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
        .with_options(opts)
        .build()
}

/// Append the root label so search domains are never applied
fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{domain}.")
    }
}

#[async_trait]
impl RecordResolver for HickoryResolver {
    fn nameserver(&self) -> &str {
        &self.nameserver
    }

    fn is_default(&self) -> bool {
        self.is_default
    }

    async fn resolve(&self, domain: &str, record_type: RecordType) -> QueryOutcome {
        let wire = WireType::from(record_type.code());
        let lookup = tokio::time::timeout(self.timeout, self.resolver.lookup(fqdn(domain), wire)).await;

        match lookup {
            Err(_) => QueryOutcome::Timeout,
            Ok(Err(e)) => classify_error(&e),
            Ok(Ok(answer)) => {
                // CNAME chains are returned alongside the requested type.
                let records: Vec<RecordData> = answer
                    .record_iter()
                    .filter(|r| r.record_type() == wire)
                    .map(|r| record_data(r.data()))
                    .collect();
                if records.is_empty() {
                    QueryOutcome::NoAnswer
                } else {
                    QueryOutcome::Records(records)
                }
            }
        }
    }
}

/// Map a resolver failure onto the outcome taxonomy
fn classify_error(err: &ResolveError) -> QueryOutcome {
    if err.is_nx_domain() {
        return QueryOutcome::NxDomain;
    }

    if let Some(proto) = err.proto() {
        match proto.kind() {
            ProtoErrorKind::NoRecordsFound { response_code, .. } => {
                return match *response_code {
                    ResponseCode::NXDomain => QueryOutcome::NxDomain,
                    ResponseCode::ServFail | ResponseCode::Refused => QueryOutcome::NoNameservers,
                    _ => QueryOutcome::NoAnswer,
                };
            }
            ProtoErrorKind::Timeout => return QueryOutcome::Timeout,
            ProtoErrorKind::NoConnections => return QueryOutcome::NoNameservers,
            _ => {}
        }
    }

    QueryOutcome::Error(err.to_string())
}

fn bare(name: &Name) -> String {
    name.to_string().trim_end_matches('.').to_string()
}

/// Convert wire record data into the display model
fn record_data(rdata: &RData) -> RecordData {
    match rdata {
        RData::A(a) => RecordData::Address(IpAddr::V4(a.0)),
        RData::AAAA(aaaa) => RecordData::Address(IpAddr::V6(aaaa.0)),
        RData::MX(mx) => RecordData::Mx {
            preference: mx.preference(),
            exchange: bare(mx.exchange()),
        },
        RData::NS(ns) => RecordData::Target(bare(&ns.0)),
        RData::CNAME(cname) => RecordData::Target(bare(&cname.0)),
        RData::SOA(soa) => RecordData::Soa {
            mname: bare(soa.mname()),
            rname: bare(soa.rname()),
            serial: soa.serial(),
            refresh: soa.refresh(),
            retry: soa.retry(),
            expire: soa.expire(),
            minimum: soa.minimum(),
        },
        RData::TXT(txt) => RecordData::Txt(
            txt.iter()
                .map(|s| String::from_utf8_lossy(s).into_owned())
                .collect(),
        ),
        RData::SRV(srv) => RecordData::Srv {
            priority: srv.priority(),
            weight: srv.weight(),
            port: srv.port(),
            target: bare(srv.target()),
        },
        other => RecordData::Other(other.to_string()),
    }
}

/// Runs record queries through a [`RecordResolver`]
pub struct RecordQueryEngine<R> {
    resolver: R,
}

impl<R: RecordResolver> RecordQueryEngine<R> {
    /// Create an engine around a resolver
    pub const fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Server the engine sends queries to
    pub fn nameserver(&self) -> &str {
        self.resolver.nameserver()
    }

    /// Whether no override was given
    pub fn uses_default_nameserver(&self) -> bool {
        self.resolver.is_default()
    }

    /// Query each record type for `domain`, in order.
    ///
    /// The returned blocks line up one-to-one with `record_types`.
    pub async fn query(
        &self,
        domain: &str,
        record_types: &[RecordType],
    ) -> ReconResult<Vec<ResultBlock>> {
        if !validate_domain(domain) {
            return Err(ReconError::InvalidDomain(domain.to_string()));
        }
        if record_types.is_empty() {
            return Err(ReconError::NoValidRecordTypes);
        }

        if self.resolver.is_default() {
            info!(nameserver = %self.resolver.nameserver(), "using default nameserver");
        } else {
            info!(nameserver = %self.resolver.nameserver(), "using nameserver override");
        }

        let mut blocks = Vec::with_capacity(record_types.len());
        for &record_type in record_types {
            debug!(domain, %record_type, "querying");
            let outcome = self.resolver.resolve(domain, record_type).await;
            blocks.push(ResultBlock::new(domain, record_type, outcome));
        }
        Ok(blocks)
    }
}

/// Validate inputs, build a hickory-backed engine and run the queries.
///
/// `nameserver` may be empty (system default), an IP literal or a hostname.
/// `record_types` is expected to be normalized already, see
/// [`RecordType::resolve_list`].
pub async fn query_records(
    domain: &str,
    nameserver: &str,
    record_types: &[RecordType],
    timeout: Duration,
) -> ReconResult<Vec<ResultBlock>> {
    engine_for(domain, nameserver, record_types, timeout)
        .await?
        .query(domain, record_types)
        .await
}

/// Validate inputs and build the engine without querying yet.
///
/// Lets callers report which nameserver is in use before the lookups start.
pub async fn engine_for(
    domain: &str,
    nameserver: &str,
    record_types: &[RecordType],
    timeout: Duration,
) -> ReconResult<RecordQueryEngine<HickoryResolver>> {
    if !validate_domain(domain) {
        return Err(ReconError::InvalidDomain(domain.to_string()));
    }
    if !validate_nameserver(nameserver) {
        return Err(ReconError::InvalidNameserver(nameserver.to_string()));
    }
    if record_types.is_empty() {
        return Err(ReconError::NoValidRecordTypes);
    }

    let resolver = HickoryResolver::for_nameserver(nameserver, timeout).await?;
    Ok(RecordQueryEngine::new(resolver))
}
