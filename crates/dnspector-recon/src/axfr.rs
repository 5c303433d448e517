//! Zone transfer (AXFR) probing.
//!
//! A refused transfer is what a correctly configured server returns, so every
//! outcome is reported as a [`ZoneTransfer`] value rather than an error.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use dnspector_core::{validate_domain, validate_nameserver, QueryOutcome, RecordData, RecordType, ZoneTransfer};
use hickory_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_resolver::proto::rr::{Name, Record, RecordType as WireType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::dns::{resolve_host, HickoryResolver, RecordResolver};
use crate::error::{ReconError, ReconResult};

/// Maximum number of records accepted from a single transfer
pub const MAX_ZONE_RECORDS: usize = 100_000;

/// Attempt a zone transfer of `domain` from `nameserver` (IP or hostname).
///
/// Resolving a hostname nameserver and the transfer itself are each bounded
/// by `timeout`.
pub async fn probe_axfr(domain: &str, nameserver: &str, timeout: Duration) -> ZoneTransfer {
    if !validate_domain(domain) {
        return ZoneTransfer::failure(nameserver, ReconError::InvalidDomain(domain.to_string()).to_string());
    }
    if nameserver.is_empty() || !validate_nameserver(nameserver) {
        return ZoneTransfer::failure(
            nameserver,
            ReconError::InvalidNameserver(nameserver.to_string()).to_string(),
        );
    }

    let addr = match resolve_host(nameserver, timeout).await {
        Ok(ip) => SocketAddr::new(ip, 53),
        Err(e) => return ZoneTransfer::failure(nameserver, e.to_string()),
    };
    probe_addr(domain, addr, nameserver, timeout).await
}

/// Attempt a zone transfer against an explicit socket address.
///
/// `label` is the name reported back in the result.
pub async fn probe_addr(domain: &str, addr: SocketAddr, label: &str, timeout: Duration) -> ZoneTransfer {
    debug!(domain, %addr, "requesting AXFR");

    let outcome = match tokio::time::timeout(timeout, transfer(domain, addr)).await {
        Ok(result) => result,
        Err(_) => Err(ReconError::Transfer(format!(
            "Zone transfer timed out after {}s",
            timeout.as_secs_f32()
        ))),
    };

    match outcome {
        Ok(records) => {
            info!(domain, nameserver = label, records = records.len(), "zone transfer succeeded");
            let count = records.len();
            ZoneTransfer::success(label, render_zone(&records), count)
        }
        Err(e) => {
            debug!(domain, nameserver = label, error = %e, "zone transfer failed");
            ZoneTransfer::failure(label, e.to_string())
        }
    }
}

/// Probe every authoritative server for `domain`.
///
/// With a non-empty `nameserver` only that server is asked. Otherwise the
/// NS records of `domain` are looked up first and each one is probed in turn.
pub async fn probe_zone(domain: &str, nameserver: &str, timeout: Duration) -> Vec<ZoneTransfer> {
    if !nameserver.is_empty() {
        return vec![probe_axfr(domain, nameserver, timeout).await];
    }
    if !validate_domain(domain) {
        return vec![ZoneTransfer::failure(
            "-",
            ReconError::InvalidDomain(domain.to_string()).to_string(),
        )];
    }

    let servers = match HickoryResolver::system(timeout).resolve(domain, RecordType::Ns).await {
        QueryOutcome::Records(records) => records
            .into_iter()
            .filter_map(|r| match r {
                RecordData::Target(name) => Some(name),
                _ => None,
            })
            .collect::<Vec<_>>(),
        other => {
            warn!(domain, outcome = ?other, "NS lookup failed");
            Vec::new()
        }
    };

    if servers.is_empty() {
        return vec![ZoneTransfer::failure("-", "No authoritative nameservers found")];
    }

    let mut results = Vec::with_capacity(servers.len());
    for server in servers {
        results.push(probe_axfr(domain, &server, timeout).await);
    }
    results
}

fn axfr_request(domain: &str, id: u16) -> ReconResult<Vec<u8>> {
    let zone = Name::from_ascii(format!("{domain}.")).map_err(|e| ReconError::Transfer(e.to_string()))?;

    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .add_query(Query::query(zone, WireType::AXFR));

    message
        .to_vec()
        .map_err(|e| ReconError::Transfer(format!("failed to encode AXFR query: {e}")))
}

async fn transfer(domain: &str, addr: SocketAddr) -> ReconResult<Vec<Record>> {
    let id = rand::random::<u16>();
    let request = axfr_request(domain, id)?;
    let mut stream = TcpStream::connect(addr).await?;

    let len = u16::try_from(request.len())
        .map_err(|_| ReconError::Transfer("AXFR query too large".into()))?;
    stream.write_all(&len.to_be_bytes()).await?;
    stream.write_all(&request).await?;
    stream.flush().await?;

    let mut records = Vec::new();
    let mut soa_seen = 0;

    loop {
        let mut len_bytes = [0u8; 2];
        match stream.read_exact(&mut len_bytes).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(ReconError::Transfer(
                    "Zone transfer failed: connection closed before the closing SOA".into(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        let mut buf = vec![0u8; usize::from(u16::from_be_bytes(len_bytes))];
        stream.read_exact(&mut buf).await?;

        let response = Message::from_vec(&buf)
            .map_err(|e| ReconError::Transfer(format!("Zone transfer failed: malformed response: {e}")))?;
        if response.id() != id {
            return Err(ReconError::Transfer(format!(
                "Zone transfer failed: response id {} does not match query id {id}",
                response.id()
            )));
        }

        let rcode = response.response_code();
        if rcode != ResponseCode::NoError {
            return Err(ReconError::Transfer(refusal(rcode)));
        }
        if response.answers().is_empty() && records.is_empty() {
            return Err(ReconError::Transfer("Zone transfer failed: empty response".into()));
        }

        for record in response.answers() {
            if record.record_type() == WireType::SOA {
                soa_seen += 1;
                // The closing SOA repeats the opening one.
                if soa_seen == 2 {
                    return Ok(records);
                }
            } else if soa_seen == 0 {
                return Err(ReconError::Transfer(
                    "Zone transfer failed: stream does not start with SOA".into(),
                ));
            }

            records.push(record.clone());
            if records.len() > MAX_ZONE_RECORDS {
                return Err(ReconError::Transfer(format!(
                    "Zone transfer failed: more than {MAX_ZONE_RECORDS} records"
                )));
            }
        }
    }
}

fn refusal(rcode: ResponseCode) -> String {
    match rcode {
        ResponseCode::Refused => "Zone transfer refused (REFUSED)".into(),
        ResponseCode::NotAuth => "Zone transfer refused (NOTAUTH)".into(),
        ResponseCode::NXDomain => "Zone transfer failed: zone does not exist (NXDOMAIN)".into(),
        ResponseCode::ServFail => "Zone transfer failed: server failure (SERVFAIL)".into(),
        other => format!("Zone transfer failed ({other})"),
    }
}

/// Render records grouped by owner name, owners in first-appearance order
fn render_zone(records: &[Record]) -> String {
    let mut index: HashMap<&Name, usize> = HashMap::new();
    let mut groups: Vec<Vec<String>> = Vec::new();
    for record in records {
        let slot = *index.entry(record.name()).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record.to_string());
    }

    groups.concat().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::rr::rdata::{A, SOA};
    use hickory_resolver::proto::rr::RData;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    fn name(s: &str) -> Name {
        Name::from_ascii(s).unwrap()
    }

    fn soa() -> Record {
        Record::from_rdata(
            name("example.com."),
            3600,
            RData::SOA(SOA::new(
                name("ns1.example.com."),
                name("hostmaster.example.com."),
                1,
                3600,
                600,
                86400,
                300,
            )),
        )
    }

    fn a(owner: &str, last: u8) -> Record {
        Record::from_rdata(name(owner), 300, RData::A(A(Ipv4Addr::new(192, 0, 2, last))))
    }

    /// Serve a single AXFR request with the given rcode and answer batches
    async fn responder(rcode: ResponseCode, batches: Vec<Vec<Record>>) -> SocketAddr {
        responder_with_id_shift(rcode, batches, 0).await
    }

    /// Like [`responder`], but answer with the request id plus `shift`
    async fn responder_with_id_shift(rcode: ResponseCode, batches: Vec<Vec<Record>>, shift: u16) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut len = [0u8; 2];
            socket.read_exact(&mut len).await.unwrap();
            let mut buf = vec![0u8; usize::from(u16::from_be_bytes(len))];
            socket.read_exact(&mut buf).await.unwrap();
            let request = Message::from_vec(&buf).unwrap();
            assert_eq!(request.queries()[0].query_type(), WireType::AXFR);

            for batch in batches {
                let mut response = Message::new();
                response
                    .set_id(request.id().wrapping_add(shift))
                    .set_message_type(MessageType::Response)
                    .set_op_code(OpCode::Query)
                    .set_response_code(rcode)
                    .add_queries(request.queries().to_vec())
                    .add_answers(batch);
                let bytes = response.to_vec().unwrap();
                socket
                    .write_all(&u16::try_from(bytes.len()).unwrap().to_be_bytes())
                    .await
                    .unwrap();
                socket.write_all(&bytes).await.unwrap();
            }
        });

        addr
    }

    #[tokio::test]
    async fn refused_transfer_is_reported_as_data() {
        let addr = responder(ResponseCode::Refused, vec![vec![]]).await;

        let result = probe_addr("example.com", addr, "ns1.example.com", Duration::from_secs(2)).await;

        assert!(!result.ok);
        assert_eq!(result.nameserver, "ns1.example.com");
        assert!(result.detail.contains("REFUSED"), "{}", result.detail);
    }

    #[tokio::test]
    async fn open_transfer_returns_zone_grouped_by_owner() {
        let addr = responder(
            ResponseCode::NoError,
            vec![
                vec![soa(), a("www.example.com.", 1), a("mail.example.com.", 2)],
                vec![a("www.example.com.", 3), soa()],
            ],
        )
        .await;

        let result = probe_addr("example.com", addr, "127.0.0.1", Duration::from_secs(2)).await;

        assert!(result.ok, "{}", result.detail);
        assert_eq!(result.records, 4);
        let lines: Vec<&str> = result.detail.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("example.com."));
        assert!(lines[1].contains("192.0.2.1"));
        assert!(lines[2].contains("192.0.2.3"));
        assert!(lines[3].starts_with("mail.example.com."));
    }

    #[tokio::test]
    async fn response_with_foreign_id_is_rejected() {
        let addr = responder_with_id_shift(
            ResponseCode::NoError,
            vec![vec![soa(), a("www.example.com.", 1), soa()]],
            1,
        )
        .await;

        let result = probe_addr("example.com", addr, "127.0.0.1", Duration::from_secs(2)).await;

        assert!(!result.ok);
        assert!(result.detail.contains("does not match query id"), "{}", result.detail);
    }

    #[test]
    fn large_zone_renders_in_linear_time() {
        let mut records = vec![soa()];
        for i in 0..60_000u32 {
            let [_, _, hi, lo] = i.to_be_bytes();
            records.push(Record::from_rdata(
                name(&format!("host{i}.example.com.")),
                300,
                RData::A(A(Ipv4Addr::new(10, 0, hi, lo))),
            ));
        }
        records.push(a("host0.example.com.", 7));

        let started = std::time::Instant::now();
        let text = render_zone(&records);
        let elapsed = started.elapsed();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), records.len());
        assert!(lines[0].starts_with("example.com."));
        assert!(lines[1].starts_with("host0.example.com."));
        assert!(lines[2].contains("192.0.2.7"));
        assert!(lines[3].starts_with("host1.example.com."));
        assert!(lines[lines.len() - 1].starts_with("host59999.example.com."));
        assert!(elapsed < Duration::from_secs(10), "rendering took {elapsed:?}");
    }

    #[tokio::test]
    async fn truncated_stream_fails() {
        let addr = responder(ResponseCode::NoError, vec![vec![soa(), a("www.example.com.", 1)]]).await;

        let result = probe_addr("example.com", addr, "127.0.0.1", Duration::from_secs(2)).await;

        assert!(!result.ok);
        assert!(result.detail.contains("closing SOA"), "{}", result.detail);
    }

    #[tokio::test]
    async fn unreachable_server_fails() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();

        let result = probe_addr("example.com", addr, "127.0.0.1", Duration::from_secs(2)).await;

        assert!(!result.ok);
    }

    #[tokio::test]
    async fn invalid_inputs_fail_without_network() {
        let result = probe_axfr("not a domain", "127.0.0.1", Duration::from_secs(1)).await;
        assert!(!result.ok);
        assert!(result.detail.starts_with("Invalid domain name"));

        let result = probe_axfr("example.com", "1.2.3.4;rm", Duration::from_secs(1)).await;
        assert!(!result.ok);
        assert!(result.detail.starts_with("Invalid nameserver"));
    }
}
