use std::time::{Duration, Instant};

use dnspector_client::PassiveClient;
use dnspector_core::SourceDescriptor;
use dnspector_recon::{EnumerationProgress, SubdomainAggregator};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn source(server: &MockServer, route: &str, status: u16, body: &str, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

fn table(server: &MockServer, routes: &[&str]) -> Vec<SourceDescriptor> {
    routes
        .iter()
        .map(|r| SourceDescriptor::new(*r, format!("{}/{r}/{{domain}}", server.uri())))
        .collect()
}

fn client() -> PassiveClient {
    PassiveClient::builder().timeout(Duration::from_secs(2)).build()
}

#[tokio::test]
async fn unions_all_sources() {
    let server = MockServer::start().await;
    source(&server, "/a/example.com", 200, "www.example.com api.example.com", 0).await;
    source(&server, "/b/example.com", 200, "{\"hostname\":\"api.example.com\"} mail.example.com", 0).await;
    source(&server, "/c/example.com", 200, "nothing relevant here", 0).await;

    let aggregator = SubdomainAggregator::new(client(), table(&server, &["a", "b", "c"]));
    let found = aggregator.enumerate("example.com").await.unwrap();

    assert_eq!(
        found.into_iter().collect::<Vec<_>>(),
        vec!["api.example.com", "mail.example.com", "www.example.com"]
    );
}

#[tokio::test]
async fn failing_source_does_not_affect_others() {
    let server = MockServer::start().await;
    source(&server, "/ok/example.com", 200, "www.example.com", 0).await;
    source(&server, "/down/example.com", 503, "unavailable", 0).await;

    let aggregator = SubdomainAggregator::new(client(), table(&server, &["ok", "down"]));
    let run = aggregator
        .enumerate_with_progress("example.com", |_| {})
        .await
        .unwrap();

    assert_eq!(run.subdomains.len(), 1);
    assert!(run.subdomains.contains("www.example.com"));

    let down = run.sources.iter().find(|s| s.source == "down").unwrap();
    assert_eq!(down.found, 0);
    assert!(down.error.is_some());
    let ok = run.sources.iter().find(|s| s.source == "ok").unwrap();
    assert_eq!(ok.found, 1);
    assert!(ok.error.is_none());
}

#[tokio::test]
async fn all_sources_failing_yields_empty_set_and_five_notifications() {
    let server = MockServer::start().await;
    let routes = ["one", "two", "three", "four", "five"];
    for r in routes {
        source(&server, &format!("/{r}/example.com"), 500, "boom", 0).await;
    }

    let aggregator = SubdomainAggregator::new(client(), table(&server, &routes));
    let mut events: Vec<EnumerationProgress> = Vec::new();
    let run = aggregator
        .enumerate_with_progress("example.com", |p| events.push(p.clone()))
        .await
        .unwrap();

    assert!(run.subdomains.is_empty());
    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.error.is_some() && e.total == 5));
    assert_eq!(events.last().unwrap().completed, 5);
}

#[tokio::test]
async fn all_sources_timing_out_finishes_within_the_client_timeout() {
    let server = MockServer::start().await;
    let routes = ["one", "two", "three", "four", "five"];
    for r in routes {
        source(&server, &format!("/{r}/example.com"), 200, "late.example.com", 5_000).await;
    }

    let client = PassiveClient::builder().timeout(Duration::from_millis(250)).build();
    let aggregator = SubdomainAggregator::new(client, table(&server, &routes));
    let mut events: Vec<EnumerationProgress> = Vec::new();
    let started = Instant::now();
    let run = aggregator
        .enumerate_with_progress("example.com", |p| events.push(p.clone()))
        .await
        .unwrap();
    let elapsed = started.elapsed();

    assert!(run.subdomains.is_empty());
    assert_eq!(events.len(), 5);
    assert!(events.iter().all(|e| e.found == 0 && e.error.is_some()));
    assert!(run.sources.iter().all(|s| s.error.as_deref().is_some_and(|e| e.contains("timed out"))));
    // Sources are fetched concurrently, so the run takes about one timeout.
    assert!(elapsed < Duration::from_secs(3), "took {elapsed:?}");
}

#[tokio::test]
async fn result_does_not_depend_on_latency() {
    let server = MockServer::start().await;
    source(&server, "/slow/example.com", 200, "slow.example.com shared.example.com", 300).await;
    source(&server, "/fast/example.com", 200, "fast.example.com shared.example.com", 0).await;

    let aggregator = SubdomainAggregator::new(client(), table(&server, &["slow", "fast"]));
    let mut order = Vec::new();
    let run = aggregator
        .enumerate_with_progress("example.com", |p| order.push(p.source.clone()))
        .await
        .unwrap();

    assert_eq!(order, vec!["fast", "slow"]);
    assert_eq!(
        run.subdomains.into_iter().collect::<Vec<_>>(),
        vec!["fast.example.com", "shared.example.com", "slow.example.com"]
    );
}

#[tokio::test]
async fn invalid_domain_is_rejected_before_fetching() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let aggregator = SubdomainAggregator::new(client(), table(&server, &["a"]));
    assert!(aggregator.enumerate("bad domain!").await.is_err());
}
