//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecfs_comment::config::{AppConfig, BackoffConfig, Credentials};
use ecfs_comment::ecfs::{Address, AddressEntity, EcfsClient, FilingInfo};
use ecfs_comment::http::{AppState, HttpServer};
use ecfs_comment::Shutdown;

pub const API_KEY: &str = "test-key";

/// 2, 4, 8, 16 ms fit under the ceiling; 32 does not. Five attempts total.
pub const ATTEMPTS_UNTIL_CEILING: u64 = 5;

pub fn fast_backoff() -> BackoffConfig {
    BackoffConfig {
        factor: 2.0,
        initial_delay_ms: 1,
        max_delay_ms: 20,
        jitter: false,
    }
}

pub fn base_url(server: &MockServer) -> String {
    format!("{}/ecfs/", server.uri())
}

pub fn client(server: &MockServer) -> EcfsClient {
    EcfsClient::new(&base_url(server), Credentials::new(API_KEY)).unwrap()
}

/// Proceeding record as the search API returns it, metadata included.
pub fn proceeding_record(name: &str, id: &str) -> Value {
    json!({
        "name": name,
        "description": "Restoring Internet Freedom",
        "id_proceeding": id,
        "description_display": "Restoring Internet Freedom",
        "_index": "proceedings_1",
        "bureau.code": "WCB",
        "bureau.name": "Wireline Competition Bureau",
        "filed_by": "FCC",
        "applicant_name": "Federal Communications Commission",
        "date_proceeding_created": "2017-05-18T00:00:00.000Z"
    })
}

pub fn confirmation_body() -> Value {
    json!({
        "confirm": "20170518123456789",
        "received": "2017-05-18T16:48:00.000Z",
        "status": "RECEIVED"
    })
}

pub async fn mount_proceedings(server: &MockServer, name: &str, records: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/ecfs/proceedings"))
        .and(query_param("api_key", API_KEY))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "proceedings": records })))
        .mount(server)
        .await;
}

pub async fn mount_filing_accepted(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/ecfs/filings"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmation_body()))
        .mount(server)
        .await;
}

pub fn jane_doe() -> FilingInfo {
    FilingInfo {
        name: "Jane Doe".into(),
        email: "jane@example.com".into(),
        address: AddressEntity::Postal(Address {
            line1: "1 Main St".into(),
            line2: None,
            city: "Springfield".into(),
            state: "IL".into(),
            zip: "62701".into(),
            zip4: String::new(),
        }),
        text: "Keep the internet open.".into(),
    }
}

pub fn test_config(server: &MockServer, static_dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.ecfs.base_url = base_url(server);
    config.backoff = fast_backoff();
    config.web.static_dir = static_dir.display().to_string();
    config
}

/// Serve the app on an ephemeral port until `shutdown` is triggered.
pub async fn start_app(config: AppConfig, state: AppState, shutdown: &Shutdown) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config, state);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    addr
}
