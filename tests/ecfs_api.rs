//! ECFS client behaviour against a mock API.

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ecfs_comment::config::Credentials;
use ecfs_comment::ecfs::{EcfsClient, EcfsError, EcfsFiling, Proceeding};
use ecfs_comment::lifecycle::fetch_proceeding;
use ecfs_comment::Backoff;

mod common;

#[tokio::test]
async fn test_lookup_returns_single_record() {
    let server = MockServer::start().await;
    common::mount_proceedings(&server, "17-108", vec![common::proceeding_record("17-108", "110299")])
        .await;

    let proceeding = common::client(&server).proceeding("17-108").await.unwrap();
    assert_eq!(proceeding.name, "17-108");
    assert_eq!(proceeding.id, 110299);
    assert_eq!(proceeding.bureau_name.as_deref(), Some("Wireline Competition Bureau"));
}

#[tokio::test]
async fn test_lookup_wrong_count_is_fatal() {
    let server = MockServer::start().await;
    common::mount_proceedings(&server, "99-999", vec![]).await;
    common::mount_proceedings(
        &server,
        "17",
        vec![
            common::proceeding_record("17-108", "110299"),
            common::proceeding_record("17-109", "110300"),
        ],
    )
    .await;
    let client = common::client(&server);

    let err = client.proceeding("99-999").await.unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::ResultCount { count: 0, .. }));

    let err = client.proceeding("17").await.unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::ResultCount { count: 2, .. }));
}

#[tokio::test]
async fn test_lookup_bad_status_and_body_are_transient() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ecfs/proceedings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ecfs/proceedings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let client = common::client(&server);

    let err = client.proceeding("17-108").await.unwrap_err();
    assert!(!err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::Status { status: 503, .. }));

    let err = client.proceeding("17-108").await.unwrap_err();
    assert!(!err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::Decode { .. }));
}

#[tokio::test]
async fn test_connection_failure_is_transient() {
    // Nothing listens on port 1.
    let client = EcfsClient::new("http://127.0.0.1:1/ecfs/", Credentials::new("key")).unwrap();

    let err = client.proceeding("17-108").await.unwrap_err();
    assert!(!err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::Transport { .. }));
}

#[tokio::test]
async fn test_lookup_retries_through_outage() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ecfs/proceedings"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    common::mount_proceedings(&server, "17-108", vec![common::proceeding_record("17-108", "110299")])
        .await;

    let proceeding = fetch_proceeding(&common::client(&server), "17-108", &common::fast_backoff())
        .await
        .unwrap();
    assert_eq!(proceeding.id, 110299);
}

#[tokio::test]
async fn test_lookup_fatal_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ecfs/proceedings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "proceedings": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let err = fetch_proceeding(&common::client(&server), "17-108", &common::fast_backoff())
        .await
        .unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_submit_sends_stripped_proceedings() {
    let server = MockServer::start().await;
    common::mount_filing_accepted(&server).await;

    let proceeding: Proceeding =
        serde_json::from_value(common::proceeding_record("17-108", "110299")).unwrap();
    let filing = EcfsFiling::build(common::jane_doe(), vec![proceeding.clone()]).unwrap();
    assert_eq!(filing.proceedings, vec![proceeding]);

    let confirmation = common::client(&server).submit(&filing).await.unwrap();
    assert_eq!(confirmation.confirm, "20170518123456789");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );

    let body: Value = requests[0].body_json().unwrap();
    assert_eq!(
        body["proceedings"],
        json!([{
            "name": "17-108",
            "description": "Restoring Internet Freedom",
            "id_proceeding": "110299"
        }])
    );
    assert_eq!(body["filers"], json!([{ "name": "Jane Doe" }]));
    assert_eq!(body["express_comment"], json!(1));
    assert_eq!(body["addressentity"]["zip_code"], json!("62701"));
    assert!(body.get("internationaladdressentity").is_none());
    assert!(body.get("filingstatus").is_none());
}

#[tokio::test]
async fn test_submit_failures_are_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ecfs/filings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ecfs/filings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "confirm": 17 })))
        .mount(&server)
        .await;

    let client = common::client(&server);
    let filing = EcfsFiling::build(common::jane_doe(), vec![Proceeding::new(1, "17-108", "")])
        .unwrap();

    let err = client.submit(&filing).await.unwrap_err();
    assert!(!err.is_fatal());
    assert_eq!(err.to_string(), "response code 500 on filings: internal error");

    let err = client.submit(&filing).await.unwrap_err();
    assert!(!err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::Decode { .. }));
}

#[tokio::test]
async fn test_file_without_proceedings_never_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::confirmation_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = common::client(&server)
        .file(common::jane_doe(), Vec::new())
        .await
        .unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err.cause(), EcfsError::NoProceedings));
}

#[tokio::test]
async fn test_lookup_then_file_end_to_end() {
    let server = MockServer::start().await;
    common::mount_proceedings(&server, "17-108", vec![common::proceeding_record("17-108", "110299")])
        .await;
    common::mount_filing_accepted(&server).await;

    let client = common::client(&server);
    let mut backoff = Backoff::from_config(&common::fast_backoff());

    let proceeding = backoff.run(|| client.proceeding("17-108")).await.unwrap();
    assert_eq!(proceeding.name, "17-108");

    let filing = EcfsFiling::build(common::jane_doe(), vec![proceeding]).unwrap();
    let confirmation = backoff.run(|| client.submit(&filing)).await.unwrap();
    assert!(!confirmation.confirm.is_empty());
    assert_eq!(confirmation.status, "RECEIVED");
}

#[tokio::test]
async fn test_accepted_filing_with_offsetless_receipt_is_not_refiled() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ecfs/filings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "confirm": "20170518123456789",
            "received": "2017-05-18 16:48:00",
            "status": "RECEIVED"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server);
    let filing = EcfsFiling::build(common::jane_doe(), vec![Proceeding::new(1, "17-108", "")])
        .unwrap();
    let mut backoff = Backoff::from_config(&common::fast_backoff());

    let confirmation = backoff.run(|| client.submit(&filing)).await.unwrap();
    assert_eq!(confirmation.confirm, "20170518123456789");
    assert_eq!(
        confirmation.received_at(),
        "2017-05-18T16:48:00+00:00"
    );
}
