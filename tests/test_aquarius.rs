//! Integration tests for the metadata index client against a mock HTTP server

use mockito::{Matcher, Server};
use ocean_sdk::aquarius::{AquariusClient, AquariusError, AssetIndex, ValidationOutcome};
use ocean_sdk::ddo::Ddo;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;

fn sample_json() -> Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/ddo/ddo_v4_sample.json");
    let text = std::fs::read_to_string(path).expect("Failed to read DDO fixture");
    serde_json::from_str(&text).unwrap()
}

fn sample_did() -> String {
    sample_json()["id"].as_str().unwrap().to_string()
}

fn client(server: &Server) -> AquariusClient {
    AquariusClient::new(&server.url(), Duration::from_secs(5)).expect("Failed to build client")
}

/// Test that an indexed document is fetched and parsed
#[tokio::test]
async fn test_get_ddo_found() {
    let mut server = Server::new_async().await;
    let did = sample_did();
    let mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(sample_json().to_string())
        .create_async()
        .await;

    let ddo = client(&server).get_ddo(&did).await.unwrap().expect("DDO should exist");
    assert_eq!(ddo.id, did);
    assert_eq!(ddo.metadata.name, "Sample asset");
    mock.assert_async().await;
}

/// Test that 404 maps to `None` and `resolve` reports it as not found
#[tokio::test]
async fn test_get_ddo_missing() {
    let mut server = Server::new_async().await;
    let did = format!("did:op:{}", "ab".repeat(32));
    let _mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(404)
        .expect(2)
        .create_async()
        .await;

    let aquarius = client(&server);
    assert!(aquarius.get_ddo(&did).await.unwrap().is_none());
    assert!(matches!(
        aquarius.resolve(&did).await,
        Err(AquariusError::DidNotFound(_))
    ));
}

/// Test that malformed DIDs are rejected before any request
#[tokio::test]
async fn test_resolve_invalid_did() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = client(&server).resolve("did:op:0123456789").await;
    assert!(matches!(result, Err(AquariusError::InvalidDid(_))));
    mock.assert_async().await;
}

/// Test that server errors carry status and body
#[tokio::test]
async fn test_server_error_is_reported() {
    let mut server = Server::new_async().await;
    let did = sample_did();
    let _mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    match client(&server).get_ddo(&did).await {
        Err(AquariusError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

/// Test that search hits are read from `hits.hits[]._source`
#[tokio::test]
async fn test_text_search() {
    let mut server = Server::new_async().await;
    let body = json!({
        "hits": {
            "total": 2,
            "hits": [
                { "_id": "1", "_source": sample_json() },
                { "_id": "2", "_source": { "broken": true } }
            ]
        }
    });
    let mock = server
        .mock("POST", "/api/aquarius/assets/query")
        .match_body(Matcher::PartialJson(json!({
            "query": { "query_string": { "query": "Monkey" } }
        })))
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let assets = client(&server).text_search("Monkey", 10).await.unwrap();
    assert_eq!(assets.len(), 1, "Unparseable hits should be skipped");
    assert_eq!(assets[0].metadata.tags, vec!["weather", "monkey"]);
    mock.assert_async().await;
}

/// Test that owner queries match on the NFT owner
#[tokio::test]
async fn test_assets_by_owner() {
    let mut server = Server::new_async().await;
    let owner = "0xBE5449a6A97aD46c8558A3356267Ee5D2731ab5e";
    let mock = server
        .mock("POST", "/api/aquarius/assets/query")
        .match_body(Matcher::PartialJson(json!({
            "query": { "match": { "nft.owner": owner } }
        })))
        .with_status(200)
        .with_body(json!({ "hits": { "hits": [] } }).to_string())
        .create_async()
        .await;

    let assets = client(&server).assets_by_owner(owner, 100).await.unwrap();
    assert!(assets.is_empty());
    mock.assert_async().await;
}

/// Test both validation outcomes
#[tokio::test]
async fn test_validate() {
    let ddo = Ddo::from_json_value(sample_json()).unwrap();

    let mut server = Server::new_async().await;
    let valid = server
        .mock("POST", "/api/aquarius/assets/ddo/validate")
        .with_status(200)
        .with_body(json!({ "hash": "0xabc", "proof": { "validatorAddress": "0x1" } }).to_string())
        .create_async()
        .await;

    let outcome = client(&server).validate(&ddo).await.unwrap();
    assert!(outcome.is_valid());
    assert!(matches!(outcome, ValidationOutcome::Valid { ref hash, .. } if hash == "0xabc"));
    valid.assert_async().await;

    let mut server = Server::new_async().await;
    let _invalid = server
        .mock("POST", "/api/aquarius/assets/ddo/validate")
        .with_status(400)
        .with_body(json!({ "metadata": ["name is required"] }).to_string())
        .create_async()
        .await;

    match client(&server).validate(&ddo).await.unwrap() {
        ValidationOutcome::Invalid(errors) => {
            assert_eq!(errors["metadata"][0], "name is required");
        }
        other => panic!("expected invalid outcome, got {:?}", other),
    }
}

/// Test waiting for a document from a specific transaction
#[tokio::test]
async fn test_wait_for_ddo_matches_tx() {
    let mut server = Server::new_async().await;
    let did = sample_did();
    let tx = sample_json()["event"]["tx"].as_str().unwrap().to_uppercase().replace("0X", "0x");
    let _mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(200)
        .with_body(sample_json().to_string())
        .create_async()
        .await;

    let ddo = client(&server)
        .wait_for_ddo(&did, Some(&tx), Duration::from_secs(2), Duration::from_millis(50))
        .await
        .unwrap();
    assert_eq!(ddo.id, did);
}

/// Test that waiting gives up after the timeout
#[tokio::test]
async fn test_wait_for_ddo_times_out() {
    let mut server = Server::new_async().await;
    let did = sample_did();
    let _mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(200)
        .with_body(sample_json().to_string())
        .create_async()
        .await;

    // Indexed, but from another transaction
    let other_tx = format!("0x{}", "11".repeat(32));
    let result = client(&server)
        .wait_for_ddo(&did, Some(&other_tx), Duration::from_millis(200), Duration::from_millis(50))
        .await;
    match result {
        Err(AquariusError::Timeout { did: waited_for, waited }) => {
            assert_eq!(waited_for, did);
            assert_eq!(waited, Duration::from_millis(200));
        }
        other => panic!("expected timeout, got {:?}", other),
    }
}

/// Test that sub-second timeouts are reported as such
#[test]
fn test_timeout_message_keeps_millis() {
    let err = AquariusError::Timeout {
        did: "did:op:abc".to_string(),
        waited: Duration::from_millis(300),
    };
    assert_eq!(err.to_string(), "did:op:abc not indexed after 300ms");
}

/// Test that a failing index ends the wait with its own error
#[tokio::test]
async fn test_wait_for_ddo_surfaces_server_error() {
    let mut server = Server::new_async().await;
    let did = sample_did();
    let mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(500)
        .with_body("index db down")
        .expect(1)
        .create_async()
        .await;

    let result = client(&server)
        .wait_for_ddo(&did, None, Duration::from_millis(300), Duration::from_millis(50))
        .await;
    match result {
        Err(AquariusError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "index db down");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    mock.assert_async().await;
}

/// Test that an unparseable indexed document ends the wait
#[tokio::test]
async fn test_wait_for_ddo_surfaces_bad_document() {
    let mut server = Server::new_async().await;
    let did = sample_did();
    let _mock = server
        .mock("GET", format!("/api/aquarius/assets/ddo/{}", did).as_str())
        .with_status(200)
        .with_body(json!({ "id": 5 }).to_string())
        .create_async()
        .await;

    let result = client(&server)
        .wait_for_ddo(&did, None, Duration::from_millis(300), Duration::from_millis(50))
        .await;
    assert!(matches!(result, Err(AquariusError::Ddo(_))));
}

/// Test the liveness check
#[tokio::test]
async fn test_is_alive() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body(json!({ "software": "Aquarius" }).to_string())
        .create_async()
        .await;
    assert!(client(&server).is_alive().await);

    let dead = AquariusClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
    assert!(!dead.is_alive().await);
}
