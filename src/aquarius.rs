//! Client for the metadata index (Aquarius HTTP API).
//!
//! The index watches `MetadataCreated` / `MetadataUpdated` events and serves
//! the resulting documents. [`AssetIndex`] is the seam the rest of the SDK
//! talks to; [`AquariusClient`] implements it over HTTP.

use crate::ddo::{is_valid_did, Ddo, DdoError};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_retry::strategy::FixedInterval;
use tokio_retry::RetryIf;
use url::Url;

const ASSETS_PATH: &str = "/api/aquarius/assets";

#[derive(Debug, thiserror::Error)]
pub enum AquariusError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("index returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid index URL: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Ddo(#[from] DdoError),
    #[error("invalid DID: {0}")]
    InvalidDid(String),
    #[error("DID not found in the index: {0}")]
    DidNotFound(String),
    #[error("{did} not indexed after {waited:?}")]
    Timeout { did: String, waited: Duration },
}

/// Result of the index's document validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// Document accepted; `hash` is the index's hash of it
    Valid { hash: String, proof: Option<Value> },
    /// Validation messages keyed by field
    Invalid(Value),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid { .. })
    }
}

/// Read/search access to indexed asset documents.
#[async_trait]
pub trait AssetIndex: Send + Sync {
    /// Indexed document for `did`, `None` when the index does not know it.
    async fn get_ddo(&self, did: &str) -> Result<Option<Ddo>, AquariusError>;

    /// Runs an Elasticsearch query and returns the matching documents.
    async fn query(&self, query: &Value) -> Result<Vec<Ddo>, AquariusError>;

    async fn validate(&self, ddo: &Ddo) -> Result<ValidationOutcome, AquariusError>;

    async fn is_alive(&self) -> bool;

    async fn resolve(&self, did: &str) -> Result<Ddo, AquariusError> {
        if !is_valid_did(did) {
            return Err(AquariusError::InvalidDid(did.to_string()));
        }
        self.get_ddo(did)
            .await?
            .ok_or_else(|| AquariusError::DidNotFound(did.to_string()))
    }

    async fn text_search(&self, text: &str, size: usize) -> Result<Vec<Ddo>, AquariusError> {
        self.query(&text_query(text, size)).await
    }

    async fn assets_by_owner(&self, owner: &str, size: usize) -> Result<Vec<Ddo>, AquariusError> {
        self.query(&owner_query(owner, size)).await
    }

    /// Polls until `did` is indexed, and when `tx` is given, until the
    /// indexed document comes from that transaction. Lookup errors end the
    /// wait immediately.
    async fn wait_for_ddo(
        &self,
        did: &str,
        tx: Option<&str>,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Ddo, AquariusError> {
        let poll_ms = poll_interval.as_millis().max(1) as u64;
        let attempts = (timeout.as_millis() as u64 / poll_ms) as usize;
        let strategy = FixedInterval::from_millis(poll_ms).take(attempts);

        let outcome = RetryIf::spawn(
            strategy,
            move || async move {
                match self.get_ddo(did).await {
                    Ok(Some(ddo)) if indexed_from(&ddo, tx) => Ok(ddo),
                    Ok(_) => {
                        debug!("{} not indexed yet", did);
                        Err(None)
                    }
                    Err(e) => Err(Some(e)),
                }
            },
            |pending: &Option<AquariusError>| pending.is_none(),
        )
        .await;

        match outcome {
            Ok(ddo) => Ok(ddo),
            Err(Some(e)) => {
                warn!("⚠️ Index lookup for {} failed: {}", did, e);
                Err(e)
            }
            Err(None) => Err(AquariusError::Timeout {
                did: did.to_string(),
                waited: timeout,
            }),
        }
    }
}

fn indexed_from(ddo: &Ddo, tx: Option<&str>) -> bool {
    match tx {
        None => true,
        Some(expected) => ddo
            .event
            .as_ref()
            .map(|e| e.tx.eq_ignore_ascii_case(expected))
            .unwrap_or(false),
    }
}

pub fn text_query(text: &str, size: usize) -> Value {
    json!({
        "query": { "query_string": { "query": text } },
        "size": size,
    })
}

pub fn owner_query(owner: &str, size: usize) -> Value {
    json!({
        "query": { "match": { "nft.owner": owner } },
        "size": size,
    })
}

/// HTTP client for an Aquarius instance.
#[derive(Debug, Clone)]
pub struct AquariusClient {
    base_url: String,
    client: reqwest::Client,
}

impl AquariusClient {
    /// `url` may be the service root or any URL under `/api/aquarius/assets`.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, AquariusError> {
        let root = match url.find(ASSETS_PATH) {
            Some(idx) => &url[..idx],
            None => url,
        };
        let parsed = Url::parse(root)?;
        let base_url = parsed.as_str().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!("📚 Metadata index at {}", base_url);
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn ddo_url(&self, did: &str) -> String {
        format!("{}{}/ddo/{}", self.base_url, ASSETS_PATH, did)
    }

    fn query_url(&self) -> String {
        format!("{}{}/query", self.base_url, ASSETS_PATH)
    }

    fn validate_url(&self) -> String {
        format!("{}{}/ddo/validate", self.base_url, ASSETS_PATH)
    }
}

async fn error_for_status(response: reqwest::Response) -> AquariusError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AquariusError::Status { status, body }
}

#[async_trait]
impl AssetIndex for AquariusClient {
    async fn get_ddo(&self, did: &str) -> Result<Option<Ddo>, AquariusError> {
        let response = self.client.get(self.ddo_url(did)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => {
                let value: Value = response.json().await?;
                Ok(Some(Ddo::from_json_value(value)?))
            }
            _ => Err(error_for_status(response).await),
        }
    }

    async fn query(&self, query: &Value) -> Result<Vec<Ddo>, AquariusError> {
        let response = self.client.post(self.query_url()).json(query).send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }
        let body: Value = response.json().await?;
        let hits = body["hits"]["hits"].as_array().cloned().unwrap_or_default();

        let mut assets = Vec::with_capacity(hits.len());
        for hit in hits {
            match Ddo::from_json_value(hit["_source"].clone()) {
                Ok(ddo) => assets.push(ddo),
                Err(e) => warn!("⚠️ Skipping unparseable search hit: {}", e),
            }
        }
        debug!("Query returned {} assets", assets.len());
        Ok(assets)
    }

    async fn validate(&self, ddo: &Ddo) -> Result<ValidationOutcome, AquariusError> {
        let body = ddo.to_json_string()?;
        let response = self
            .client
            .post(self.validate_url())
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let value: Value = response.json().await?;
                Ok(ValidationOutcome::Valid {
                    hash: value["hash"].as_str().unwrap_or_default().to_string(),
                    proof: value.get("proof").cloned(),
                })
            }
            StatusCode::BAD_REQUEST => {
                let errors: Value = response.json().await?;
                Ok(ValidationOutcome::Invalid(errors))
            }
            _ => Err(error_for_status(response).await),
        }
    }

    async fn is_alive(&self) -> bool {
        match self.client.get(&self.base_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("⚠️ Metadata index unreachable: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_api_path_from_url() {
        let client = AquariusClient::new(
            "http://localhost:5000/api/aquarius/assets/ddo",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(
            client.ddo_url("did:op:abc"),
            "http://localhost:5000/api/aquarius/assets/ddo/did:op:abc"
        );
    }

    #[test]
    fn rejects_malformed_url() {
        assert!(matches!(
            AquariusClient::new("not a url", Duration::from_secs(5)),
            Err(AquariusError::Url(_))
        ));
    }

    #[test]
    fn queries_carry_size() {
        assert_eq!(text_query("Monkey", 10)["size"], 10);
        assert_eq!(
            owner_query("0xabc", 5)["query"]["match"]["nft.owner"],
            "0xabc"
        );
    }
}
