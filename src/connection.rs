//! JSON-RPC connection setup.
//!
//! Only explicit `http(s)` endpoints are accepted; resolving network names
//! or hosted-gateway URLs is left to the caller.

use crate::settings::Settings;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Provider};
use ethers::signers::{LocalWallet, Signer};
use log::info;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub type HttpClient = Provider<Http>;
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("invalid RPC URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid private key: {0}")]
    InvalidKey(String),
}

pub fn connect(url: &str, poll_interval: Duration) -> Result<HttpClient, ConnectionError> {
    let parsed = Url::parse(url).map_err(|e| ConnectionError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ConnectionError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }

    let provider = Provider::new(Http::new(parsed)).interval(poll_interval);
    info!("🔗 Connected to {}", url);
    Ok(provider)
}

pub fn connect_with_settings(settings: &Settings) -> Result<HttpClient, ConnectionError> {
    connect(
        &settings.network.rpc_url,
        Duration::from_millis(settings.network.poll_interval_ms),
    )
}

/// Wraps `provider` so transactions are signed locally with `private_key`.
pub fn with_signer(
    provider: HttpClient,
    private_key: &str,
    chain_id: u64,
) -> Result<Arc<SignerClient>, ConnectionError> {
    let key = private_key.trim().trim_start_matches("0x");
    let wallet: LocalWallet = key
        .parse()
        .map_err(|e: ethers::signers::WalletError| ConnectionError::InvalidKey(e.to_string()))?;
    let wallet = wallet.with_chain_id(chain_id);
    info!("🔑 Signing as {:?}", wallet.address());
    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_urls_only() {
        assert!(connect("http://127.0.0.1:8545", Duration::from_millis(100)).is_ok());
        assert!(connect("https://rpc.example.org", Duration::from_millis(100)).is_ok());
        assert!(matches!(
            connect("wss://rpc.example.org", Duration::from_millis(100)),
            Err(ConnectionError::InvalidUrl { .. })
        ));
        assert!(matches!(
            connect("mainnet", Duration::from_millis(100)),
            Err(ConnectionError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn signer_uses_chain_id() {
        let provider = connect("http://127.0.0.1:8545", Duration::from_millis(100)).unwrap();
        // well-known development key
        let client = with_signer(
            provider,
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
            8996,
        )
        .unwrap();
        assert_eq!(client.signer().chain_id(), 8996);
        assert_eq!(
            format!("{:?}", client.address()),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn rejects_bad_key() {
        let provider = connect("http://127.0.0.1:8545", Duration::from_millis(100)).unwrap();
        assert!(matches!(
            with_signer(provider, "0x1234", 1),
            Err(ConnectionError::InvalidKey(_))
        ));
    }
}
