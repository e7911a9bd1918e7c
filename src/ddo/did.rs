use super::DdoError;
use crate::types::conversions::address_to_checksum;
use ethers::types::Address;
use sha2::{Digest, Sha256};

pub const DID_PREFIX: &str = "did:op:";

/// DID of the asset whose metadata lives on `nft_address` on `chain_id`.
pub fn did_from_nft(nft_address: Address, chain_id: u64) -> String {
    let seed = format!("{}{}", address_to_checksum(nft_address), chain_id);
    format!("{}{}", DID_PREFIX, hex::encode(Sha256::digest(seed.as_bytes())))
}

/// `did:op:` followed by a 64-char hash, or a 40-char address for
/// documents published before NFT-based identifiers.
pub fn is_valid_did(did: &str) -> bool {
    match did.strip_prefix(DID_PREFIX) {
        Some(id) => {
            let id = id.strip_prefix("0x").unwrap_or(id);
            (id.len() == 64 || id.len() == 40) && id.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Identifier part of a DID.
pub fn did_to_id(did: &str) -> Result<&str, DdoError> {
    if !is_valid_did(did) {
        return Err(DdoError::InvalidDid(did.to_string()));
    }
    Ok(&did[DID_PREFIX.len()..])
}

pub fn id_to_did(id: &str) -> String {
    format!("{}{}", DID_PREFIX, id.strip_prefix("0x").unwrap_or(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn did_derivation_is_deterministic() {
        let nft = Address::from_str("0xbA76f1D4e3FC1C6B2e1F2D9b2cD36D7c9c9C7A01").unwrap();
        let a = did_from_nft(nft, 8996);
        let b = did_from_nft(nft, 8996);
        assert_eq!(a, b);
        assert!(a.starts_with(DID_PREFIX));
        assert_eq!(a.len(), DID_PREFIX.len() + 64);
        assert!(is_valid_did(&a));
        assert_ne!(a, did_from_nft(nft, 1));
    }

    #[test]
    fn did_uses_checksummed_address() {
        let nft = Address::from_str("0x82aF49447D8a07e3bd95BD0d56f35241523fBab1").unwrap();
        let expected = hex::encode(Sha256::digest(
            "0x82aF49447D8a07e3bd95BD0d56f35241523fBab1137".as_bytes(),
        ));
        assert_eq!(did_from_nft(nft, 137), format!("did:op:{}", expected));
    }

    #[test]
    fn validates_did_shape() {
        assert!(!is_valid_did("did:op:0123456789"));
        assert!(!is_valid_did("did:eth:0123"));
        assert!(!is_valid_did(&format!("did:op:{}", "z".repeat(64))));
        assert!(is_valid_did(&format!("did:op:{}", "ab".repeat(20))));
        assert!(is_valid_did(&format!("did:op:0x{}", "ab".repeat(20))));
    }

    #[test]
    fn did_and_id_convert() {
        let id = "cd".repeat(32);
        let did = id_to_did(&id);
        assert_eq!(did_to_id(&did).unwrap(), id);
        assert!(matches!(
            did_to_id("did:op:123"),
            Err(DdoError::InvalidDid(_))
        ));
    }
}
