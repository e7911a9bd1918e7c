//! Integration tests for the DDO model and credential checks
//!
//! Documents are loaded from `tests/resources/ddo`.

use ocean_sdk::ddo::{
    checksum, service_types, ConsumableCode, Credential, CredentialError, Ddo,
};
use std::path::PathBuf;

fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources/ddo")
        .join(name)
}

fn load(name: &str) -> Ddo {
    Ddo::from_file(resource(name)).expect("Failed to load DDO fixture")
}

/// Test that a sample document parses and survives a write/read cycle
#[test]
fn test_ddo_parses_and_round_trips() {
    let ddo = load("ddo_v4_sample.json");

    assert_eq!(ddo.chain_id, 8996);
    assert_eq!(ddo.metadata.name, "Sample asset");
    assert_eq!(ddo.metadata.asset_type, "dataset");
    assert_eq!(ddo.services.len(), 2);
    assert_eq!(ddo.nft.as_ref().map(|n| n.symbol.as_str()), Some("NFTSYMBOL"));
    assert_eq!(ddo.datatokens[0].service_id, "1");
    assert!(ddo.extra.contains_key("stats"), "Unknown fields should be kept");

    let text = ddo.to_json_string().unwrap();
    let again = Ddo::from_json_str(&text).unwrap();
    assert_eq!(ddo, again);
    assert!(text.contains("\"tokenURI\""));
    assert!(text.contains("\"@context\""));
}

/// Test that the checksum does not depend on key order
#[test]
fn test_checksum_is_canonical() {
    let a = serde_json::json!({ "b": 1, "a": { "y": [1, 2], "x": "s" } });
    let b: serde_json::Value =
        serde_json::from_str(r#"{"a":{"x":"s","y":[1,2]},"b":1}"#).unwrap();
    assert_eq!(checksum(&a).unwrap(), checksum(&b).unwrap());
    assert_eq!(checksum(&a).unwrap().len(), 64);

    let ddo = load("ddo_v4_sample.json");
    let mut changed = ddo.clone();
    changed.metadata.name = "Other".to_string();
    assert_ne!(ddo.checksum().unwrap(), changed.checksum().unwrap());
}

/// Test service lookup helpers
#[test]
fn test_service_lookup() {
    let ddo = load("ddo_v4_sample.json");

    let compute = ddo
        .get_first_service_by_type(service_types::COMPUTE)
        .expect("compute service");
    assert_eq!(compute.id, "2");
    assert_eq!(ddo.get_index_of_service(compute), Some(1));
    assert_eq!(ddo.get_service_by_id("1").map(|s| s.timeout), Some(0));
    assert_eq!(ddo.get_service_by_index(0).map(|s| s.id.as_str()), Some("1"));
    assert!(ddo.get_service_by_id("99").is_none());
    assert!(ddo.get_service_by_index(5).is_none());
}

/// Test allow-list precedence over the deny list
#[test]
fn test_ddo_credentials_addresses() {
    let mut ddo = load("ddo_with_credentials.json");

    assert_eq!(ddo.get_addresses_of_type("allow"), vec!["0x123", "0x456a"]);
    assert_eq!(ddo.get_addresses_of_type("deny"), vec!["0x2222", "0x333"]);
    assert_eq!(
        ddo.get_address_allowed_code(Some("0x111")),
        ConsumableCode::CredentialNotInAllowList
    );
    assert_eq!(ddo.get_address_allowed_code(Some("0x456A")), ConsumableCode::Ok);

    // With an allow list the deny list is never consulted
    assert_eq!(ddo.get_address_allowed_code(Some("0x333")), ConsumableCode::CredentialNotInAllowList);

    ddo.credentials.allow.clear();
    assert!(ddo.get_addresses_of_type("allow").is_empty());
    assert_eq!(ddo.get_address_allowed_code(Some("0x111")), ConsumableCode::Ok);
    assert_eq!(
        ddo.get_address_allowed_code(Some("0x333")),
        ConsumableCode::CredentialInDenyList
    );

    ddo.credentials.deny.clear();
    assert!(!ddo.requires_address_credential());
    assert_eq!(ddo.get_address_allowed_code(None), ConsumableCode::Ok);
}

/// Test that malformed or unsupported credentials are rejected
#[test]
fn test_ddo_credentials_errors() {
    let ddo = load("ddo_with_credentials.json");

    let unsupported = Credential {
        credential_type: "nonexistent".to_string(),
        value: "test".to_string(),
    };
    assert_eq!(
        ddo.is_consumable(Some(&unsupported), true),
        Err(CredentialError::UnsupportedCredential("nonexistent".to_string()))
    );

    let malformed = Credential::address("");
    assert!(matches!(
        ddo.is_consumable(Some(&malformed), true),
        Err(CredentialError::MalformedCredential(_))
    ));

    assert_eq!(
        ddo.is_consumable(Some(&Credential::address("0x123")), true),
        Ok(ConsumableCode::Ok)
    );
    // No credential presented against an allow list
    assert_eq!(
        ddo.is_consumable(None, true),
        Ok(ConsumableCode::CredentialNotInAllowList)
    );
}

/// Test connectivity is checked before credentials
#[test]
fn test_ddo_connection() {
    let ddo = load("ddo_with_credentials.json");
    assert_eq!(
        ddo.is_consumable(Some(&Credential::address("0x111")), false),
        Ok(ConsumableCode::ConnectivityFail)
    );

    let mut empty = load("ddo_v4_sample.json");
    empty.services.clear();
    assert_eq!(
        empty.is_consumable(None, true),
        Ok(ConsumableCode::ConnectivityFail)
    );
}

/// Test the order-disabled flag
#[test]
fn test_ddo_credentials_disabled() {
    let mut ddo = load("ddo_disabled.json");
    assert!(ddo.is_disabled());
    assert!(!ddo.is_enabled());

    ddo.enable();
    assert!(!ddo.is_disabled());
    assert!(ddo.is_enabled());
    assert_eq!(ddo.is_consumable(None, true), Ok(ConsumableCode::Ok));

    ddo.disable();
    assert_eq!(
        ddo.is_consumable(Some(&Credential::default()), false),
        Ok(ConsumableCode::AssetDisabled)
    );

    let mut fresh = load("ddo_v4_sample.json");
    assert!(fresh.is_enabled());
    fresh.disable();
    assert!(fresh.is_disabled());
}
