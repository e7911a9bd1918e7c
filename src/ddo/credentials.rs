//! Consumability checks: order-disabled flag, file connectivity and
//! address allow/deny lists.

use super::model::{AssetStatus, Ddo};
use serde::{Deserialize, Serialize};

pub const ADDRESS_CREDENTIAL: &str = "address";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ConsumableCode {
    Ok = 0,
    AssetDisabled = 1,
    ConnectivityFail = 2,
    CredentialNotInAllowList = 3,
    CredentialInDenyList = 4,
}

impl ConsumableCode {
    pub fn is_ok(self) -> bool {
        self == ConsumableCode::Ok
    }
}

/// Credential presented by a consumer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "type")]
    pub credential_type: String,
    pub value: String,
}

impl Credential {
    pub fn address(value: impl Into<String>) -> Self {
        Self {
            credential_type: ADDRESS_CREDENTIAL.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("unsupported credential type: {0}")]
    UnsupportedCredential(String),
    #[error("credential of type {0} has no value")]
    MalformedCredential(String),
}

impl Ddo {
    /// Lower-cased addresses listed under `access_type` ("allow" or "deny").
    pub fn get_addresses_of_type(&self, access_type: &str) -> Vec<String> {
        let entries = match access_type {
            "allow" => &self.credentials.allow,
            "deny" => &self.credentials.deny,
            _ => return Vec::new(),
        };
        entries
            .iter()
            .find(|e| e.credential_type == ADDRESS_CREDENTIAL)
            .map(|e| e.values.iter().map(|v| v.to_lowercase()).collect())
            .unwrap_or_default()
    }

    pub fn requires_address_credential(&self) -> bool {
        !self.get_addresses_of_type("allow").is_empty()
            || !self.get_addresses_of_type("deny").is_empty()
    }

    /// Checks `address` against the allow list, or the deny list when no
    /// allow list is set.
    pub fn get_address_allowed_code(&self, address: Option<&str>) -> ConsumableCode {
        let allowed = self.get_addresses_of_type("allow");
        if !allowed.is_empty() {
            return match address {
                Some(a) if allowed.contains(&a.to_lowercase()) => ConsumableCode::Ok,
                _ => ConsumableCode::CredentialNotInAllowList,
            };
        }

        let denied = self.get_addresses_of_type("deny");
        match address {
            Some(a) if denied.contains(&a.to_lowercase()) => ConsumableCode::CredentialInDenyList,
            _ => ConsumableCode::Ok,
        }
    }

    pub fn validate_access(
        &self,
        credential: Option<&Credential>,
    ) -> Result<ConsumableCode, CredentialError> {
        let credential = match credential {
            Some(c) if !c.credential_type.is_empty() || !c.value.is_empty() => c,
            _ => return Ok(self.get_address_allowed_code(None)),
        };
        if credential.credential_type != ADDRESS_CREDENTIAL {
            return Err(CredentialError::UnsupportedCredential(
                credential.credential_type.clone(),
            ));
        }
        if credential.value.is_empty() {
            return Err(CredentialError::MalformedCredential(
                credential.credential_type.clone(),
            ));
        }
        Ok(self.get_address_allowed_code(Some(&credential.value)))
    }

    pub fn is_disabled(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.is_order_disabled)
            .unwrap_or(false)
    }

    pub fn is_enabled(&self) -> bool {
        !self.is_disabled()
    }

    pub fn enable(&mut self) {
        if let Some(status) = self.status.as_mut() {
            status.is_order_disabled = None;
        }
    }

    pub fn disable(&mut self) {
        self.status
            .get_or_insert_with(AssetStatus::default)
            .is_order_disabled = Some(true);
    }

    /// Whether the asset can be ordered right now.
    ///
    /// `files_reachable` is the result of the caller's file connectivity
    /// check. A document without services never passes it.
    pub fn is_consumable(
        &self,
        credential: Option<&Credential>,
        files_reachable: bool,
    ) -> Result<ConsumableCode, CredentialError> {
        if self.is_disabled() {
            return Ok(ConsumableCode::AssetDisabled);
        }
        if self.services.is_empty() || !files_reachable {
            return Ok(ConsumableCode::ConnectivityFail);
        }
        if credential.is_some() || self.requires_address_credential() {
            return self.validate_access(credential);
        }
        Ok(ConsumableCode::Ok)
    }
}
