//! Reversible encoding used by legacy browser storage snapshots.
//!
//! This is an obfuscation, not encryption: anyone holding a snapshot can
//! decode it. It exists only so old snapshots can be migrated into the real
//! credential store, and so the account list can be exported in the same shape.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::InternalError;
use crate::types::internal::Account;

/// Suffix appended before base64 encoding
pub const LEGACY_STORAGE_KEY: &str = "GlobalNewsHub2024SecureKey!@#$%";

/// Account entry as it appears in a legacy snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAccount {
    pub id: String,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub last_login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl From<&Account> for LegacyAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            username: account.username.clone(),
            role: account.role.as_str().to_string(),
            last_login: account.last_login.map(|t| t.to_rfc3339()).unwrap_or_default(),
            phone_number: account.phone_number.clone(),
        }
    }
}

/// Encode text the way the legacy storage did
pub fn encode(plain: &str) -> String {
    general_purpose::STANDARD.encode(format!("{}{}", plain, LEGACY_STORAGE_KEY))
}

/// Decode a legacy storage value back to its plain text
pub fn decode(encoded: &str) -> Result<String, InternalError> {
    let bytes = general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| InternalError::parse("legacy_snapshot", format!("invalid base64: {}", e)))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| InternalError::parse("legacy_snapshot", format!("invalid utf-8: {}", e)))?;

    text.strip_suffix(LEGACY_STORAGE_KEY)
        .map(str::to_string)
        .ok_or_else(|| InternalError::parse("legacy_snapshot", "storage key suffix missing"))
}

pub fn encode_accounts(accounts: &[LegacyAccount]) -> Result<String, InternalError> {
    let json = serde_json::to_string(accounts)
        .map_err(|e| InternalError::parse("legacy_accounts", e.to_string()))?;
    Ok(encode(&json))
}

pub fn decode_accounts(encoded: &str) -> Result<Vec<LegacyAccount>, InternalError> {
    let json = decode(encoded)?;
    serde_json::from_str(&json).map_err(|e| InternalError::parse("legacy_accounts", e.to_string()))
}

/// Decode the username to plaintext password map
pub fn decode_passwords(encoded: &str) -> Result<BTreeMap<String, String>, InternalError> {
    let json = decode(encoded)?;
    serde_json::from_str(&json).map_err(|e| InternalError::parse("legacy_passwords", e.to_string()))
}
