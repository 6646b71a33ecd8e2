use std::fmt;

use serde::{Deserialize, Serialize};

/// Wallet-assigned outpoint identifier, `"<txid>:<vout>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UtxoId(pub String);

impl UtxoId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UtxoId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One spendable coin record as reported by the wallet.
///
/// Everything except `frozen` is display data. `frozen` only changes through
/// [`Utxo::with_frozen`], which hands back a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub utxo: UtxoId,
    pub address: String,
    pub value: u64,
    #[serde(default)]
    pub confirmations: u64,
    #[serde(default)]
    pub frozen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locktime: Option<String>,
}

impl Utxo {
    pub fn with_frozen(&self, frozen: bool) -> Self {
        Self {
            frozen,
            ..self.clone()
        }
    }

    pub fn is_unconfirmed(&self) -> bool {
        self.confirmations == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wallet_utxo_with_missing_optional_fields() {
        let raw = r#"{
            "utxo": "ab12:0",
            "address": "bcrt1qxyz",
            "value": 150000,
            "mixdepth": 2,
            "tries": 0
        }"#;
        let utxo: Utxo = serde_json::from_str(raw).expect("utxo");
        assert_eq!(utxo.utxo, UtxoId::from("ab12:0"));
        assert!(!utxo.frozen);
        assert!(utxo.is_unconfirmed());
        assert_eq!(utxo.label, None);
        assert_eq!(utxo.locktime, None);
    }

    #[test]
    fn with_frozen_leaves_original_snapshot_untouched() {
        let original = Utxo {
            utxo: UtxoId::from("cd34:1"),
            address: "bcrt1qabc".into(),
            value: 42,
            confirmations: 6,
            frozen: false,
            label: Some("cj-out".into()),
            locktime: None,
        };
        let updated = original.with_frozen(true);
        assert!(updated.frozen);
        assert!(!original.frozen);
        assert_eq!(updated.label, original.label);
        assert_eq!(updated.utxo, original.utxo);
    }
}
