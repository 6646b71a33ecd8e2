use serde::{Deserialize, Serialize};

use crate::domain::{Utxo, UtxoId};

/// Body of `POST /api/v1/wallet/{wallet}/freeze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeRequest {
    #[serde(rename = "utxo-string")]
    pub utxo: UtxoId,
    pub freeze: bool,
}

impl FreezeRequest {
    pub fn new(utxo: UtxoId, freeze: bool) -> Self {
        Self { utxo, freeze }
    }
}

/// Body of `GET /api/v1/wallet/{wallet}/utxos`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListUtxosResponse {
    #[serde(default)]
    pub utxos: Vec<Utxo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeze_request_uses_wallet_field_names() {
        let body = FreezeRequest::new(UtxoId::from("ef56:3"), true);
        let value = serde_json::to_value(&body).expect("json");
        assert_eq!(
            value,
            serde_json::json!({ "utxo-string": "ef56:3", "freeze": true })
        );
    }

    #[test]
    fn list_response_tolerates_missing_utxos_key() {
        let parsed: ListUtxosResponse = serde_json::from_str("{}").expect("json");
        assert!(parsed.utxos.is_empty());
    }
}
