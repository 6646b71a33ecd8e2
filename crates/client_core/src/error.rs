//! Error types surfaced by the wallet transport, toggle requests and the board.

use shared::{domain::UtxoId, error::ApiException};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportFailure {
    #[error("invalid wallet api url '{0}'")]
    InvalidUrl(String),
    #[error("wallet api unreachable: {0}")]
    Unreachable(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(value: reqwest::Error) -> Self {
        Self::Unreachable(value.to_string())
    }
}

/// Every way a freeze toggle can fail, normalized to one kind carrying a
/// human-readable message. `Display` is what ends up in the item's notice.
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("wallet session is missing or incomplete")]
    InvalidSession,
    #[error(transparent)]
    Transport(#[from] TransportFailure),
    #[error("{message}")]
    Server { status: u16, message: String },
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error("wallet session is missing or incomplete")]
    InvalidSession,
    #[error(transparent)]
    Transport(#[from] TransportFailure),
    #[error(transparent)]
    Api(#[from] ApiException),
    #[error("malformed utxo listing: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("utxo {0} is not on the board")]
    UnknownUtxo(UtxoId),
    #[error("toggle task aborted: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}
