use shared::{
    domain::{Utxo, UtxoId},
    error::ApiErrorBody,
    protocol::FreezeRequest,
};

use crate::{error::ToggleError, session::WalletSession, transport::WalletTransport};

/// Substituted when the wallet rejects a toggle without saying why.
pub const FREEZE_FAILED_MESSAGE: &str = "freeze failed";

/// A single "set frozen flag" intent for one utxo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRequest {
    pub utxo: UtxoId,
    pub freeze: bool,
}

impl ToggleRequest {
    /// Targets the negation of the item's current flag.
    pub fn for_item(item: &Utxo) -> Self {
        Self {
            utxo: item.utxo.clone(),
            freeze: !item.frozen,
        }
    }

    /// Issues exactly one remote call, or none when the session is unusable.
    ///
    /// Any 2xx counts as confirmation; the body of a successful response is
    /// never inspected.
    pub async fn send(
        &self,
        transport: &dyn WalletTransport,
        session: Option<&WalletSession>,
    ) -> Result<(), ToggleError> {
        let session = session
            .filter(|session| session.is_valid())
            .ok_or(ToggleError::InvalidSession)?;

        let response = transport
            .post_freeze(session, &FreezeRequest::new(self.utxo.clone(), self.freeze))
            .await?;
        if response.is_success() {
            return Ok(());
        }

        let message = ApiErrorBody::message_from_bytes(&response.body)
            .unwrap_or_else(|| FREEZE_FAILED_MESSAGE.to_string());
        Err(ToggleError::Server {
            status: response.status,
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/toggle_tests.rs"]
mod tests;
