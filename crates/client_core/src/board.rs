//! Arena of per-utxo controllers backing one rendered utxo list.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use shared::{
    domain::{Utxo, UtxoId},
    error::{ApiErrorBody, ApiException},
    protocol::ListUtxosResponse,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    controller::{ControllerConfig, FreezeController, ToggleOutcome, UtxoRow},
    error::{BoardError, ListError},
    session::SessionProvider,
    transport::WalletTransport,
};

#[derive(Default)]
struct BoardRows {
    order: Vec<UtxoId>,
    controllers: HashMap<UtxoId, Arc<FreezeController>>,
}

pub struct UtxoBoard {
    transport: Arc<dyn WalletTransport>,
    sessions: Arc<dyn SessionProvider>,
    config: ControllerConfig,
    rows: RwLock<BoardRows>,
}

impl UtxoBoard {
    pub fn new(
        transport: Arc<dyn WalletTransport>,
        sessions: Arc<dyn SessionProvider>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            transport,
            sessions,
            config,
            rows: RwLock::new(BoardRows::default()),
        }
    }

    /// Syncs the board with a new listing. Known utxos keep their controller,
    /// utxos that disappeared lose theirs.
    pub async fn replace_items(&self, items: Vec<Utxo>) {
        let mut refreshes = Vec::new();
        {
            let mut rows = self.rows.write().await;
            let mut previous = std::mem::take(&mut rows.controllers);
            let mut seen = HashSet::new();
            let mut order = Vec::with_capacity(items.len());

            for item in items {
                if !seen.insert(item.utxo.clone()) {
                    warn!(utxo = %item.utxo, "board: duplicate utxo in listing; keeping first");
                    continue;
                }
                let id = item.utxo.clone();
                let controller = match previous.remove(&id) {
                    Some(existing) => {
                        refreshes.push((existing.clone(), item));
                        existing
                    }
                    None => Arc::new(FreezeController::new(
                        item,
                        self.transport.clone(),
                        self.sessions.clone(),
                        self.config,
                    )),
                };
                rows.controllers.insert(id.clone(), controller);
                order.push(id);
            }

            rows.order = order;
        }

        for (controller, item) in refreshes {
            controller.refresh(item).await;
        }
    }

    /// Fetches the wallet's utxos and syncs the board with them.
    pub async fn reload(&self) -> Result<usize, ListError> {
        let session = self
            .sessions
            .current()
            .await
            .filter(|session| session.is_valid())
            .ok_or(ListError::InvalidSession)?;

        let response = self.transport.list_utxos(&session).await?;
        if !response.is_success() {
            let message = ApiErrorBody::message_from_bytes(&response.body)
                .unwrap_or_else(|| "failed to list utxos".to_string());
            return Err(ApiException::new(response.status, message).into());
        }

        let listing: ListUtxosResponse = serde_json::from_slice(&response.body)?;
        let count = listing.utxos.len();
        self.replace_items(listing.utxos).await;
        info!(wallet = %session.wallet_name, count, "board: utxo listing loaded");
        Ok(count)
    }

    async fn controller(&self, utxo: &UtxoId) -> Option<Arc<FreezeController>> {
        self.rows.read().await.controllers.get(utxo).cloned()
    }

    /// Toggles one utxo. The cycle runs on its own task so it completes even
    /// if the caller stops waiting.
    pub async fn toggle(&self, utxo: &UtxoId) -> Result<ToggleOutcome, BoardError> {
        let controller = self
            .controller(utxo)
            .await
            .ok_or_else(|| BoardError::UnknownUtxo(utxo.clone()))?;
        let handle = tokio::spawn(async move { controller.toggle().await });
        Ok(handle.await?)
    }

    pub async fn dismiss_notice(&self, utxo: &UtxoId) -> Result<(), BoardError> {
        let controller = self
            .controller(utxo)
            .await
            .ok_or_else(|| BoardError::UnknownUtxo(utxo.clone()))?;
        controller.dismiss_notice().await;
        Ok(())
    }

    pub async fn row(&self, utxo: &UtxoId) -> Option<UtxoRow> {
        let controller = self.controller(utxo).await?;
        Some(controller.row().await)
    }

    /// Rows in listing order.
    pub async fn rows(&self) -> Vec<UtxoRow> {
        let controllers: Vec<Arc<FreezeController>> = {
            let rows = self.rows.read().await;
            rows.order
                .iter()
                .filter_map(|id| rows.controllers.get(id).cloned())
                .collect()
        };

        let mut out = Vec::with_capacity(controllers.len());
        for controller in controllers {
            out.push(controller.row().await);
        }
        out
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
