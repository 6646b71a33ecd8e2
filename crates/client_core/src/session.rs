//! Wallet session credentials shared read-only by every controller.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Clone, PartialEq, Eq)]
pub struct WalletSession {
    pub wallet_name: String,
    pub token: String,
}

impl WalletSession {
    pub fn new(wallet_name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            wallet_name: wallet_name.into(),
            token: token.into(),
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.wallet_name.trim().is_empty() && !self.token.trim().is_empty()
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("wallet_name", &self.wallet_name)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Source of the active wallet session. Refreshing it is somebody else's job.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current(&self) -> Option<WalletSession>;
}

#[async_trait]
impl SessionProvider for WalletSession {
    async fn current(&self) -> Option<WalletSession> {
        Some(self.clone())
    }
}

/// Session slot that an external session manager can swap out at any time.
#[derive(Clone, Default)]
pub struct SharedSession {
    inner: Arc<RwLock<Option<WalletSession>>>,
}

impl SharedSession {
    pub fn new(session: WalletSession) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(session))),
        }
    }

    pub async fn replace(&self, session: WalletSession) {
        *self.inner.write().await = Some(session);
    }

    pub async fn clear(&self) {
        self.inner.write().await.take();
    }
}

#[async_trait]
impl SessionProvider for SharedSession {
    async fn current(&self) -> Option<WalletSession> {
        self.inner.read().await.clone()
    }
}
