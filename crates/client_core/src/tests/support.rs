//! Scripted wallet transport shared by the unit tests.

use std::{
    collections::{HashMap, VecDeque},
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{Utxo, UtxoId},
    protocol::FreezeRequest,
};
use tokio::sync::Mutex;

use crate::{
    error::TransportFailure,
    session::WalletSession,
    transport::{TransportResponse, WalletTransport},
};

#[derive(Debug, Clone)]
pub(crate) enum FakeReply {
    Status(u16, Vec<u8>),
    Unreachable(String),
}

impl FakeReply {
    fn into_result(self) -> Result<TransportResponse, TransportFailure> {
        match self {
            FakeReply::Status(status, body) => Ok(TransportResponse::new(status, body)),
            FakeReply::Unreachable(reason) => Err(TransportFailure::Unreachable(reason)),
        }
    }
}

pub(crate) struct FakeTransport {
    latency: Duration,
    latency_for: HashMap<UtxoId, Duration>,
    default_reply: FakeReply,
    queued: Mutex<VecDeque<FakeReply>>,
    listing: Mutex<FakeReply>,
    freeze_calls: Mutex<Vec<(WalletSession, FreezeRequest)>>,
    list_calls: Mutex<u32>,
}

impl FakeTransport {
    pub(crate) fn replying(reply: FakeReply) -> Self {
        Self {
            latency: Duration::ZERO,
            latency_for: HashMap::new(),
            default_reply: reply,
            queued: Mutex::new(VecDeque::new()),
            listing: Mutex::new(FakeReply::Status(200, br#"{"utxos":[]}"#.to_vec())),
            freeze_calls: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
        }
    }

    pub(crate) fn ok() -> Self {
        Self::replying(FakeReply::Status(200, b"{}".to_vec()))
    }

    pub(crate) fn answering(status: u16, body: &str) -> Self {
        Self::replying(FakeReply::Status(status, body.as_bytes().to_vec()))
    }

    pub(crate) fn unreachable(reason: &str) -> Self {
        Self::replying(FakeReply::Unreachable(reason.to_string()))
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn with_latency_for(mut self, utxo: &str, latency: Duration) -> Self {
        self.latency_for.insert(UtxoId::from(utxo), latency);
        self
    }

    /// Replies used, in order, before falling back to the default reply.
    pub(crate) fn then(self, reply: FakeReply) -> Self {
        self.queued.try_lock().expect("fresh fake").push_back(reply);
        self
    }

    pub(crate) fn with_listing(self, status: u16, body: &str) -> Self {
        *self.listing.try_lock().expect("fresh fake") =
            FakeReply::Status(status, body.as_bytes().to_vec());
        self
    }

    pub(crate) async fn freeze_requests(&self) -> Vec<FreezeRequest> {
        self.freeze_calls
            .lock()
            .await
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    pub(crate) async fn freeze_sessions(&self) -> Vec<WalletSession> {
        self.freeze_calls
            .lock()
            .await
            .iter()
            .map(|(session, _)| session.clone())
            .collect()
    }

    pub(crate) async fn list_call_count(&self) -> u32 {
        *self.list_calls.lock().await
    }
}

#[async_trait]
impl WalletTransport for FakeTransport {
    async fn post_freeze(
        &self,
        session: &WalletSession,
        request: &FreezeRequest,
    ) -> Result<TransportResponse, TransportFailure> {
        self.freeze_calls
            .lock()
            .await
            .push((session.clone(), request.clone()));

        let latency = self
            .latency_for
            .get(&request.utxo)
            .copied()
            .unwrap_or(self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        let reply = self
            .queued
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.default_reply.clone());
        reply.into_result()
    }

    async fn list_utxos(
        &self,
        _session: &WalletSession,
    ) -> Result<TransportResponse, TransportFailure> {
        *self.list_calls.lock().await += 1;
        self.listing.lock().await.clone().into_result()
    }
}

pub(crate) fn session() -> WalletSession {
    WalletSession::new("default.jmdat", "access-token")
}

pub(crate) fn utxo(id: &str, frozen: bool) -> Utxo {
    Utxo {
        utxo: UtxoId::from(id),
        address: format!("bcrt1q{}", id.replace(':', "")),
        value: 100_000,
        confirmations: 3,
        frozen,
        label: None,
        locktime: None,
    }
}

pub(crate) fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
