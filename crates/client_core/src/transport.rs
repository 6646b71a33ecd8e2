//! Wallet API seam: a trait the controllers talk to and the reqwest adapter behind it.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::FreezeRequest;
use tracing::{debug, warn};
use url::Url;

use crate::{error::TransportFailure, session::WalletSession};

/// Raw status and body as returned by the wallet API. Interpreting them is the
/// caller's business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait WalletTransport: Send + Sync {
    async fn post_freeze(
        &self,
        session: &WalletSession,
        request: &FreezeRequest,
    ) -> Result<TransportResponse, TransportFailure>;

    async fn list_utxos(
        &self,
        session: &WalletSession,
    ) -> Result<TransportResponse, TransportFailure>;
}

pub struct HttpWalletTransport {
    http: Client,
    base_url: Url,
}

impl HttpWalletTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportFailure> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, TransportFailure> {
        let base_url =
            Url::parse(base_url.trim()).map_err(|_| TransportFailure::InvalidUrl(base_url.into()))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportFailure::InvalidUrl(base_url.into()));
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn wallet_endpoint(&self, wallet_name: &str, action: &str) -> Result<Url, TransportFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportFailure::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "v1", "wallet", wallet_name, action]);
        Ok(url)
    }

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<TransportResponse, TransportFailure> {
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|err| {
            warn!(status, "wallet api: failed to read response body: {err}");
            TransportFailure::from(err)
        })?;
        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl WalletTransport for HttpWalletTransport {
    async fn post_freeze(
        &self,
        session: &WalletSession,
        request: &FreezeRequest,
    ) -> Result<TransportResponse, TransportFailure> {
        let url = self.wallet_endpoint(&session.wallet_name, "freeze")?;
        debug!(utxo = %request.utxo, freeze = request.freeze, "wallet api: POST freeze");
        let response = self
            .http
            .post(url)
            .bearer_auth(&session.token)
            .json(request)
            .send()
            .await?;
        // A confirmed freeze carries no payload worth reading.
        if response.status().is_success() {
            return Ok(TransportResponse::new(response.status().as_u16(), Vec::new()));
        }
        Self::read_response(response).await
    }

    async fn list_utxos(
        &self,
        session: &WalletSession,
    ) -> Result<TransportResponse, TransportFailure> {
        let url = self.wallet_endpoint(&session.wallet_name, "utxos")?;
        debug!(wallet = %session.wallet_name, "wallet api: GET utxos");
        let response = self
            .http
            .get(url)
            .bearer_auth(&session.token)
            .send()
            .await?;
        Self::read_response(response).await
    }
}
