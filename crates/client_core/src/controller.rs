//! Per-utxo freeze toggle state machine.
//!
//! `Idle -> Sending -> (Succeeded | Failed) -> Idle`. A controller accepts one
//! trigger at a time; triggers arriving while it is busy are dropped. The busy
//! window lasts at least [`ControllerConfig::min_busy`] measured from entry
//! into `Sending`, whatever the outcome.

use std::{sync::Arc, time::Duration};

use shared::domain::{Utxo, UtxoId};
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, info, warn};

use crate::{session::SessionProvider, toggle::ToggleRequest, transport::WalletTransport};

pub const DEFAULT_MIN_BUSY_MS: u64 = 200;
pub const DEFAULT_MIN_BUSY: Duration = Duration::from_millis(DEFAULT_MIN_BUSY_MS);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub min_busy: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_busy: DEFAULT_MIN_BUSY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Sending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Danger => "danger",
        }
    }
}

/// Error notice attached to one row. Its visibility is owned by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub dismissible: bool,
    visible: bool,
}

impl Notice {
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Danger,
            message: message.into(),
            dismissible: true,
            visible: true,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn dismiss(&mut self) {
        if self.dismissible {
            self.visible = false;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub phase: Phase,
    pub busy: bool,
    pub last_error: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A toggle for this utxo was already in flight.
    Ignored,
    /// The wallet confirmed the change; carries the new snapshot.
    Confirmed(Utxo),
    Failed(Notice),
}

/// What the rendering side gets for one utxo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtxoRow {
    pub item: Utxo,
    pub busy: bool,
    pub last_error: Option<Notice>,
}

struct ControllerInner {
    item: Utxo,
    state: ControllerState,
}

pub struct FreezeController {
    utxo: UtxoId,
    transport: Arc<dyn WalletTransport>,
    sessions: Arc<dyn SessionProvider>,
    config: ControllerConfig,
    inner: Mutex<ControllerInner>,
}

impl FreezeController {
    pub fn new(
        item: Utxo,
        transport: Arc<dyn WalletTransport>,
        sessions: Arc<dyn SessionProvider>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            utxo: item.utxo.clone(),
            transport,
            sessions,
            config,
            inner: Mutex::new(ControllerInner {
                item,
                state: ControllerState::default(),
            }),
        }
    }

    pub fn utxo(&self) -> &UtxoId {
        &self.utxo
    }

    pub async fn item(&self) -> Utxo {
        self.inner.lock().await.item.clone()
    }

    pub async fn state(&self) -> ControllerState {
        self.inner.lock().await.state.clone()
    }

    pub async fn row(&self) -> UtxoRow {
        let guard = self.inner.lock().await;
        UtxoRow {
            item: guard.item.clone(),
            busy: guard.state.busy,
            last_error: guard.state.last_error.clone(),
        }
    }

    /// Runs one full toggle cycle and returns once the controller is idle again.
    ///
    /// The future must be driven to completion; callers that may drop it should
    /// spawn it instead (see `UtxoBoard::toggle`).
    pub async fn toggle(&self) -> ToggleOutcome {
        let (request, started) = {
            let mut guard = self.inner.lock().await;
            if guard.state.busy {
                debug!(utxo = %self.utxo, "freeze: toggle already in flight; ignoring trigger");
                return ToggleOutcome::Ignored;
            }
            guard.state = ControllerState {
                phase: Phase::Sending,
                busy: true,
                last_error: None,
            };
            (ToggleRequest::for_item(&guard.item), Instant::now())
        };

        let session = self.sessions.current().await;
        let result = request
            .send(self.transport.as_ref(), session.as_ref())
            .await;

        let outcome = {
            let mut guard = self.inner.lock().await;
            match result {
                Ok(()) => {
                    guard.item = guard.item.with_frozen(request.freeze);
                    guard.state.phase = Phase::Succeeded;
                    info!(utxo = %self.utxo, frozen = request.freeze, "freeze: toggle confirmed");
                    ToggleOutcome::Confirmed(guard.item.clone())
                }
                Err(err) => {
                    let notice = Notice::danger(err.to_string());
                    guard.state.phase = Phase::Failed;
                    guard.state.last_error = Some(notice.clone());
                    warn!(
                        utxo = %self.utxo,
                        frozen = guard.item.frozen,
                        "freeze: toggle failed: {err}"
                    );
                    ToggleOutcome::Failed(notice)
                }
            }
        };

        tokio::time::sleep_until(started + self.config.min_busy).await;

        let mut guard = self.inner.lock().await;
        guard.state.phase = Phase::Idle;
        guard.state.busy = false;
        outcome
    }

    /// Hides the current notice. Busy state and the item are left alone.
    pub async fn dismiss_notice(&self) {
        if let Some(notice) = self.inner.lock().await.state.last_error.as_mut() {
            notice.dismiss();
        }
    }

    /// Adopts freshly listed data for this utxo. Returns `false` without
    /// touching anything if the id does not match or a toggle is in flight.
    pub async fn refresh(&self, item: Utxo) -> bool {
        if item.utxo != self.utxo {
            return false;
        }
        let mut guard = self.inner.lock().await;
        if guard.state.busy {
            debug!(utxo = %self.utxo, "freeze: refresh skipped while toggle in flight");
            return false;
        }
        guard.item = item;
        true
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
