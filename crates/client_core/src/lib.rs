//! Client-side core for freezing and unfreezing wallet utxos.
//!
//! [`UtxoBoard`] holds one [`FreezeController`] per listed utxo; each
//! controller drives [`ToggleRequest`]s through a [`WalletTransport`].

pub mod board;
pub mod controller;
pub mod error;
pub mod session;
pub mod toggle;
pub mod transport;

pub use board::UtxoBoard;
pub use controller::{
    ControllerConfig, ControllerState, FreezeController, Notice, Phase, Severity, ToggleOutcome,
    UtxoRow, DEFAULT_MIN_BUSY, DEFAULT_MIN_BUSY_MS,
};
pub use error::{BoardError, ListError, ToggleError, TransportFailure};
pub use session::{SessionProvider, SharedSession, WalletSession};
pub use toggle::{ToggleRequest, FREEZE_FAILED_MESSAGE};
pub use transport::{HttpWalletTransport, TransportResponse, WalletTransport};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
