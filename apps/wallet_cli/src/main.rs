use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpWalletTransport, ToggleOutcome, UtxoBoard, UtxoRow};
use shared::domain::UtxoId;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "List wallet utxos and freeze or unfreeze them")]
struct Args {
    /// Wallet API base url; overrides wallet.toml and environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    wallet: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every utxo of the wallet.
    List,
    /// Flip the frozen flag of one utxo (`<txid>:<vout>`).
    Toggle { utxo: String },
}

fn describe_row(row: &UtxoRow) -> String {
    let item = &row.item;
    let mut line = format!(
        "{}  {} sats  {} confirmations  {}",
        item.utxo, item.value, item.confirmations, item.address
    );
    if item.frozen {
        line.push_str("  [frozen]");
    }
    if item.is_unconfirmed() {
        line.push_str("  [unconfirmed]");
    }
    if let Some(label) = &item.label {
        line.push_str(&format!("  [{label}]"));
    }
    if let Some(locktime) = &item.locktime {
        line.push_str(&format!("  [locked until {locktime}]"));
    }
    if row.busy {
        line.push_str("  (pending)");
    }
    if let Some(notice) = row.last_error.as_ref().filter(|notice| notice.is_visible()) {
        line.push_str(&format!("\n    {}: {}", notice.severity.as_str(), notice.message));
    }
    line
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(v) = args.api_url {
        settings.wallet_api_url = v;
    }
    if let Some(v) = args.wallet {
        settings.wallet_name = Some(v);
    }
    if let Some(v) = args.token {
        settings.wallet_token = Some(v);
    }

    let session = settings.session().context(
        "wallet name and token are required (--wallet/--token or APP__WALLET_NAME/APP__WALLET_TOKEN)",
    )?;
    let transport = HttpWalletTransport::new(&settings.wallet_api_url)
        .with_context(|| format!("invalid wallet api url '{}'", settings.wallet_api_url))?;
    let board = UtxoBoard::new(
        Arc::new(transport),
        Arc::new(session),
        settings.controller_config(),
    );

    board.reload().await.context("failed to list wallet utxos")?;

    match args.command {
        Command::List => {
            for row in board.rows().await {
                println!("{}", describe_row(&row));
            }
        }
        Command::Toggle { utxo } => {
            let utxo = UtxoId::new(utxo);
            let outcome = board.toggle(&utxo).await?;
            if let Some(row) = board.row(&utxo).await {
                println!("{}", describe_row(&row));
            }
            match outcome {
                ToggleOutcome::Confirmed(item) => {
                    let state = if item.frozen { "frozen" } else { "unfrozen" };
                    println!("{} is now {state}", item.utxo);
                }
                ToggleOutcome::Failed(notice) => bail!("freeze toggle failed: {}", notice.message),
                ToggleOutcome::Ignored => println!("{utxo} already has a toggle in flight"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use client_core::Notice;
    use shared::domain::Utxo;

    use super::*;

    fn row(frozen: bool, confirmations: u64) -> UtxoRow {
        UtxoRow {
            item: Utxo {
                utxo: UtxoId::from("ab:1"),
                address: "bcrt1qxyz".into(),
                value: 2500,
                confirmations,
                frozen,
                label: Some("cj-out".into()),
                locktime: None,
            },
            busy: false,
            last_error: None,
        }
    }

    #[test]
    fn describes_flags_and_label() {
        let line = describe_row(&row(true, 0));
        assert!(line.starts_with("ab:1  2500 sats  0 confirmations  bcrt1qxyz"));
        assert!(line.contains("[frozen]"));
        assert!(line.contains("[unconfirmed]"));
        assert!(line.contains("[cj-out]"));

        let plain = describe_row(&row(false, 4));
        assert!(!plain.contains("[frozen]"));
        assert!(!plain.contains("[unconfirmed]"));
    }

    #[test]
    fn shows_visible_notice_only() {
        let mut with_error = row(false, 4);
        with_error.last_error = Some(Notice::danger("insufficient funds"));
        assert!(describe_row(&with_error).contains("danger: insufficient funds"));

        if let Some(notice) = with_error.last_error.as_mut() {
            notice.dismiss();
        }
        assert!(!describe_row(&with_error).contains("insufficient funds"));
    }
}
