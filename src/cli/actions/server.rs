use crate::{api, assets::AssetStore, gate::GateConfig};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub root: PathBuf,
    pub pin: SecretString,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the static site cannot be loaded or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    log_startup_args(&args);

    let store = AssetStore::load(&args.root)
        .with_context(|| format!("Failed to load static site from {}", args.root.display()))?;

    info!(
        assets = store.len(),
        root = %args.root.display(),
        "Static site loaded"
    );

    let gate = GateConfig::new(args.pin);

    api::new(args.port, gate, store).await
}

fn log_startup_args(args: &Args) {
    let entries = [
        ("listen", format!("tcp:{}", args.port)),
        ("root", args.root.display().to_string()),
        // The PIN itself never reaches the logs.
        ("pin_set", "true".to_string()),
    ];
    let max_key_len = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let mut message = format!("{}\n\nStartup configuration:", gatehouse_banner());
    for (key, value) in &entries {
        let padding = " ".repeat(max_key_len.saturating_sub(key.len()));
        let _ =
            std::fmt::Write::write_fmt(&mut message, format_args!("\n  {key}:{padding} {value}"));
    }
    info!("{message}");
}

fn gatehouse_banner() -> String {
    let short_hash = short_commit(crate::GIT_COMMIT_HASH);
    GATEHOUSE_BANNER.replace(
        "{VERSION}",
        &format!(" - {} - {}", env!("CARGO_PKG_VERSION"), short_hash),
    )
}

fn short_commit(hash: &str) -> String {
    let trimmed = hash.trim();
    if trimmed.len() > 7 {
        trimmed[..7].to_string()
    } else {
        trimmed.to_string()
    }
}

const GATEHOUSE_BANNER: &str = r"
  .-------------.
  |  .-------.  |
  |  |  PIN  |  |
  |  '-------'  |
  '--|       |--'  G A T E H O U S E {VERSION}
     |       |
     |       |";
