use crate::cli::actions::{Action, server::Args};
use anyhow::{Context, Result};
use secrecy::SecretString;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    let root = matches
        .get_one::<PathBuf>("root")
        .cloned()
        .context("missing required argument: --root")?;

    let pin = matches
        .get_one::<String>("pin")
        .cloned()
        .context("missing required argument: --pin")?;

    Ok(Action::Server(Args {
        port,
        root,
        pin: SecretString::from(pin),
    }))
}
