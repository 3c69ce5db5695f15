//! API key management for the decomposition service.

use clap::Subcommand;
use questline_core::gateway::gemini::{API_KEY_ENTRY, API_KEY_ENV};
use questline_core::gateway::keyring_store;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Store the service API key in the OS keyring
    SetKey {
        /// The API key
        key: String,
    },
    /// Show whether a key is configured
    Status,
    /// Remove the stored key
    Clear,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::SetKey { key } => {
            if key.trim().is_empty() {
                return Err("API key must not be empty".into());
            }
            keyring_store::set(API_KEY_ENTRY, key.trim())?;
            println!("API key stored in the OS keyring.");
        }
        AuthAction::Status => {
            let in_keyring = keyring_store::get(API_KEY_ENTRY)?.is_some();
            let in_env = std::env::var(API_KEY_ENV).is_ok_and(|v| !v.is_empty());
            match (in_keyring, in_env) {
                (true, _) => println!("API key: configured (keyring)"),
                (false, true) => println!("API key: configured ({API_KEY_ENV})"),
                (false, false) => {
                    println!("API key: not configured");
                    println!("Set one with: questline auth set-key <KEY>");
                }
            }
        }
        AuthAction::Clear => {
            keyring_store::delete(API_KEY_ENTRY)?;
            println!("API key removed from the keyring.");
        }
    }
    Ok(())
}
