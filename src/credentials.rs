// src/credentials.rs
//! Bearer token for the Google backend.
//!
//! Obtaining the token (OAuth consent, service accounts) happens elsewhere;
//! this module only stores and retrieves it.

use bevy::log::{error, info};

use crate::sheets::error::{SheetError, SheetResult};

pub const KEYRING_SERVICE_NAME: &str = "sheetbridge";
pub const KEYRING_TOKEN_USERNAME: &str = "google_access_token";
pub const ENV_ACCESS_TOKEN: &str = "GOOGLE_OAUTH_ACCESS_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Environment,
    Keyring,
}

fn keyring_entry() -> SheetResult<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE_NAME, KEYRING_TOKEN_USERNAME)
        .map_err(|e| SheetError::Config(format!("keyring unavailable: {}", e)))
}

/// Looks up the token: environment first, then the OS keyring.
pub fn find_access_token() -> SheetResult<Option<(String, TokenSource)>> {
    if let Ok(token) = std::env::var(ENV_ACCESS_TOKEN) {
        if !token.trim().is_empty() {
            return Ok(Some((token.trim().to_string(), TokenSource::Environment)));
        }
    }
    match keyring_entry()?.get_password() {
        Ok(token) => Ok(Some((token, TokenSource::Keyring))),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            error!("Error reading access token from keyring: {}", e);
            Err(SheetError::Config(format!("keyring read failed: {}", e)))
        }
    }
}

pub fn resolve_access_token() -> SheetResult<String> {
    match find_access_token()? {
        Some((token, source)) => {
            info!("Using Google access token from {:?}.", source);
            Ok(token)
        }
        None => Err(SheetError::Access(format!(
            "no access token; set {} or run `sheetbridge token set`",
            ENV_ACCESS_TOKEN
        ))),
    }
}

pub fn store_access_token(token: &str) -> SheetResult<()> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SheetError::Config("refusing to store an empty token".to_string()));
    }
    keyring_entry()?
        .set_password(token)
        .map_err(|e| SheetError::Config(format!("keyring write failed: {}", e)))?;
    info!("Stored Google access token in keyring.");
    Ok(())
}

/// Returns false when there was nothing to delete.
pub fn clear_access_token() -> SheetResult<bool> {
    match keyring_entry()?.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(SheetError::Config(format!("keyring delete failed: {}", e))),
    }
}
