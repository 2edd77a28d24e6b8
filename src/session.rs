// ABOUTME: Bearer-token persistence using the system keychain
// Uses keyring for cross-platform support (macOS Keychain, Linux Secret Service)

use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "mechta";

/// Token slots kept in the keychain
pub enum TokenKey {
    Access,
    Refresh,
}

impl TokenKey {
    fn as_str(&self) -> &'static str {
        match self {
            TokenKey::Access => "access_token",
            TokenKey::Refresh => "refresh_token",
        }
    }
}

/// Store a token in the system keychain
pub fn store_token(key: TokenKey, value: &str) -> Result<()> {
    let entry =
        Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")?;
    entry
        .set_password(value)
        .context("Failed to store token in keychain")?;
    tracing::info!("Stored token: {}", key.as_str());
    Ok(())
}

/// Retrieve a token; `Ok(None)` when the user has never logged in
pub fn get_token(key: TokenKey) -> Result<Option<String>> {
    let entry =
        Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")?;
    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => {
            tracing::warn!("Failed to retrieve token {}: {}", key.as_str(), e);
            Err(anyhow::anyhow!("Failed to retrieve token: {}", e))
        }
    }
}

fn delete_token(key: TokenKey) -> Result<()> {
    let entry =
        Entry::new(SERVICE_NAME, key.as_str()).context("Failed to create keyring entry")?;
    match entry.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(anyhow::anyhow!("Failed to delete token: {}", e)),
    }
}

/// Persist both tokens after a successful login exchange
pub fn store_session(access_token: &str, refresh_token: &str) -> Result<()> {
    store_token(TokenKey::Access, access_token)?;
    store_token(TokenKey::Refresh, refresh_token)?;
    Ok(())
}

/// Drop the stored session. Called on explicit logout and on a 401 from any
/// endpoint.
pub fn clear_session() -> Result<()> {
    delete_token(TokenKey::Access)?;
    delete_token(TokenKey::Refresh)?;
    tracing::info!("Cleared stored session");
    Ok(())
}

/// The access token, if a session is stored
pub fn access_token() -> Option<String> {
    get_token(TokenKey::Access).ok().flatten()
}
