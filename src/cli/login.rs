// ABOUTME: Headless Telegram QR login: prints the code, polls until the user
// confirms in Telegram, then stores the session in the keychain

use anyhow::{anyhow, Result};
use std::time::{Duration, Instant};

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::models::LoginState;
use crate::session;

/// Run the full login exchange on stdout. Blocks until the user confirms,
/// the attempt expires, or the overall deadline passes.
pub async fn execute(config: &AppConfig) -> Result<()> {
    let api = ApiClient::new(&config.api_base_url)?;

    let attempt = api.qr_init().await?;
    println!("Scan this in Telegram:");
    println!();
    println!("{}", attempt.qr_code_data);
    println!();
    println!("Or open: {}", attempt.deep_link);
    println!();
    println!("Waiting for confirmation...");

    let deadline = Instant::now() + Duration::from_secs(attempt.expires_in_seconds.max(30));
    let interval = Duration::from_secs(config.login_poll_interval_secs.max(1));

    loop {
        if Instant::now() >= deadline {
            return Err(anyhow!("Login attempt expired. Run 'mechta login' again."));
        }
        tokio::time::sleep(interval).await;

        let status = api.qr_status(&attempt.login_token).await?;
        match status.status {
            LoginState::Pending => continue,
            LoginState::Expired => {
                return Err(anyhow!("Login attempt expired. Run 'mechta login' again."));
            }
            LoginState::Confirmed => {
                let secret = status
                    .one_time_secret
                    .ok_or_else(|| anyhow!("Server confirmed the login but sent no secret"))?;
                let tokens = api.qr_exchange(&secret).await?;
                session::store_session(&tokens.access_token, &tokens.refresh_token)?;
                println!("Logged in as {}.", tokens.user.display_name());
                return Ok(());
            }
        }
    }
}

/// Drop the stored session
pub fn logout() -> Result<()> {
    session::clear_session()?;
    println!("Logged out.");
    Ok(())
}
