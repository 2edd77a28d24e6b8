// ABOUTME: whoami command: prints the logged-in account from GET /me

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::OutputFormat;
use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::session;

/// JSON output structure for the whoami command
#[derive(Debug, Serialize)]
pub struct WhoamiOutput {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub plan: Option<String>,
}

pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<()> {
    let token = session::access_token()
        .ok_or_else(|| anyhow!("Not logged in. Run 'mechta login' first."))?;

    let api = ApiClient::new(&config.api_base_url)?;
    let me = api.get_me(&token).await?;

    match format {
        OutputFormat::Json => {
            let output = WhoamiOutput {
                id: me.user.id.clone(),
                name: me.user.display_name(),
                email: me.user.email.clone(),
                plan: me.plan.clone(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!("Logged in as {}", me.user.display_name());
            if let Some(email) = &me.user.email {
                println!("Email: {}", email);
            }
            if let Some(plan) = &me.plan {
                println!("Plan: {}", plan);
            }
        }
    }
    Ok(())
}
