// ABOUTME: Data models for the QR/Telegram login exchange and user identity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending QR login attempt created by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub login_token: String,
    pub qr_code_data: String,
    pub deep_link: String,
    pub expires_in_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginState {
    Pending,
    Confirmed,
    Expired,
}

/// Poll result for a QR login attempt. The one-time secret appears once the
/// user confirms the login in Telegram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginStatus {
    pub status: LoginState,
    pub one_time_secret: Option<String>,
}

/// Bearer tokens returned after exchanging the one-time secret
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: User,
}

/// The subset of the user profile the dashboard displays
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub locale: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload of `GET /api/v1/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Me {
    pub user: User,
    #[serde(default)]
    pub plan: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self
                .email
                .clone()
                .unwrap_or_else(|| self.id.clone()),
        }
    }
}
