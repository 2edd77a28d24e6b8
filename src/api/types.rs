// ABOUTME: Response envelope and error taxonomy for the MechtaAI HTTP API

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard envelope every endpoint responds with:
/// `{ ok, result?, pagination?, error? }`
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub pagination: Option<Pagination>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// A page of items together with the envelope's pagination block
#[derive(Debug, Clone, Deserialize)]
pub struct Paged<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Errors surfaced by the API client.
///
/// `NotFound` is benign on first access to the draft (the caller creates one
/// instead of reporting it); `Unauthorized` triggers the global logout.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("empty result in successful response")]
    EmptyResult,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }

    /// A short human-readable message suitable for a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::NotFound => "Not found".to_string(),
            ApiError::Unauthorized => "Session expired, please log in again".to_string(),
            ApiError::Api { message, .. } => message.clone(),
            ApiError::Http(_) => "Network error, please try again".to_string(),
            ApiError::Decode(_) | ApiError::EmptyResult => {
                "Unexpected server response".to_string()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
