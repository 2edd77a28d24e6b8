// ABOUTME: HTTP client for the MechtaAI REST API
// Thin typed wrapper: bearer token is passed explicitly per request, never
// stored in shared default headers

use crate::api::types::{ApiError, ApiErrorBody, ApiResponse, ApiResult, Paged};
use crate::models::{
    AuthTokens, LoginAttempt, LoginStatus, Me, StreamAppendResponse, StreamStartResponse,
    WantsAnalysis, WantsDraft, WantsProgress,
};
use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("mechta/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and unwrap the standard response envelope.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = builder.send().await?;
        let status = response.status();

        match status {
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound),
            StatusCode::UNAUTHORIZED => return Err(ApiError::Unauthorized),
            _ => {}
        }

        let body = response.text().await?;
        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;

        if !envelope.ok || !status.is_success() {
            let ApiErrorBody { code, message, .. } =
                envelope.error.unwrap_or_else(|| ApiErrorBody {
                    code: format!("http_{}", status.as_u16()),
                    message: "request failed".to_string(),
                    details: None,
                });
            warn!(code = %code, status = %status, "API call failed: {}", message);
            return Err(ApiError::Api { code, message });
        }

        envelope.result.ok_or(ApiError::EmptyResult)
    }

    // --- Wants draft ---

    /// Fetch the current open draft. First access returns `NotFound`; the
    /// caller is expected to create one via `create_draft`.
    pub async fn get_draft(&self, token: &str) -> ApiResult<WantsDraft> {
        debug!("Fetching current wants draft");
        self.send(self.request(Method::GET, "/api/v1/wants/raw", Some(token)))
            .await
    }

    pub async fn create_draft(&self, token: &str) -> ApiResult<WantsDraft> {
        debug!("Creating wants draft");
        self.send(self.request(Method::POST, "/api/v1/wants/raw", Some(token)))
            .await
    }

    pub async fn get_progress(&self, token: &str) -> ApiResult<WantsProgress> {
        self.send(self.request(Method::GET, "/api/v1/wants/progress", Some(token)))
            .await
    }

    // --- Stream stage ---

    pub async fn start_stream(&self, token: &str) -> ApiResult<StreamStartResponse> {
        self.send(self.request(Method::POST, "/api/v1/wants/stream/start", Some(token)))
            .await
    }

    /// Persist one freeform line. Only the new text is sent; the server owns
    /// concatenation into the accumulated stream.
    pub async fn append_stream(&self, token: &str, text: &str) -> ApiResult<StreamAppendResponse> {
        self.send(
            self.request(Method::POST, "/api/v1/wants/stream/append", Some(token))
                .json(&json!({ "text": text })),
        )
        .await
    }

    pub async fn finish_stream(&self, token: &str) -> ApiResult<StreamStartResponse> {
        self.send(self.request(Method::POST, "/api/v1/wants/stream/finish", Some(token)))
            .await
    }

    // --- Future-me stage ---

    pub async fn update_future_me(&self, token: &str, text: &str) -> ApiResult<WantsDraft> {
        self.send(
            self.request(Method::PUT, "/api/v1/wants/future-me", Some(token))
                .json(&json!({ "text": text })),
        )
        .await
    }

    pub async fn finish_future_me(&self, token: &str) -> ApiResult<WantsDraft> {
        self.send(self.request(Method::POST, "/api/v1/wants/future-me/finish", Some(token)))
            .await
    }

    // --- Reverse stage ---

    /// All three reverse answers are saved together; the server decides when
    /// the stage counts as done.
    pub async fn update_reverse(
        &self,
        token: &str,
        envy: &str,
        regrets: &str,
        what_to_do_5y: &str,
    ) -> ApiResult<WantsDraft> {
        self.send(
            self.request(Method::PUT, "/api/v1/wants/reverse", Some(token))
                .json(&json!({
                    "raw_envy": envy,
                    "raw_regrets": regrets,
                    "raw_what_to_do_5y": what_to_do_5y,
                })),
        )
        .await
    }

    // --- Finalization ---

    pub async fn complete_draft(&self, token: &str) -> ApiResult<WantsDraft> {
        debug!("Completing wants draft");
        self.send(self.request(Method::POST, "/api/v1/wants/complete", Some(token)))
            .await
    }

    pub async fn request_analysis(&self, token: &str) -> ApiResult<WantsAnalysis> {
        debug!("Requesting wants analysis");
        self.send(self.request(Method::POST, "/api/v1/wants/analyze", Some(token)))
            .await
    }

    pub async fn get_analysis(&self, token: &str) -> ApiResult<WantsAnalysis> {
        self.send(self.request(Method::GET, "/api/v1/wants/analysis", Some(token)))
            .await
    }

    // --- History ---

    pub async fn get_history(
        &self,
        token: &str,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Vec<WantsDraft>> {
        let paged: Paged<WantsDraft> = self
            .send(
                self.request(Method::GET, "/api/v1/wants/history", Some(token))
                    .query(&[("page", page), ("page_size", page_size)]),
            )
            .await?;
        Ok(paged.items)
    }

    // --- Auth (QR/Telegram exchange) ---

    pub async fn qr_init(&self) -> ApiResult<LoginAttempt> {
        self.send(self.request(Method::POST, "/api/v1/auth/telegram/qr/init", None))
            .await
    }

    pub async fn qr_status(&self, login_token: &str) -> ApiResult<LoginStatus> {
        self.send(
            self.request(Method::GET, "/api/v1/auth/telegram/qr/status", None)
                .query(&[("login_token", login_token)]),
        )
        .await
    }

    pub async fn qr_exchange(&self, one_time_secret: &str) -> ApiResult<AuthTokens> {
        self.send(
            self.request(Method::POST, "/api/v1/auth/telegram/qr/exchange", None)
                .json(&json!({ "one_time_secret": one_time_secret })),
        )
        .await
    }

    pub async fn get_me(&self, token: &str) -> ApiResult<Me> {
        self.send(self.request(Method::GET, "/api/v1/me", Some(token)))
            .await
    }
}
