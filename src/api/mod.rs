// ABOUTME: Typed HTTP access to the MechtaAI backend

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{ApiError, ApiErrorBody, ApiResponse, ApiResult, Paged, Pagination};
