// ABOUTME: Core data models mirroring the MechtaAI API schemas

pub mod auth;
pub mod wants;

pub use auth::{AuthTokens, LoginAttempt, LoginState, LoginStatus, Me, User};
pub use wants::{
    DraftStatus, FocusArea, StreamAppendResponse, StreamStartResponse, TopPain, TopWant,
    WantsAnalysis, WantsDraft, WantsPattern, WantsProgress,
};
