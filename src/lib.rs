// ABOUTME: Library crate for mechta exposing the public API for testing and external use

#![allow(missing_docs)]

pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod models;
pub mod session;
pub mod wizard;
