// src/core/mod.rs

/// Request and response shapes plus the severity presentation mapping.
pub mod models;

/// Pasted text and attached `.eml` file, and whether either can be submitted.
pub mod input;

/// HTTP client for the remote analysis service.
pub mod client;

/// Tick-driven scanning and results animation state.
pub mod animation;
