//! HTTP server for the domain-suggest API.
//!
//! The server exposes three routes: the suggestion endpoint itself plus two
//! static liveness probes. Everything stateful — the availability checker
//! with its shared rate budget and result cache — lives in [`state::AppState`]
//! and is injected into handlers through axum's state extractor.

pub mod handlers;
pub mod routes;
pub mod state;
