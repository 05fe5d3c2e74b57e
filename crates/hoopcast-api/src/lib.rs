//! Axum HTTP API server.
//!
//! This crate provides:
//! - Commentary, audio and full-pipeline endpoints over the vendor clients
//! - Per-IP rate limiting and security headers
//! - Prometheus metrics

pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{Commentary, CommentaryPipeline, Commentator};
pub use state::AppState;
