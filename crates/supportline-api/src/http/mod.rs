//! HTTP layer for Supportline.
//!
//! Axum router with the `/api/chat` relay endpoint, the browser chat page
//! and a health check.

pub mod error;
pub mod handlers;
pub mod router;
