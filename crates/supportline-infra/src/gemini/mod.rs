//! Google Gemini session client.
//!
//! This module provides the [`GeminiClient`] which implements the
//! [`SessionFactory`](supportline_core::session::SessionFactory) port on top
//! of the `generateContent` REST endpoint.

pub mod client;
pub mod types;

pub use client::{GeminiChatSession, GeminiClient};
