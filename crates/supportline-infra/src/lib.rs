//! Infrastructure layer for Supportline.
//!
//! Contains implementations of the ports defined in `supportline-core`:
//! the Gemini `generateContent` session client, the HTTP transport used by
//! chat clients, plus config file loading and credential resolution.

pub mod config;
pub mod gemini;
pub mod secret;
pub mod transport;
