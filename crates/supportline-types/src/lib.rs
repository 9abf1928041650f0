//! Shared domain types for Supportline.
//!
//! Transcript turns, the error taxonomy shared by the relay server and the
//! chat client, and the configuration file shape.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
