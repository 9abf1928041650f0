//! Relay logic and client-side transcript handling for Supportline.
//!
//! This crate defines the ports (`ChatSession`, `SessionFactory`,
//! `TranscriptTransport`) that `supportline-infra` implements, the stateless
//! relay that replays a client transcript against a fresh remote session,
//! and the transcript state container driven by chat clients. It depends only
//! on `supportline-types` -- never on `supportline-infra` or any HTTP crate.

pub mod client;
pub mod decode;
pub mod prompt;
pub mod relay;
pub mod session;
pub mod transcript;
