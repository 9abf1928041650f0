//! Interactive terminal chat against a running relay server.
//!
//! Drives the same transcript state container as the browser page and
//! renders it as left/right aligned bubbles. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod input;
pub mod loop_runner;
pub mod renderer;
