//! Chat turn engine for solace
//!
//! Drives one chat turn end-to-end: session resolution, input validation,
//! bounded response generation, and the atomic transcript append.

pub mod service;

pub use service::{ChatConfig, ChatService};
