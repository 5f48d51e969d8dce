//! Core types and services for solace
//!
//! This crate provides the foundational pieces used by all other solace
//! components: the error taxonomy, configuration, logging bootstrap, the
//! login-session table, and transcript persistence.

pub mod config;
pub mod error;
pub mod logging;
pub mod session;
pub mod transcript;
pub mod utils;

pub use error::{Error, Result};
