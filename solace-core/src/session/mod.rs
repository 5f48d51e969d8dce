//! Login sessions
//!
//! Binds opaque session handles to usernames. The handle is the sole
//! authority for identity resolution after login; no operation trusts a
//! client-supplied username once a session exists.

pub mod manager;

pub use manager::{Session, SessionManager};
