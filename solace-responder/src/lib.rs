//! Response generation for solace
//!
//! This crate provides the boundary to the response generator: the
//! [`Responder`] trait, an HTTP client for OpenAI-compatible chat
//! completion endpoints, and a scripted responder for offline use.

pub mod base;
pub mod chat_api;
pub mod scripted;

pub use base::{Message, Responder, ResponderError, ResponderResult};
pub use chat_api::ChatClient;
pub use scripted::ScriptedResponder;

use async_trait::async_trait;
use std::sync::Arc;

/// A responder that substitutes a scripted line when the primary one
/// returns a blank reply
///
/// Errors from the primary are passed through untouched; only a
/// successful-but-empty answer triggers the fallback.
pub struct FallbackResponder {
    primary: Arc<dyn Responder>,
    fallback: ScriptedResponder,
}

impl FallbackResponder {
    /// Wrap a primary responder with the built-in fallback lines
    pub fn new(primary: Arc<dyn Responder>) -> Self {
        Self {
            primary,
            fallback: ScriptedResponder::new(),
        }
    }

    /// Wrap a primary responder with custom fallback lines
    pub fn with_replies(primary: Arc<dyn Responder>, replies: Vec<String>) -> Self {
        Self {
            primary,
            fallback: ScriptedResponder::with_replies(replies),
        }
    }
}

#[async_trait]
impl Responder for FallbackResponder {
    async fn respond(&self, messages: Vec<Message>) -> ResponderResult<String> {
        let reply = self.primary.respond(messages).await?;
        if reply.trim().is_empty() {
            Ok(self.fallback.pick())
        } else {
            Ok(reply)
        }
    }
}
