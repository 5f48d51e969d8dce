//! Scripted responder with a fixed set of supportive replies

use async_trait::async_trait;

use crate::base::{Message, Responder, ResponderResult};

const BUILTIN_REPLIES: &[&str] = &[
    "I'm here for you. Would you like to talk more about it?",
    "That must be difficult. You're not alone.",
    "Take a deep breath. You're doing your best.",
];

/// Answers every message with one of a fixed set of supportive lines
///
/// Useful on its own for offline deployments and as the fallback half of
/// [`crate::FallbackResponder`].
#[derive(Debug, Clone)]
pub struct ScriptedResponder {
    replies: Vec<String>,
}

impl ScriptedResponder {
    /// Create a responder with the built-in reply set
    pub fn new() -> Self {
        Self {
            replies: BUILTIN_REPLIES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create a responder with a custom reply set; an empty set falls back
    /// to the built-in one
    pub fn with_replies(replies: Vec<String>) -> Self {
        if replies.is_empty() {
            Self::new()
        } else {
            Self { replies }
        }
    }

    /// Pick one reply at random
    pub fn pick(&self) -> String {
        self.replies[fastrand::usize(..self.replies.len())].clone()
    }
}

impl Default for ScriptedResponder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    async fn respond(&self, _messages: Vec<Message>) -> ResponderResult<String> {
        Ok(self.pick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reply_comes_from_the_script() {
        let responder = ScriptedResponder::new();
        let reply = responder
            .respond(vec![Message::user("I had a rough day")])
            .await
            .unwrap();
        assert!(BUILTIN_REPLIES.contains(&reply.as_str()));
    }

    #[test]
    fn test_custom_replies() {
        let responder = ScriptedResponder::with_replies(vec!["only line".to_string()]);
        assert_eq!(responder.pick(), "only line");
    }

    #[test]
    fn test_empty_reply_set_uses_builtins() {
        let responder = ScriptedResponder::with_replies(Vec::new());
        assert!(BUILTIN_REPLIES.contains(&responder.pick().as_str()));
    }
}
