//! Transcript data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat exchange: the atomic unit of transcript growth
///
/// The user message and the generated bot response are always recorded
/// together, never as a dangling half-turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// What the user said
    pub user_message: String,
    /// What the bot answered
    pub bot_message: String,
    /// When the turn completed
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new turn stamped with the current time
    pub fn new(user_message: impl Into<String>, bot_message: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            bot_message: bot_message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// A user's full ordered chat history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Owning username
    pub username: String,
    /// Turns in chronological order
    pub turns: Vec<Turn>,
    /// Transcript creation time
    pub created_at: DateTime<Utc>,
    /// Last append time
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Create a new empty transcript
    pub fn new(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            turns: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a completed turn
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.updated_at = Utc::now();
    }

    /// The most recent `max_turns` turns, oldest first
    pub fn recent(&self, max_turns: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(max_turns);
        &self.turns[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_creation() {
        let transcript = Transcript::new("alice");
        assert_eq!(transcript.username, "alice");
        assert!(transcript.turns.is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut transcript = Transcript::new("alice");
        transcript.append(Turn::new("first", "reply one"));
        transcript.append(Turn::new("second", "reply two"));

        assert_eq!(transcript.turns.len(), 2);
        assert_eq!(transcript.turns[0].user_message, "first");
        assert_eq!(transcript.turns[1].user_message, "second");
    }

    #[test]
    fn test_recent_window() {
        let mut transcript = Transcript::new("alice");
        for i in 0..60 {
            transcript.append(Turn::new(format!("message {}", i), "ok"));
        }

        let recent = transcript.recent(25);
        assert_eq!(recent.len(), 25);
        assert_eq!(recent[0].user_message, "message 35");
        assert_eq!(recent[24].user_message, "message 59");
    }
}
