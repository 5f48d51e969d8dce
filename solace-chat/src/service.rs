//! Chat service: the turn processing engine

use std::sync::Arc;
use std::time::Duration;

use solace_core::session::SessionManager;
use solace_core::transcript::{TranscriptStore, Turn};
use solace_core::utils::truncate;
use solace_core::{Error, Result};
use solace_responder::{Message, Responder};
use tracing::{debug, info, warn};

/// Tunables for turn processing
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Prior turns handed to the responder as context
    pub context_turns: usize,
    /// Upper bound on one generation call
    pub generation_timeout: Duration,
    /// Persona preamble sent as the system message
    pub system_prompt: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            context_turns: 25,
            generation_timeout: Duration::from_secs(30),
            system_prompt: None,
        }
    }
}

/// Drives chat turns end-to-end and serves transcript reads
pub struct ChatService {
    sessions: Arc<SessionManager>,
    transcripts: Arc<TranscriptStore>,
    responder: Arc<dyn Responder>,
    config: ChatConfig,
}

impl ChatService {
    /// Create a new chat service
    pub fn new(
        sessions: Arc<SessionManager>,
        transcripts: Arc<TranscriptStore>,
        responder: Arc<dyn Responder>,
        config: ChatConfig,
    ) -> Self {
        Self {
            sessions,
            transcripts,
            responder,
            config,
        }
    }

    /// Process one chat turn for the session behind `handle`.
    ///
    /// The turn is recorded only after the responder produced a reply; a
    /// generation failure or timeout leaves the transcript exactly as it
    /// was.
    pub async fn submit_turn(&self, handle: &str, user_message: &str) -> Result<String> {
        let username = self.sessions.resolve(handle)?;

        if user_message.trim().is_empty() {
            return Err(Error::InvalidMessage(
                "message must not be empty".to_string(),
            ));
        }

        debug!(
            "Processing turn for {}: {}",
            username,
            truncate(user_message, 80)
        );

        let messages = self.build_context(&username, user_message)?;
        let bot_message = match tokio::time::timeout(
            self.config.generation_timeout,
            self.responder.respond(messages),
        )
        .await
        {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!("Responder failed for {}: {}", username, e);
                return Err(Error::GenerationUnavailable(e.to_string()));
            }
            Err(_) => {
                warn!(
                    "Responder timed out for {} after {:?}",
                    username, self.config.generation_timeout
                );
                return Err(Error::GenerationUnavailable(format!(
                    "timed out after {:?}",
                    self.config.generation_timeout
                )));
            }
        };

        let turn = Turn::new(user_message, &bot_message);
        self.transcripts.append_turn(&username, &turn)?;
        info!(
            username = %username,
            user_chars = user_message.chars().count(),
            bot_chars = bot_message.chars().count(),
            "Recorded chat turn"
        );

        Ok(bot_message)
    }

    /// The full transcript for the session behind `handle`, oldest turn
    /// first. Zero prior turns is an empty list, not an error.
    pub async fn history(&self, handle: &str) -> Result<(String, Vec<Turn>)> {
        let username = self.sessions.resolve(handle)?;
        let turns = self.transcripts.history(&username)?;
        Ok((username, turns))
    }

    /// Build the responder input: system preamble, a bounded window of
    /// prior turns, then the current message
    fn build_context(&self, username: &str, user_message: &str) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        if let Some(prompt) = &self.config.system_prompt {
            messages.push(Message::system(prompt));
        }

        let transcript = self.transcripts.load(username)?;
        for turn in transcript.recent(self.config.context_turns) {
            messages.push(Message::user(&turn.user_message));
            messages.push(Message::assistant(&turn.bot_message));
        }

        messages.push(Message::user(user_message));
        Ok(messages)
    }
}
