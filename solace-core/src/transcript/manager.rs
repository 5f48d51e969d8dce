//! Transcript persistence

use chrono::Utc;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use super::store::{Transcript, Turn};
use crate::utils::safe_filename;

/// Durable per-user transcript storage
///
/// One JSONL file per username: a metadata header line followed by one
/// complete record per turn. Appends and reads for the same user are
/// serialized by a per-user lock, so a half-written turn is never
/// observable. Different users proceed independently.
#[derive(Debug)]
pub struct TranscriptStore {
    /// Transcripts directory
    transcripts_dir: PathBuf,
    /// Per-user append/read locks
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TranscriptStore {
    /// Create a new transcript store rooted at `workspace`
    pub fn new<P: AsRef<Path>>(workspace: P) -> Self {
        let transcripts_dir = workspace.as_ref().join("transcripts");
        Self {
            transcripts_dir,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Append a completed turn to the user's transcript, creating the
    /// transcript on first use
    pub fn append_turn(&self, username: &str, turn: &Turn) -> crate::Result<()> {
        let lock = self.user_lock(username);
        let _guard = lock.lock();

        std::fs::create_dir_all(&self.transcripts_dir)?;
        let path = self.transcript_path(username);

        // The turn is buffered into a single write so no reader under the
        // same lock discipline can see half a record
        let mut buf = String::new();
        if !path.exists() {
            debug!("Creating transcript for {}", username);
            let metadata = serde_json::json!({
                "_type": "metadata",
                "username": username,
                "created_at": Utc::now().to_rfc3339(),
            });
            buf.push_str(&serde_json::to_string(&metadata)?);
            buf.push('\n');
        }
        buf.push_str(&serde_json::to_string(turn)?);
        buf.push('\n');

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        file.write_all(buf.as_bytes())?;
        Ok(())
    }

    /// Load a user's full transcript; a user with no recorded turns gets
    /// an empty one
    pub fn load(&self, username: &str) -> crate::Result<Transcript> {
        let lock = self.user_lock(username);
        let _guard = lock.lock();

        let path = self.transcript_path(username);
        let mut transcript = Transcript::new(username);
        if !path.exists() {
            return Ok(transcript);
        }

        let content = std::fs::read_to_string(&path)?;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Ok(value) = serde_json::from_str::<serde_json::Value>(line) {
                if value.get("_type").and_then(|v| v.as_str()) == Some("metadata") {
                    if let Some(created) = value
                        .get("created_at")
                        .and_then(|v| v.as_str())
                        .and_then(|s| s.parse().ok())
                    {
                        transcript.created_at = created;
                    }
                } else if let Ok(turn) = serde_json::from_value::<Turn>(value) {
                    transcript.append(turn);
                }
            }
        }

        if let Some(last) = transcript.turns.last() {
            transcript.updated_at = last.timestamp;
        }
        Ok(transcript)
    }

    /// A user's turns in chronological order; empty for a user who has
    /// never chatted
    pub fn history(&self, username: &str) -> crate::Result<Vec<Turn>> {
        Ok(self.load(username)?.turns)
    }

    /// Usernames with a transcript on disk
    pub fn list_users(&self) -> Vec<String> {
        let mut users = Vec::new();

        if let Ok(entries) = std::fs::read_dir(&self.transcripts_dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
                    continue;
                }
                // The filename is sanitized, so the username comes from the
                // metadata header instead
                if let Ok(content) = std::fs::read_to_string(&path) {
                    if let Some(first_line) = content.lines().next() {
                        if let Ok(value) = serde_json::from_str::<serde_json::Value>(first_line) {
                            if value.get("_type").and_then(|v| v.as_str()) == Some("metadata") {
                                if let Some(username) =
                                    value.get("username").and_then(|v| v.as_str())
                                {
                                    users.push(username.to_string());
                                }
                            }
                        }
                    }
                }
            }
        }

        users.sort();
        users
    }

    fn user_lock(&self, username: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(username.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn transcript_path(&self, username: &str) -> PathBuf {
        self.transcripts_dir
            .join(format!("{}.jsonl", safe_filename(username)))
    }
}
