//! Speech port: trait abstraction for the speak / listen / display collaborators.
//!
//! # Design Rules
//!
//! - Every call is single-shot. `listen` yields at most one transcript and must
//!   be called again for the next turn.
//! - Voice selection is an adapter concern; `speak` only promises that the text
//!   is played and that the future resolves when playback ends.

use async_trait::async_trait;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SpeechError {
    /// The capability does not exist in this environment.
    #[error("Speech capability unsupported: {0}")]
    Unsupported(String),

    /// Recognition ran but produced no usable result (no-speech, aborted, network).
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// Synthesis could not play the utterance.
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// ── Port traits ───────────────────────────────────────────────────────────────

/// Text-to-speech collaborator.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    /// Whether utterances can actually be played. Adapters that probe their
    /// backend report the probe result here.
    fn is_available(&self) -> bool {
        true
    }

    /// Speak `text`; resolves when the utterance has finished.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Speech-to-text collaborator.
#[async_trait]
pub trait SpeechInput: Send + Sync {
    /// Whether recognition exists at all here. Checked once at startup.
    fn is_supported(&self) -> bool {
        true
    }

    /// Listen for one utterance and return its transcript.
    async fn listen(&self) -> Result<String, SpeechError>;
}

/// Fire-and-forget status sink.
pub trait StatusDisplay: Send + Sync {
    fn show_status(&self, text: &str);
}
