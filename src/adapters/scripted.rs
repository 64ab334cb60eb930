//! Deterministic collaborators for tests and offline runs.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::ports::{SpeechError, SpeechInput, SpeechOutput, StatusDisplay};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Replays a fixed sequence of recognition outcomes, one per `listen`.
///
/// Once the script runs out, `listen` never resolves, like a microphone that
/// never hears anything.
pub struct ScriptedListener {
    script: Mutex<VecDeque<Result<String, SpeechError>>>,
    supported: bool,
    calls: Mutex<usize>,
}

impl ScriptedListener {
    pub fn new<I, S>(transcripts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_results(transcripts.into_iter().map(|t| Ok(t.into())))
    }

    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<String, SpeechError>>,
    {
        Self {
            script: Mutex::new(results.into_iter().collect()),
            supported: true,
            calls: Mutex::new(0),
        }
    }

    /// A listener for an environment without speech recognition.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::from_results(std::iter::empty())
        }
    }

    pub fn calls(&self) -> usize {
        *lock(&self.calls)
    }

    pub fn remaining(&self) -> usize {
        lock(&self.script).len()
    }
}

#[async_trait]
impl SpeechInput for ScriptedListener {
    fn is_supported(&self) -> bool {
        self.supported
    }

    async fn listen(&self) -> Result<String, SpeechError> {
        *lock(&self.calls) += 1;
        let next = lock(&self.script).pop_front();
        match next {
            Some(result) => result,
            None => std::future::pending().await,
        }
    }
}

/// Records every utterance instead of playing it.
#[derive(Default)]
pub struct RecordingSpeaker {
    spoken: Mutex<Vec<String>>,
    fail_on: Option<String>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails (after recording) any utterance containing `needle`.
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            fail_on: Some(needle.into()),
            ..Self::default()
        }
    }

    pub fn spoken(&self) -> Vec<String> {
        lock(&self.spoken).clone()
    }
}

#[async_trait]
impl SpeechOutput for RecordingSpeaker {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        lock(&self.spoken).push(text.to_string());
        match &self.fail_on {
            Some(needle) if text.contains(needle.as_str()) => {
                Err(SpeechError::Synthesis("audio device busy".to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    lines: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn show_status(&self, text: &str) {
        lock(&self.lines).push(text.to_string());
    }
}
