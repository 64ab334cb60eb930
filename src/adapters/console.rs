use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::ports::{SpeechError, SpeechInput, SpeechOutput, StatusDisplay};

/// Prints status lines to stdout.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl StatusDisplay for ConsoleDisplay {
    fn show_status(&self, text: &str) {
        println!("[STATUS] {text}");
    }
}

/// Text-only stand-in used when no speech command is installed.
#[derive(Debug, Default)]
pub struct ConsoleSpeaker;

#[async_trait]
impl SpeechOutput for ConsoleSpeaker {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        println!("[SPEAK] {text}");
        Ok(())
    }
}

/// Treats each typed line as one recognized utterance.
pub struct StdinListener {
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl StdinListener {
    pub fn new() -> Self {
        Self {
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }
}

impl Default for StdinListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechInput for StdinListener {
    async fn listen(&self) -> Result<String, SpeechError> {
        let mut lines = self.lines.lock().await;
        match lines.next_line().await? {
            Some(line) if line.trim().is_empty() => Err(SpeechError::Recognition("no-speech".to_string())),
            Some(line) => Ok(line.trim().to_string()),
            // EOF: nothing more can ever be heard.
            None => Err(SpeechError::Unsupported("standard input closed".to_string())),
        }
    }
}
