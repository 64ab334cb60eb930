//! Speech output through an external command such as macOS `say`.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::ports::{SpeechError, SpeechOutput};

/// Spawns `<command> [-v <voice>] <text>` per utterance and waits for it to exit.
#[derive(Debug, Clone)]
pub struct SayCommand {
    command: String,
    voice: Option<String>,
    available: bool,
}

impl SayCommand {
    pub fn new(command: impl Into<String>, voice: Option<String>) -> Self {
        Self {
            command: command.into(),
            voice,
            available: true,
        }
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    /// Checks that `command` runs and resolves `preferred` against its voice
    /// list. A missing command yields an instance with `is_available() == false`.
    pub async fn probe(command: &str, preferred: Option<&str>) -> Self {
        let output = match Command::new(command).args(["-v", "?"]).output().await {
            Ok(output) => output,
            Err(e) => {
                warn!(%command, error = %e, "Speech command unavailable");
                return Self {
                    available: false,
                    ..Self::new(command, None)
                };
            }
        };

        let listing = String::from_utf8_lossy(&output.stdout);
        let voices = parse_voice_list(&listing);
        debug!(count = voices.len(), "Discovered voices");

        let voice = preferred.and_then(|p| select_voice(&voices, p));
        match (preferred, &voice) {
            (Some(p), None) => warn!(preferred = %p, "Voice not installed; using system default"),
            (_, Some(v)) => info!(voice = %v, "Using voice"),
            (None, None) => info!("Using system default voice"),
        }
        Self::new(command, voice)
    }

    fn args<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        match &self.voice {
            Some(voice) => vec!["-v", voice.as_str(), text],
            None => vec![text],
        }
    }
}

#[async_trait]
impl SpeechOutput for SayCommand {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        let status = Command::new(&self.command)
            .args(self.args(text))
            .kill_on_drop(true)
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Synthesis(format!("{} exited with {status}", self.command)))
        }
    }
}

/// Parses `say -v ?` output: `<name> <locale> # <sample>` per line. Names may
/// contain spaces, the locale never does.
pub fn parse_voice_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| {
            let head = line.split('#').next()?.trim();
            let (name, _locale) = head.rsplit_once(char::is_whitespace)?;
            let name = name.trim();
            (!name.is_empty()).then(|| name.to_string())
        })
        .collect()
}

/// Case-insensitive exact match on the preferred name.
pub fn select_voice(available: &[String], preferred: &str) -> Option<String> {
    available
        .iter()
        .find(|v| v.eq_ignore_ascii_case(preferred.trim()))
        .cloned()
}
