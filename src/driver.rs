//! Async driver: executes kernel side effects against the speech ports and
//! feeds their completions back in as events.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::kernel::controller::DialogueController;
use crate::kernel::effect::SideEffect;
use crate::kernel::event::Event;
use crate::kernel::prompts;
use crate::ports::{SpeechError, SpeechInput, SpeechOutput, StatusDisplay};

// Internal driver messages (never touch the kernel directly)
#[derive(Debug)]
enum Inbound {
    Event(Event),
    /// Speech input disappeared mid-session; nothing further can be heard.
    InputLost(String),
}

/// Cloneable handle for the external "begin session" action.
#[derive(Debug, Clone)]
pub struct SessionTrigger {
    tx: mpsc::Sender<Inbound>,
}

impl SessionTrigger {
    pub async fn start(&self) -> Result<()> {
        self.tx
            .send(Inbound::Event(Event::Start))
            .await
            .map_err(|_| Error::ChannelClosed)
    }
}

pub struct Driver {
    controller: DialogueController,
    speaker: Arc<dyn SpeechOutput>,
    listener: Arc<dyn SpeechInput>,
    display: Arc<dyn StatusDisplay>,
    tx: mpsc::Sender<Inbound>,
    rx: mpsc::Receiver<Inbound>,
    tasks: JoinSet<()>,
    exit_on_complete: bool,
}

impl Driver {
    /// Fails with [`Error::CapabilityUnavailable`] when the environment has no
    /// speech input. The respondent is told once, via the display.
    pub fn new(
        speaker: Arc<dyn SpeechOutput>,
        listener: Arc<dyn SpeechInput>,
        display: Arc<dyn StatusDisplay>,
        config: &Config,
    ) -> Result<Self> {
        config.validate()?;

        if !listener.is_supported() {
            error!("Speech input unsupported; questionnaire disabled");
            display.show_status(prompts::STATUS_INPUT_UNSUPPORTED);
            return Err(Error::CapabilityUnavailable("speech input".to_string()));
        }

        let (tx, rx) = mpsc::channel(config.event_capacity);
        Ok(Self {
            controller: DialogueController::new(),
            speaker,
            listener,
            display,
            tx,
            rx,
            tasks: JoinSet::new(),
            exit_on_complete: config.exit_on_complete,
        })
    }

    pub fn trigger(&self) -> SessionTrigger {
        SessionTrigger { tx: self.tx.clone() }
    }

    pub fn controller(&self) -> &DialogueController {
        &self.controller
    }

    /// Runs until the session completes (when `exit_on_complete`), the
    /// environment cancels `shutdown`, or speech input is lost.
    /// Returns the controller so callers can read the assessment and telemetry.
    pub async fn run(mut self, shutdown: CancellationToken) -> Result<DialogueController> {
        info!("Dialogue driver started");

        let outcome = loop {
            // Reap finished speak/listen tasks.
            while self.tasks.try_join_next().is_some() {}

            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("Shutdown requested; abandoning session");
                    break Ok(());
                }
                msg = self.rx.recv() => match msg {
                    Some(Inbound::Event(event)) => {
                        let effects = self.controller.handle(event);
                        for effect in effects {
                            self.execute(effect);
                        }
                        if self.exit_on_complete && self.controller.is_complete() {
                            break Ok(());
                        }
                    }
                    Some(Inbound::InputLost(reason)) => {
                        error!(%reason, "Speech input lost");
                        self.display.show_status(prompts::STATUS_INPUT_UNSUPPORTED);
                        break Err(Error::CapabilityUnavailable(reason));
                    }
                    None => break Err(Error::ChannelClosed),
                }
            }
        };

        self.tasks.abort_all();
        outcome.map(|()| self.controller)
    }

    fn execute(&mut self, effect: SideEffect) {
        match effect {
            SideEffect::ShowStatus(text) => self.display.show_status(&text),
            SideEffect::Speak { id, text } => {
                let speaker = Arc::clone(&self.speaker);
                let tx = self.tx.clone();
                self.tasks.spawn(async move {
                    let event = match speaker.speak(&text).await {
                        Ok(()) => Event::SpeechFinished(id),
                        Err(e) => Event::SpeechFailed {
                            id,
                            reason: e.to_string(),
                        },
                    };
                    if tx.send(Inbound::Event(event)).await.is_err() {
                        debug!(?id, "Driver gone before speech completion");
                    }
                });
            }
            SideEffect::Listen { id } => {
                let listener = Arc::clone(&self.listener);
                let tx = self.tx.clone();
                self.tasks.spawn(async move {
                    let msg = match listener.listen().await {
                        Ok(transcript) => Inbound::Event(Event::Recognized { id, transcript }),
                        Err(SpeechError::Unsupported(reason)) => Inbound::InputLost(reason),
                        Err(SpeechError::Recognition(reason)) => {
                            Inbound::Event(Event::RecognitionFailed { id, reason })
                        }
                        Err(e) => Inbound::Event(Event::RecognitionFailed {
                            id,
                            reason: e.to_string(),
                        }),
                    };
                    if tx.send(msg).await.is_err() {
                        debug!(?id, "Driver gone before recognition result");
                    }
                });
            }
        }
    }
}
