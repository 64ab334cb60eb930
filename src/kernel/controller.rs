use tracing::{debug, info, warn};

use super::classifier::{classify_answer, classify_confirmation, Answer, Confirmation};
use super::effect::SideEffect;
use super::event::{Event, RequestId, RequestKind};
use super::prompts;
use super::questionnaire::question;
use super::scoring::{assess, Assessment};
use super::session::{Session, SessionDelta};
use super::state::{DialogueState, Expect};
use super::telemetry::event::TelemetryEvent;
use super::telemetry::recorder::TelemetryRecorder;

/// The single request in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Outstanding {
    id: RequestId,
    kind: RequestKind,
}

/// How an inbound completion relates to the request slot.
enum Admission {
    Current,
    /// Result of a request issued before the latest `Start`.
    Superseded,
    Stale,
}

/// Turn-taking state machine for one respondent.
///
/// **KERNEL LAW**: at most one speak or listen request is outstanding at any
/// time, and a new one is only issued while handling the completion of the
/// previous one (or a `Start` with nothing in flight).
#[derive(Debug, Default)]
pub struct DialogueController {
    state: DialogueState,
    session: Session,
    outstanding: Option<Outstanding>,
    last_request: RequestId,
    // Start arrived while a request was in flight; intro waits for it.
    restart_pending: bool,
    assessment: Option<Assessment>,
    pub telemetry: TelemetryRecorder,
}

impl DialogueController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn outstanding(&self) -> Option<RequestId> {
        self.outstanding.map(|o| o.id)
    }

    /// Final report of the most recent completed session.
    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.state == DialogueState::Complete
    }

    /// Pure step: advances state for one event and returns the side effects
    /// the driver must execute. MUST NOT await I/O or timers.
    pub fn handle(&mut self, event: Event) -> Vec<SideEffect> {
        let mut effects = Vec::new();

        if event == Event::Start {
            self.start(&mut effects);
            return effects;
        }

        let (Some(id), Some(kind)) = (event.request_id(), event.request_kind()) else {
            return effects;
        };

        match self.admit(Outstanding { id, kind }) {
            Admission::Stale => {
                debug!(?id, ?kind, state = ?self.state, "Dropping stale completion");
                self.telemetry.record(TelemetryEvent::StaleEventDropped);
            }
            Admission::Superseded => {
                debug!(?id, "Discarding completion from before restart");
                self.restart_pending = false;
                self.speak(prompts::INTRO.to_string(), DialogueState::SpeakingIntro, &mut effects);
            }
            Admission::Current => match event {
                Event::SpeechFinished(_) => self.on_speech_finished(&mut effects),
                Event::SpeechFailed { reason, .. } => {
                    warn!(%reason, state = ?self.state, "Speech output failed");
                    self.telemetry.record(TelemetryEvent::SpeechFailed);
                    effects.push(SideEffect::ShowStatus(prompts::status_speech_error(&reason)));
                    self.on_speech_finished(&mut effects);
                }
                Event::Recognized { transcript, .. } => self.on_recognized(&transcript, &mut effects),
                Event::RecognitionFailed { reason, .. } => {
                    self.on_recognition_failed(&reason, &mut effects)
                }
                Event::Start => {}
            },
        }

        effects
    }

    /// Batch form of [`handle`](Self::handle), for drivers that drain a queue per step.
    pub fn tick_step(&mut self, events: Vec<Event>) -> Vec<SideEffect> {
        events.into_iter().flat_map(|e| self.handle(e)).collect()
    }

    /// Frees the request slot only for a completion matching both the id and
    /// the port of the request in flight.
    fn admit(&mut self, completion: Outstanding) -> Admission {
        if self.outstanding != Some(completion) {
            return Admission::Stale;
        }
        self.outstanding = None;
        if self.restart_pending {
            Admission::Superseded
        } else {
            Admission::Current
        }
    }

    fn start(&mut self, effects: &mut Vec<SideEffect>) {
        info!(previous = ?self.state, "Starting new PHQ-9 session");
        self.session.reduce(SessionDelta::Reset);
        self.assessment = None;
        // A repeated Start while the restart is still waiting is the same session.
        if !self.restart_pending {
            self.telemetry.record(TelemetryEvent::SessionStarted);
        }

        if self.outstanding.is_some() {
            // Cannot issue the intro until the in-flight request reports back.
            self.restart_pending = true;
            self.state = DialogueState::Idle;
        } else {
            self.speak(prompts::INTRO.to_string(), DialogueState::SpeakingIntro, effects);
        }
    }

    fn on_speech_finished(&mut self, effects: &mut Vec<SideEffect>) {
        match self.state {
            DialogueState::SpeakingIntro => self.ask_current(effects),
            DialogueState::Speaking(i)
            | DialogueState::SpeakingRetryPrompt(i)
            | DialogueState::SpeakingRepeatRequest(i) => self.listen(Expect::Answer, i, effects),
            DialogueState::SpeakingConfirmPrompt(i, _) => self.listen(Expect::Confirmation, i, effects),
            DialogueState::SpeakingApology(expect, i) => self.listen(expect, i, effects),
            DialogueState::SpeakingSummary => {
                info!("Session complete");
                self.state = DialogueState::Complete;
            }
            other => debug!(state = ?other, "Speech completion with nothing to resume"),
        }
    }

    fn on_recognized(&mut self, transcript: &str, effects: &mut Vec<SideEffect>) {
        debug!(%transcript, state = ?self.state, "Recognized");
        effects.push(SideEffect::ShowStatus(prompts::status_heard(transcript)));

        match self.state {
            DialogueState::Listening(Expect::Answer, i) => match classify_answer(transcript) {
                Answer::Unrecognized => {
                    info!(question = i + 1, "Answer not recognized; asking again");
                    self.telemetry.record(TelemetryEvent::AnswerUnrecognized { index: i });
                    self.speak(prompts::RETRY.to_string(), DialogueState::SpeakingRetryPrompt(i), effects);
                }
                Answer::Scored(level) => {
                    info!(question = i + 1, score = level.value(), "Candidate answer");
                    self.session.reduce(SessionDelta::CandidateProposed(level));
                    self.telemetry.record(TelemetryEvent::CandidateProposed { index: i, level });
                    self.speak(
                        prompts::confirm(level),
                        DialogueState::SpeakingConfirmPrompt(i, level),
                        effects,
                    );
                }
            },
            DialogueState::Listening(Expect::Confirmation, i) => match classify_confirmation(transcript) {
                Confirmation::Affirmative => {
                    info!(question = i + 1, "Answer confirmed");
                    self.session.reduce(SessionDelta::CandidateConfirmed);
                    self.telemetry.record(TelemetryEvent::ConfirmationAccepted { index: i });
                    self.ask_current(effects);
                }
                Confirmation::Negative => {
                    info!(question = i + 1, "Answer rejected; re-answering");
                    self.session.reduce(SessionDelta::CandidateRejected);
                    self.telemetry.record(TelemetryEvent::ConfirmationRejected { index: i });
                    self.speak(
                        prompts::REPEAT_REQUEST.to_string(),
                        DialogueState::SpeakingRepeatRequest(i),
                        effects,
                    );
                }
            },
            other => debug!(state = ?other, "Transcript outside a listening turn; ignored"),
        }
    }

    fn on_recognition_failed(&mut self, reason: &str, effects: &mut Vec<SideEffect>) {
        let DialogueState::Listening(expect, i) = self.state else {
            debug!(state = ?self.state, "Recognition failure outside a listening turn; ignored");
            return;
        };
        warn!(%reason, question = i + 1, ?expect, "Recognition failed; retrying turn");
        self.telemetry.record(TelemetryEvent::RecognitionFailed { index: i });
        effects.push(SideEffect::ShowStatus(prompts::status_recognition_error(reason)));
        self.speak(prompts::APOLOGY.to_string(), DialogueState::SpeakingApology(expect, i), effects);
    }

    /// Asks the question at the session's current index, or scores the
    /// session once every question is confirmed.
    fn ask_current(&mut self, effects: &mut Vec<SideEffect>) {
        let i = self.session.current_question();
        match question(i) {
            Some(text) => {
                info!(question = i + 1, "Asking question");
                self.telemetry.record(TelemetryEvent::QuestionAsked { index: i });
                self.speak(text.to_string(), DialogueState::Speaking(i), effects);
            }
            None => self.finish(effects),
        }
    }

    fn finish(&mut self, effects: &mut Vec<SideEffect>) {
        let assessment = assess(self.session.confirmed());
        info!(total = assessment.total, band = assessment.band.label(), "Questionnaire scored");
        self.telemetry.record(TelemetryEvent::SessionCompleted {
            total: assessment.total,
            band: assessment.band,
        });
        self.assessment = Some(assessment);

        effects.push(SideEffect::ShowStatus(prompts::status_result(&assessment)));
        self.speak(prompts::summary(&assessment), DialogueState::SpeakingSummary, effects);
    }

    fn issue(&mut self, kind: RequestKind) -> RequestId {
        debug_assert!(
            self.outstanding.is_none(),
            "request issued while {:?} is outstanding",
            self.outstanding
        );
        self.last_request = self.last_request.next();
        self.outstanding = Some(Outstanding {
            id: self.last_request,
            kind,
        });
        self.last_request
    }

    fn speak(&mut self, text: String, next: DialogueState, effects: &mut Vec<SideEffect>) {
        let id = self.issue(RequestKind::Speak);
        self.state = next;
        effects.push(SideEffect::Speak { id, text });
    }

    fn listen(&mut self, expect: Expect, index: usize, effects: &mut Vec<SideEffect>) {
        let id = self.issue(RequestKind::Listen);
        self.state = DialogueState::Listening(expect, index);
        effects.push(SideEffect::Listen { id });
        effects.push(SideEffect::ShowStatus(prompts::STATUS_LISTENING.to_string()));
    }
}
