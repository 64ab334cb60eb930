use tracing::warn;

use super::questionnaire::{ScoreLevel, QUESTION_COUNT};

/// Strict session delta. This is the ONLY way a session mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionDelta {
    Reset,
    CandidateProposed(ScoreLevel),
    CandidateConfirmed,
    CandidateRejected,
}

/// Per-run questionnaire state.
///
/// The current question index is the number of confirmed answers, and the
/// session is awaiting confirmation exactly when a candidate is pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    confirmed: Vec<ScoreLevel>,
    pending: Option<ScoreLevel>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirmed(&self) -> &[ScoreLevel] {
        &self.confirmed
    }

    pub fn pending(&self) -> Option<ScoreLevel> {
        self.pending
    }

    pub fn current_question(&self) -> usize {
        self.confirmed.len()
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.confirmed.len() >= QUESTION_COUNT
    }

    /// Pure reduction: Session + Delta -> Mutated Session.
    /// Deltas that would break an invariant are dropped.
    pub fn reduce(&mut self, delta: SessionDelta) {
        match delta {
            SessionDelta::Reset => {
                self.confirmed.clear();
                self.pending = None;
            }
            SessionDelta::CandidateProposed(level) => {
                if self.is_finished() {
                    warn!(?level, "Candidate proposed after final question; ignored");
                    return;
                }
                self.pending = Some(level);
            }
            SessionDelta::CandidateConfirmed => match self.pending.take() {
                Some(level) => self.confirmed.push(level),
                None => warn!("Confirmation without a pending candidate; ignored"),
            },
            SessionDelta::CandidateRejected => {
                self.pending = None;
            }
        }
    }
}
