use serde::{Deserialize, Serialize};

use super::questionnaire::ScoreLevel;

/// What the next recognized utterance will be interpreted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expect {
    Answer,
    Confirmation,
}

/// The explicit turn-taking states of the dialogue.
///
/// `Speaking*` variants wait on a speak completion, `Listening` waits on a
/// recognition result or error. `Idle` and `Complete` have nothing in flight
/// and only react to `Event::Start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DialogueState {
    #[default]
    Idle,
    SpeakingIntro,
    Speaking(usize),
    Listening(Expect, usize),
    SpeakingRetryPrompt(usize),
    SpeakingConfirmPrompt(usize, ScoreLevel),
    SpeakingRepeatRequest(usize),
    /// Apology after a recognition failure; resumes the interrupted listen.
    SpeakingApology(Expect, usize),
    SpeakingSummary,
    Complete,
}

impl DialogueState {
    pub fn is_listening(&self) -> bool {
        matches!(self, DialogueState::Listening(..))
    }

    pub fn is_speaking(&self) -> bool {
        matches!(
            self,
            DialogueState::SpeakingIntro
                | DialogueState::Speaking(_)
                | DialogueState::SpeakingRetryPrompt(_)
                | DialogueState::SpeakingConfirmPrompt(..)
                | DialogueState::SpeakingRepeatRequest(_)
                | DialogueState::SpeakingApology(..)
                | DialogueState::SpeakingSummary
        )
    }
}
