use serde::{Deserialize, Serialize};

use crate::kernel::questionnaire::ScoreLevel;
use crate::kernel::scoring::SeverityBand;

// Allowed: indices, levels, totals, enums
// Forbidden: transcripts, failure reasons (may echo audio content)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    SessionStarted,
    QuestionAsked { index: usize },
    AnswerUnrecognized { index: usize },
    CandidateProposed { index: usize, level: ScoreLevel },
    ConfirmationAccepted { index: usize },
    ConfirmationRejected { index: usize },
    RecognitionFailed { index: usize },
    SpeechFailed,
    StaleEventDropped,
    SessionCompleted { total: u8, band: SeverityBand },
}
