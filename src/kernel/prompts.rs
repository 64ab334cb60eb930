//! Fixed utterances and status lines.

use super::questionnaire::ScoreLevel;
use super::scoring::Assessment;

pub const INTRO: &str = "Hello, I'm here to help you assess your mood. Let's begin.";
pub const RETRY: &str = "I'm sorry, I didn't understand your response. Please repeat.";
pub const REPEAT_REQUEST: &str = "Please repeat your response to the question.";
pub const APOLOGY: &str = "There was an error. Please try again.";

pub const STATUS_LISTENING: &str = "Listening...";
pub const STATUS_INPUT_UNSUPPORTED: &str =
    "Speech recognition is not supported in this environment. The questionnaire cannot start.";

pub fn confirm(level: ScoreLevel) -> String {
    format!("So, you feel it is \"{}\". Is that accurate? Please say yes or no.", level.phrase())
}

pub fn summary(assessment: &Assessment) -> String {
    format!("Thank you for completing the assessment. {}", assessment.guidance())
}

pub fn status_heard(transcript: &str) -> String {
    format!("You said: {transcript}")
}

pub fn status_recognition_error(reason: &str) -> String {
    format!("Error occurred in recognition: {reason}")
}

pub fn status_speech_error(reason: &str) -> String {
    format!("Speech output failed: {reason}")
}

pub fn status_result(assessment: &Assessment) -> String {
    format!(
        "PHQ-9 score {} of {}: {}. {}",
        assessment.total,
        super::scoring::MAX_TOTAL,
        assessment.band.label(),
        assessment.guidance()
    )
}
