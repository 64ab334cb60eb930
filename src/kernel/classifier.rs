use super::questionnaire::ScoreLevel;

/// Keyword sets tested in this order; the first set with a substring hit wins.
/// "no" under `NotAtAll` shadows any later set, so "no, sometimes" scores 0.
const ANSWER_KEYWORDS: [(ScoreLevel, &[&str]); 4] = [
    (ScoreLevel::NotAtAll, &["not at all", "never", "no"]),
    (ScoreLevel::SeveralDays, &["several days", "sometimes", "a little"]),
    (ScoreLevel::MoreThanHalfTheDays, &["more than half", "often", "frequently"]),
    (ScoreLevel::NearlyEveryDay, &["nearly every day", "always", "all the time"]),
];

const AFFIRMATIVE: &str = "yes";

/// Result of interpreting a free-form answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Scored(ScoreLevel),
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Affirmative,
    Negative,
}

/// PURE FUNCTION: maps a transcript to a score by ordered keyword containment.
pub fn classify_answer(transcript: &str) -> Answer {
    let text = transcript.to_lowercase();

    ANSWER_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map_or(Answer::Unrecognized, |(level, _)| Answer::Scored(*level))
}

/// PURE FUNCTION: anything without "yes" in it is a rejection, including silence.
pub fn classify_confirmation(transcript: &str) -> Confirmation {
    if transcript.to_lowercase().contains(AFFIRMATIVE) {
        Confirmation::Affirmative
    } else {
        Confirmation::Negative
    }
}
