use serde::{Deserialize, Serialize};

/// Number of items in the questionnaire. A session is complete once this many
/// answers have been confirmed.
pub const QUESTION_COUNT: usize = 9;

/// The PHQ-9 items, in administration order. Index is identity.
pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "Over the last two weeks, how often have you been bothered by little interest or pleasure in doing things?",
    "Over the last two weeks, how often have you been bothered by feeling down, depressed, or hopeless?",
    "Over the last two weeks, how often have you been bothered by trouble falling or staying asleep, or sleeping too much?",
    "Over the last two weeks, how often have you been bothered by feeling tired or having little energy?",
    "Over the last two weeks, how often have you been bothered by poor appetite or overeating?",
    "Over the last two weeks, how often have you been bothered by feeling bad about yourself — or that you are a failure or have let yourself or your family down?",
    "Over the last two weeks, how often have you been bothered by trouble concentrating on things, such as reading the newspaper or watching television?",
    "Over the last two weeks, how often have you been bothered by moving or speaking so slowly that other people could have noticed, or being so fidgety or restless that you have been moving around a lot more than usual?",
    "Over the last two weeks, how often have you been bothered by thoughts that you would be better off dead, or of hurting yourself in some way?",
];

/// Returns the prompt for `index`, or `None` once the questionnaire is exhausted.
pub fn question(index: usize) -> Option<&'static str> {
    QUESTIONS.get(index).copied()
}

/// Ordinal frequency rating for a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreLevel {
    NotAtAll,
    SeveralDays,
    MoreThanHalfTheDays,
    NearlyEveryDay,
}

impl ScoreLevel {
    pub const ALL: [ScoreLevel; 4] = [
        ScoreLevel::NotAtAll,
        ScoreLevel::SeveralDays,
        ScoreLevel::MoreThanHalfTheDays,
        ScoreLevel::NearlyEveryDay,
    ];

    pub fn value(self) -> u8 {
        match self {
            ScoreLevel::NotAtAll => 0,
            ScoreLevel::SeveralDays => 1,
            ScoreLevel::MoreThanHalfTheDays => 2,
            ScoreLevel::NearlyEveryDay => 3,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Canonical phrase quoted back to the respondent during confirmation.
    pub fn phrase(self) -> &'static str {
        match self {
            ScoreLevel::NotAtAll => "Not at all",
            ScoreLevel::SeveralDays => "Several days",
            ScoreLevel::MoreThanHalfTheDays => "More than half the days",
            ScoreLevel::NearlyEveryDay => "Nearly every day",
        }
    }
}
