use serde::{Deserialize, Serialize};

use super::questionnaire::ScoreLevel;

pub const MAX_TOTAL: u8 = 27;

/// Severity summary of a completed questionnaire. Bounds are inclusive and
/// together cover 0..=27 without gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityBand {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 5] = [
        SeverityBand::Minimal,
        SeverityBand::Mild,
        SeverityBand::Moderate,
        SeverityBand::ModeratelySevere,
        SeverityBand::Severe,
    ];

    pub fn from_total(total: u8) -> Self {
        match total {
            0..=4 => SeverityBand::Minimal,
            5..=9 => SeverityBand::Mild,
            10..=14 => SeverityBand::Moderate,
            15..=19 => SeverityBand::ModeratelySevere,
            _ => SeverityBand::Severe,
        }
    }

    pub fn range(self) -> (u8, u8) {
        match self {
            SeverityBand::Minimal => (0, 4),
            SeverityBand::Mild => (5, 9),
            SeverityBand::Moderate => (10, 14),
            SeverityBand::ModeratelySevere => (15, 19),
            SeverityBand::Severe => (20, MAX_TOTAL),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Minimal => "minimal",
            SeverityBand::Mild => "mild",
            SeverityBand::Moderate => "moderate",
            SeverityBand::ModeratelySevere => "moderately severe",
            SeverityBand::Severe => "severe",
        }
    }

    pub fn guidance(self) -> &'static str {
        match self {
            SeverityBand::Minimal => "Your responses suggest minimal or no depression. Keep monitoring your mood and seek help if you notice any changes.",
            SeverityBand::Mild => "Your responses suggest mild depression. Consider talking to a mental health professional or a trusted person about your feelings.",
            SeverityBand::Moderate => "Your responses suggest moderate depression. It is recommended to seek help from a mental health professional.",
            SeverityBand::ModeratelySevere => "Your responses suggest moderately severe depression. Please seek help from a mental health professional as soon as possible.",
            SeverityBand::Severe => "Your responses suggest severe depression. It is crucial to seek immediate help from a mental health professional or a crisis hotline.",
        }
    }
}

/// Final report for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub total: u8,
    pub band: SeverityBand,
}

impl Assessment {
    pub fn guidance(&self) -> &'static str {
        self.band.guidance()
    }
}

/// PURE FUNCTION: sums confirmed levels and looks up the band.
pub fn assess(scores: &[ScoreLevel]) -> Assessment {
    let total = scores.iter().map(|s| s.value()).sum::<u8>();
    Assessment {
        total,
        band: SeverityBand::from_total(total),
    }
}
