use std::collections::VecDeque;

use serde::Serialize;

use super::event::TelemetryEvent;
use crate::kernel::scoring::Assessment;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetrySnapshot {
    pub sessions_started: u64,
    pub sessions_completed: u64,
    pub questions_asked: u64,
    pub unrecognized_answers: u64,
    pub candidates_proposed: u64,
    pub confirmations_accepted: u64,
    pub confirmations_rejected: u64,
    pub recognition_failures: u64,
    pub speech_failures: u64,
    pub stale_events: u64,
    /// Answer turns opened per confirmed answer (1.0 means no retries).
    /// A turn counts once opened, even if a restart abandons it.
    pub avg_attempts_per_answer: f64,
    pub last_assessment: Option<Assessment>,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::SessionStarted => snap.sessions_started += 1,
            TelemetryEvent::QuestionAsked { .. } => snap.questions_asked += 1,
            TelemetryEvent::AnswerUnrecognized { .. } => snap.unrecognized_answers += 1,
            TelemetryEvent::CandidateProposed { .. } => snap.candidates_proposed += 1,
            TelemetryEvent::ConfirmationAccepted { .. } => snap.confirmations_accepted += 1,
            TelemetryEvent::ConfirmationRejected { .. } => snap.confirmations_rejected += 1,
            TelemetryEvent::RecognitionFailed { .. } => snap.recognition_failures += 1,
            TelemetryEvent::SpeechFailed => snap.speech_failures += 1,
            TelemetryEvent::StaleEventDropped => snap.stale_events += 1,
            TelemetryEvent::SessionCompleted { total, band } => {
                snap.sessions_completed += 1;
                snap.last_assessment = Some(Assessment { total: *total, band: *band });
            }
        }
    }

    // Retries re-listen without re-asking, so they are not QuestionAsked events.
    let attempts = snap.questions_asked + snap.unrecognized_answers + snap.confirmations_rejected;
    if snap.confirmations_accepted > 0 {
        snap.avg_attempts_per_answer = attempts as f64 / snap.confirmations_accepted as f64;
    }

    snap
}
