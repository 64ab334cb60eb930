/// Correlates a speak/listen request with its completion event.
/// Monotonic within a controller; never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn next(&self) -> Self {
        RequestId(self.0 + 1)
    }
}

/// Which port a request went to. A completion only counts against a request
/// of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Speak,
    Listen,
}

/// Inbound signals. Everything the controller reacts to arrives as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The external "begin session" trigger.
    Start,
    /// An utterance issued by `SideEffect::Speak` has finished playing.
    SpeechFinished(RequestId),
    /// An utterance could not be played. Treated as finished once reported.
    SpeechFailed { id: RequestId, reason: String },
    /// A single-shot listen produced a transcript.
    Recognized { id: RequestId, transcript: String },
    /// A single-shot listen failed (microphone, network, no-speech...).
    RecognitionFailed { id: RequestId, reason: String },
}

impl Event {
    /// The request this event completes, if any.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            Event::Start => None,
            Event::SpeechFinished(id)
            | Event::SpeechFailed { id, .. }
            | Event::Recognized { id, .. }
            | Event::RecognitionFailed { id, .. } => Some(*id),
        }
    }

    pub fn request_kind(&self) -> Option<RequestKind> {
        match self {
            Event::Start => None,
            Event::SpeechFinished(_) | Event::SpeechFailed { .. } => Some(RequestKind::Speak),
            Event::Recognized { .. } | Event::RecognitionFailed { .. } => Some(RequestKind::Listen),
        }
    }

    /// Shorthand for a successful recognition result.
    pub fn recognized(id: RequestId, transcript: &str) -> Self {
        Event::Recognized {
            id,
            transcript: transcript.to_string(),
        }
    }
}
