use super::event::RequestId;

/// Requests the controller hands to the driver. The controller never performs
/// I/O itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    Speak { id: RequestId, text: String },
    Listen { id: RequestId },
    ShowStatus(String),
}

impl SideEffect {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            SideEffect::Speak { id, .. } | SideEffect::Listen { id } => Some(*id),
            SideEffect::ShowStatus(_) => None,
        }
    }
}
