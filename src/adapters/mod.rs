//! Concrete collaborators for the speech ports.

pub mod console;
pub mod say;
pub mod scripted;

pub use console::{ConsoleDisplay, ConsoleSpeaker, StdinListener};
pub use say::SayCommand;
pub use scripted::{RecordingDisplay, RecordingSpeaker, ScriptedListener};
