//! Collaborator ports the driver talks to. The kernel never sees these.

pub mod speech;

pub use speech::{SpeechError, SpeechInput, SpeechOutput, StatusDisplay};
