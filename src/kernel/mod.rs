//! Pure dialogue kernel: events in, side effects out. No I/O, no awaits.

pub mod classifier;
pub mod controller;
pub mod effect;
pub mod event;
pub mod prompts;
pub mod questionnaire;
pub mod scoring;
pub mod session;
pub mod state;
pub mod telemetry;
