//! Dialogue telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside decision logic (controller, classifier, scoring).
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain what the respondent said.
//! Only question indices, derived levels, totals and counts are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;
