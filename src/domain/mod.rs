//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the time-series record (`Record`)
//! - the model-facing intent schema (`Intent`, `IntentKind`, `TimeSpec`)
//! - time references and resolved windows (`TimeRef`, `TimeWindow`)
//! - engine outputs (`Comparison`, `Direction`)

pub mod types;

pub use types::*;
