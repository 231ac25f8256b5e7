//! `askcsv` library crate.
//!
//! The binary (`askcsv`) is a thin wrapper around this library so that:
//!
//! - the deterministic core (window resolution, aggregation, comparison)
//!   is testable without a live model process
//! - modules are reusable (e.g., future TUI, service wrapper, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod engine;
pub mod error;
pub mod intent;
pub mod io;
pub mod llm;
pub mod report;
pub mod timeref;
