//! Formatted terminal output.

pub mod format;

pub use format::{
    format_answer, format_insufficient_data, format_intent, format_unsupported,
};
