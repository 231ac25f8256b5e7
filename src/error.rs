//! Process-level error type.
//!
//! Exit codes mirror the pipeline stages so scripts can tell failures apart:
//!
//! - `1` — input/config problems (unreadable CSV, empty series, bad timezone)
//! - `2` — model invocation failed (Ollama unreachable, non-success status)
//! - `3` — model output could not be recovered as an intent JSON
//!
//! Unsupported intents and insufficient data are *not* errors; they exit 0
//! with a plain message (see `app`).

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Input/config failure (exit 1).
    pub fn load(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }

    /// External model invocation failure (exit 2).
    pub fn model(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Intent parse failure (exit 3).
    pub fn intent_parse(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
