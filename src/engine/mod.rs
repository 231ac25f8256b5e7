//! The deterministic execution engine.
//!
//! Everything here is pure computation over the loaded series:
//!
//! - `aggregate` — window filtering + sum / mean-of-daily-sums
//! - `compare` — difference, percent change, direction
//! - `dispatch` — the table of supported `(intent, metric, time)` tuples

pub mod aggregate;
pub mod compare;
pub mod dispatch;

pub use aggregate::aggregate;
pub use compare::compare;
pub use dispatch::{dispatch, ExecContext, Outcome};
