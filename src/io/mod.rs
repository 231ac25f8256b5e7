//! Input handling (CSV ingest).

pub mod ingest;
