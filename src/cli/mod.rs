//! Command-line parsing for the question-answering pipeline.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the engine code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "askcsv",
    version,
    about = "Answer analytic questions about a sales CSV (LLM extracts the intent, Rust does the math)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline: load the CSV, extract the intent, execute it,
    /// and print the answer.
    Ask(AskArgs),
    /// Extract and print the intent JSON only (no data file needed).
    ///
    /// Useful for checking what a given model makes of a question before
    /// trusting it in the full pipeline.
    Intent(IntentArgs),
}

/// Options for the full `ask` pipeline.
#[derive(Debug, Parser, Clone)]
pub struct AskArgs {
    /// CSV file with a date column and an amount column.
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Ollama model name.
    #[arg(short = 'm', long, default_value = "llama3.2")]
    pub model: String,

    /// The question to answer.
    #[arg(short = 'q', long)]
    pub question: String,

    /// IANA timezone in which "now" and "yesterday" are evaluated.
    #[arg(long, default_value = "Europe/London")]
    pub tz: String,

    /// Print the extraction prompt before calling the model.
    #[arg(long)]
    pub show_prompt: bool,
}

/// Options for intent extraction only.
#[derive(Debug, Parser, Clone)]
pub struct IntentArgs {
    /// Ollama model name.
    #[arg(short = 'm', long, default_value = "llama3.2")]
    pub model: String,

    /// The question to extract an intent from.
    #[arg(short = 'q', long)]
    pub question: String,

    /// Print the extraction prompt before calling the model.
    #[arg(long)]
    pub show_prompt: bool,
}
