//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - builds the run configuration (explicit timezone included)
//! - runs the ask pipeline against a live Ollama client
//! - prints the answer / unsupported / insufficient-data report

use std::str::FromStr;

use chrono_tz::Tz;
use clap::Parser;

use crate::cli::{AskArgs, Command, IntentArgs};
use crate::domain::AskConfig;
use crate::engine::Outcome;
use crate::error::AppError;
use crate::llm::{ModelClient, OllamaClient};

pub mod pipeline;

/// Entry point for the `askcsv` binary.
pub fn run() -> Result<(), AppError> {
    // We want bare `askcsv -f data.csv -q "..."` to behave like
    // `askcsv ask ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the short UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Ask(args) => handle_ask(args),
        Command::Intent(args) => handle_intent(args),
    }
}

fn handle_ask(args: AskArgs) -> Result<(), AppError> {
    let config = ask_config_from_args(&args)?;
    let client = OllamaClient::from_env(&config.model)?;
    let output = pipeline::run_ask(&config, &client)?;

    print!("{}", crate::report::format_intent(&output.intent));

    match &output.outcome {
        Outcome::Compared {
            cmp,
            a_window,
            b_window,
        } => {
            print!(
                "{}",
                crate::report::format_answer(cmp, a_window, b_window, config.tz)
            );
        }
        Outcome::InsufficientData { a_window, b_window } => {
            print!(
                "{}",
                crate::report::format_insufficient_data(a_window, b_window)
            );
        }
        Outcome::Unsupported { reason } => {
            print!("{}", crate::report::format_unsupported(reason));
        }
    }

    Ok(())
}

fn handle_intent(args: IntentArgs) -> Result<(), AppError> {
    let client = OllamaClient::from_env(&args.model)?;
    let prompt = crate::intent::build_prompt(&args.question);
    if args.show_prompt {
        println!("=== Prompt ===\n{prompt}");
    }

    let raw = client.invoke(&prompt)?;
    let intent = crate::intent::parse_intent(&raw)?;
    print!("{}", crate::report::format_intent(&intent));
    Ok(())
}

pub fn ask_config_from_args(args: &AskArgs) -> Result<AskConfig, AppError> {
    let tz = Tz::from_str(&args.tz)
        .map_err(|_| AppError::load(format!("Unknown IANA timezone '{}'.", args.tz)))?;

    Ok(AskConfig {
        csv_path: args.file.clone(),
        model: args.model.clone(),
        question: args.question.clone(),
        tz,
        show_prompt: args.show_prompt,
    })
}

/// Rewrite argv so `askcsv <flags>` defaults to `askcsv ask <flags>`.
///
/// Rules:
/// - `askcsv -f data.csv -q "..."` -> `askcsv ask -f data.csv -q "..."`
/// - `askcsv --help/--version/-h`  -> unchanged (top-level help/version)
/// - an explicit subcommand name   -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "ask" | "intent");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "ask flags".
    if arg1.starts_with('-') {
        argv.insert(1, "ask".to_string());
        return argv;
    }

    // Otherwise, leave as-is (clap will produce the usage error).
    argv
}
