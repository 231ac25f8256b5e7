//! Intent extraction: the prompt we send to the model and the recovery of a
//! structured `Intent` from whatever text comes back.
//!
//! The model's output is an untrusted, schema-less string. It is never
//! executed and never trusted as a numeric answer — only as a suggestion of
//! what the question asked for. Recovery is deliberate and ordered; when
//! nothing recovers, we fail with the raw text rather than guess a default.

use crate::domain::Intent;
use crate::error::AppError;

/// JSON schema description embedded in the prompt.
const JSON_SCHEMA_DESC: &str = r#"{
  "intent": "aggregate | compare | topN | trend | breakdown",
  "metric": "sales_amount",
  "time": {
    "a": "yesterday | last_week | last_week_avg | last_7d | <YYYY-MM-DD>",
    "b": "same options, optional"
  }
}"#;

/// Build the extraction prompt for a user question.
///
/// The model is instructed to emit exactly one line of JSON; the parser
/// below still copes with fences and surrounding prose, because small local
/// models routinely ignore that instruction.
pub fn build_prompt(question: &str) -> String {
    format!(
        "SYSTEM:\n\
         You are an extractor that converts sales-data questions into a single parameter JSON.\n\
         Output exactly one line of JSON and nothing else.\n\
         \n\
         Schema:\n\
         {JSON_SCHEMA_DESC}\n\
         \n\
         Example:\n\
         Q: \"How did yesterday's sales compare to last week's daily average?\"\n\
         A: {{\"intent\":\"compare\",\"metric\":\"sales_amount\",\"time\":{{\"a\":\"yesterday\",\"b\":\"last_week_avg\"}}}}\n\
         \n\
         USER question:\n\
         {question}\n"
    )
}

/// Recover a validated `Intent` from raw model output.
///
/// In order, first success wins:
///
/// 1. strip a surrounding ``` fence (dropping a language-tag line)
/// 2. strict parse of the remaining text
/// 3. parse the substring between the first `{` and the last `}` inclusive
///
/// Failure carries the original text so the user can see what the model
/// actually said (exit code 3 at the process boundary).
pub fn parse_intent(raw: &str) -> Result<Intent, AppError> {
    let stripped = strip_code_fence(raw);

    if let Ok(intent) = serde_json::from_str::<Intent>(stripped) {
        return Ok(intent);
    }

    if let Some(candidate) = brace_substring(raw) {
        if let Ok(intent) = serde_json::from_str::<Intent>(candidate) {
            return Ok(intent);
        }
    }

    Err(AppError::intent_parse(format!(
        "Could not parse model output as an intent JSON:\n{}",
        raw.trim()
    )))
}

/// Remove a surrounding fenced code block, if present.
///
/// A fence opened with a language tag ("```json") drops the tag line; a
/// bare fence is handled the same way. Text without a leading fence is
/// returned trimmed.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // The first line after the opening fence may be a bare language tag.
    match rest.split_once('\n') {
        Some((first, body)) if first.trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
            body.trim()
        }
        _ => rest.trim_matches(|c: char| c == '`' || c.is_whitespace()),
    }
}

/// The substring from the first `{` to the last `}`, inclusive.
fn brace_substring(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
