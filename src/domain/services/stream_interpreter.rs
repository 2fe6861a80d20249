//! Reassembles the upstream's line-oriented event stream into one answer.
//!
//! The upstream replies with newline-separated records. Records prefixed
//! with `data:` carry OpenAI-style delta fragments
//! (`{"choices":[{"delta":{"content":"..."}}]}`); everything else is
//! keep-alive or control noise and is ignored.

use serde_json::Value;

/// Returned when the stream carried no usable content.
pub const FALLBACK_ANSWER: &str = "No answer found.";

const DATA_PREFIX: &str = "data:";

const FIRST_DELTA_CONTENT: &str = "/choices/0/delta/content";

/// Result of decoding a single `data:` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedRecord {
    /// The record carried a non-empty first-choice delta.
    Fragment(String),
    /// Valid JSON, but no first-choice content (role headers, finish markers).
    NoFragment,
    /// Not JSON at all, e.g. `[DONE]` or a truncated line.
    Undecodable,
}

/// Decodes one line. Returns `None` for lines that are not `data:` records.
pub fn decode_line(line: &str) -> Option<DecodedRecord> {
    let rest = line.strip_prefix(DATA_PREFIX)?;

    // The upstream always writes one separator character after the prefix.
    let mut chars = rest.chars();
    chars.next();
    let body = chars.as_str();

    let record: Value = match serde_json::from_str(body) {
        Ok(record) => record,
        Err(_) => return Some(DecodedRecord::Undecodable),
    };

    // Only the first choice matters; siblings may have any shape.
    let content = record
        .pointer(FIRST_DELTA_CONTENT)
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty());

    Some(match content {
        Some(content) => DecodedRecord::Fragment(content.to_string()),
        None => DecodedRecord::NoFragment,
    })
}

/// Concatenates every delta fragment in stream order and trims the result.
///
/// Total over any input: undecodable records are skipped, and an empty
/// result yields [`FALLBACK_ANSWER`].
pub fn interpret(raw: &str) -> String {
    let mut answer = String::new();

    for line in raw.split('\n') {
        if let Some(DecodedRecord::Fragment(fragment)) = decode_line(line) {
            answer.push_str(&fragment);
        }
    }

    let trimmed = answer.trim();
    if trimmed.is_empty() {
        FALLBACK_ANSWER.to_string()
    } else {
        trimmed.to_string()
    }
}
