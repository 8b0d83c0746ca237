//! Suggestion output for the CLI.
//!
//! Results go to **stdout** so they can be piped; the "nothing found"
//! notice goes to stderr so a script reading stdout sees an empty list.

use std::io::Write;

use context_bundle_core::sink::SuggestionSink;

/// One suggested path per line: `core/a`.
pub struct HumanSink;

impl SuggestionSink for HumanSink {
    fn deliver(&self, suggestions: &[String]) {
        if suggestions.is_empty() {
            let _ = writeln!(std::io::stderr().lock(), "No suggestions.");
            return;
        }
        let mut out = std::io::stdout().lock();
        for path in suggestions {
            let _ = writeln!(out, "{}", path);
        }
        let _ = out.flush();
    }
}

/// Machine-readable: `{"suggestions":["core/a"]}` on one line.
pub struct JsonSink;

impl SuggestionSink for JsonSink {
    fn deliver(&self, suggestions: &[String]) {
        if let Ok(line) = serde_json::to_string(&json_payload(suggestions)) {
            let _ = writeln!(std::io::stdout().lock(), "{}", line);
        }
    }
}

fn json_payload(suggestions: &[String]) -> serde_json::Value {
    serde_json::json!({ "suggestions": suggestions })
}

/// Output mode for `ctxb suggest`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    /// `--json` forces JSON; otherwise human.
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    pub fn sink(&self) -> Box<dyn SuggestionSink> {
        match self {
            OutputMode::Human => Box::new(HumanSink),
            OutputMode::Json => Box::new(JsonSink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_payload_shape() {
        let payload = json_payload(&["core/a".to_string(), "lib/b".to_string()]);
        assert_eq!(payload.to_string(), r#"{"suggestions":["core/a","lib/b"]}"#);
        assert_eq!(json_payload(&[]).to_string(), r#"{"suggestions":[]}"#);
    }

    #[test]
    fn flag_selects_mode() {
        assert_eq!(OutputMode::from_flag(true), OutputMode::Json);
        assert_eq!(OutputMode::from_flag(false), OutputMode::Human);
    }
}
