//! Core data models shared by the extractor, resolver, and ranker.
//!
//! Snippets use camelCase field names on the wire so bundles produced by
//! editor front-ends can be read without a translation layer.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A raw import specifier found in source text.
///
/// `index` is the byte offset of the specifier itself (not of the
/// enclosing statement). Definition providers are queried at exactly this
/// offset, so it must point at the first byte of `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportCandidate {
    pub path: String,
    pub index: usize,
}

/// Who put a snippet into the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddedBy {
    /// Selected explicitly by the user. Only these drive suggestions.
    #[default]
    User,
    /// Added from a previous suggestion round.
    Suggestion,
}

/// What a snippet contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SnippetKind {
    #[default]
    Code,
    Terminal,
    External,
}

/// A piece of context collected for an AI assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Workspace-relative (or absolute) path of the originating file.
    #[serde(default)]
    pub file_name: String,
    pub text: String,
    #[serde(default)]
    pub added_by: AddedBy,
    #[serde(default, rename = "type")]
    pub kind: SnippetKind,
    #[serde(default)]
    pub start_line: Option<usize>,
    #[serde(default)]
    pub end_line: Option<usize>,
    #[serde(default)]
    pub is_full_file: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Snippet {
    /// A user-selected code snippet with no line information.
    pub fn user_code(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
            added_by: AddedBy::User,
            kind: SnippetKind::Code,
            start_line: None,
            end_line: None,
            is_full_file: false,
            note: None,
        }
    }

    /// A whole file added as context, spanning every line of `text`.
    pub fn full_file(file_name: impl Into<String>, text: impl Into<String>, added_by: AddedBy) -> Self {
        let text = text.into();
        let end_line = text.lines().count().max(1);
        Self {
            file_name: file_name.into(),
            text,
            added_by,
            kind: SnippetKind::Code,
            start_line: Some(1),
            end_line: Some(end_line),
            is_full_file: true,
            note: None,
        }
    }

    /// Primary snippets are the only signal sources for suggestions.
    ///
    /// Suggested files never feed back into the ranker, otherwise each
    /// accepted suggestion would pull in its own neighbours.
    pub fn is_primary(&self) -> bool {
        self.added_by == AddedBy::User
    }

    /// `file:start-end` label used in exports.
    pub fn file_info(&self) -> String {
        match (self.start_line, self.end_line) {
            (Some(start), Some(end)) if start == end => format!("{}:{}", self.file_name, start),
            (Some(start), Some(end)) => format!("{}:{}-{}", self.file_name, start, end),
            _ => self.file_name.clone(),
        }
    }
}

/// Scoring breakdown for one suggested file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionScore {
    /// Workspace-relative path, extension stripped.
    pub file_path: String,
    /// Number of primary snippets importing this file.
    pub frequency: usize,
    /// Number of project-local imports in the file itself.
    pub hub_score: usize,
    /// `frequency * 10 + hub_score`.
    pub composite_score: usize,
}

/// Convert backslashes to forward slashes.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Strip the final extension from the last path segment.
///
/// Dotfiles keep their name (`src/.env` stays as is) and extensions on
/// directory segments are left alone.
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}

/// Normalize a path for context comparisons: forward slashes, no
/// leading `./`, no extension.
pub fn normalize_context_path(path: &str) -> String {
    let normalized = normalize_separators(path);
    let trimmed = normalized.trim_start_matches("./");
    strip_extension(trimmed).to_string()
}

/// Make `path` relative to `root` when it is absolute and inside it.
pub fn relative_to_root(root: &Path, path: &Path) -> Option<String> {
    if path.is_absolute() {
        path.strip_prefix(root)
            .ok()
            .map(|rel| normalize_separators(&rel.to_string_lossy()))
    } else {
        Some(normalize_separators(&path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("src/a.ts"), "src/a");
        assert_eq!(strip_extension("src/a.test.ts"), "src/a.test");
        assert_eq!(strip_extension("src/a"), "src/a");
        assert_eq!(strip_extension("src.d/a"), "src.d/a");
        assert_eq!(strip_extension(".env"), ".env");
    }

    #[test]
    fn test_normalize_context_path() {
        assert_eq!(normalize_context_path("src\\core\\a.rs"), "src/core/a");
        assert_eq!(normalize_context_path("./lib/b.py"), "lib/b");
    }

    #[test]
    fn test_relative_to_root() {
        let root = PathBuf::from("/work/proj");
        assert_eq!(
            relative_to_root(&root, Path::new("/work/proj/src/a.ts")),
            Some("src/a.ts".to_string())
        );
        assert_eq!(relative_to_root(&root, Path::new("/elsewhere/a.ts")), None);
        assert_eq!(
            relative_to_root(&root, Path::new("src/a.ts")),
            Some("src/a.ts".to_string())
        );
    }

    #[test]
    fn test_snippet_deserialize_camel_case() {
        let json = r#"{"fileName":"src/a.ts","text":"x","addedBy":"suggestion","type":"code","startLine":3,"endLine":9}"#;
        let s: Snippet = serde_json::from_str(json).unwrap();
        assert_eq!(s.file_name, "src/a.ts");
        assert_eq!(s.added_by, AddedBy::Suggestion);
        assert!(!s.is_primary());
        assert_eq!(s.file_info(), "src/a.ts:3-9");
    }

    #[test]
    fn test_snippet_defaults_to_user_code() {
        let s: Snippet = serde_json::from_str(r#"{"fileName":"a.py","text":"import os"}"#).unwrap();
        assert_eq!(s.kind, SnippetKind::Code);
        assert!(s.is_primary());
    }

    #[test]
    fn test_full_file_line_range() {
        let s = Snippet::full_file("a.rs", "one\ntwo\nthree\n", AddedBy::Suggestion);
        assert_eq!(s.start_line, Some(1));
        assert_eq!(s.end_line, Some(3));
        assert!(s.is_full_file);
    }
}
