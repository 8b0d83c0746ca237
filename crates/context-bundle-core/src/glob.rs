//! Memoized glob matching.
//!
//! Workspace searches reuse the same handful of patterns many times per
//! ranking pass, so compiled matchers are cached by pattern string.

use anyhow::Result;
use globset::{GlobBuilder, GlobMatcher};
use std::collections::HashMap;
use std::sync::Mutex;

/// Whether `pattern` contains no glob metacharacters.
pub fn is_literal(pattern: &str) -> bool {
    !pattern.contains(['*', '?', '[', ']', '{', '}'])
}

/// Cache of compiled glob matchers keyed by pattern.
///
/// `*` does not cross `/`; use `**` for that.
#[derive(Default)]
pub struct GlobCache {
    matchers: Mutex<HashMap<String, GlobMatcher>>,
}

impl GlobCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match `path` against `pattern`, compiling the pattern on first use.
    pub fn is_match(&self, pattern: &str, path: &str) -> Result<bool> {
        let mut matchers = self
            .matchers
            .lock()
            .map_err(|_| anyhow::anyhow!("glob cache poisoned"))?;
        if let Some(matcher) = matchers.get(pattern) {
            return Ok(matcher.is_match(path));
        }
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()?
            .compile_matcher();
        let matched = matcher.is_match(path);
        matchers.insert(pattern.to_string(), matcher);
        Ok(matched)
    }

    /// Number of compiled patterns held.
    pub fn len(&self) -> usize {
        self.matchers.lock().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
