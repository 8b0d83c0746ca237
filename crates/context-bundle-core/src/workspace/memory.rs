//! In-memory [`Workspace`] implementation for tests and embedding hosts.
//!
//! Files live in a `BTreeMap` behind `std::sync::RwLock`, so searches walk
//! paths in lexical order just like a sorted directory walk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{is_vendored, Workspace};
use crate::glob::{is_literal, GlobCache};
use crate::models::normalize_separators;

/// Workspace whose files are held in memory.
pub struct InMemoryWorkspace {
    root: PathBuf,
    files: RwLock<BTreeMap<String, String>>,
    globs: GlobCache,
}

impl InMemoryWorkspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            files: RwLock::new(BTreeMap::new()),
            globs: GlobCache::new(),
        }
    }

    /// Build a workspace from `(path, contents)` pairs.
    pub fn with_files<'a>(root: impl Into<PathBuf>, files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let ws = Self::new(root);
        for (path, contents) in files {
            ws.insert(path, contents);
        }
        ws
    }

    /// Add or replace a file.
    pub fn insert(&self, path: &str, contents: &str) {
        let mut files = self.files.write().unwrap();
        files.insert(normalize_separators(path), contents.to_string());
    }

    /// Remove a file, returning whether it existed.
    pub fn remove(&self, path: &str) -> bool {
        let mut files = self.files.write().unwrap();
        files.remove(&normalize_separators(path)).is_some()
    }
}

#[async_trait]
impl Workspace for InMemoryWorkspace {
    fn root(&self) -> &Path {
        &self.root
    }

    async fn find_files(&self, pattern: &str, limit: usize) -> Result<Vec<String>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let files = self.files.read().map_err(|_| anyhow!("workspace lock poisoned"))?;

        if is_literal(pattern) {
            let key = normalize_separators(pattern);
            let hit = files.contains_key(&key) && !is_vendored(&key);
            return Ok(if hit { vec![key] } else { Vec::new() });
        }

        let mut found = Vec::new();
        for path in files.keys() {
            if is_vendored(path) {
                continue;
            }
            if self.globs.is_match(pattern, path)? {
                found.push(path.clone());
                if found.len() >= limit {
                    break;
                }
            }
        }
        Ok(found)
    }

    async fn read_text(&self, relative: &str) -> Result<String> {
        let files = self.files.read().map_err(|_| anyhow!("workspace lock poisoned"))?;
        files
            .get(&normalize_separators(relative))
            .cloned()
            .ok_or_else(|| anyhow!("file not found: {}", relative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> InMemoryWorkspace {
        InMemoryWorkspace::with_files(
            "/proj",
            [
                ("src/a.ts", "export const a = 1;"),
                ("src/b.ts", "export const b = 2;"),
                ("node_modules/pkg/index.js", "module.exports = {};"),
            ],
        )
    }

    #[tokio::test]
    async fn test_literal_lookup() {
        let ws = workspace();
        assert_eq!(ws.find_files("src/a.ts", 1).await.unwrap(), vec!["src/a.ts"]);
        assert!(ws.find_files("src/c.ts", 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_glob_respects_limit() {
        let ws = workspace();
        assert_eq!(ws.find_files("src/*.ts", 1).await.unwrap(), vec!["src/a.ts"]);
        assert_eq!(ws.find_files("src/*.ts", 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_vendored_excluded() {
        let ws = workspace();
        assert!(ws.find_files("node_modules/pkg/index.js", 1).await.unwrap().is_empty());
        assert!(ws.find_files("**/index.js", 5).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_text() {
        let ws = workspace();
        assert_eq!(ws.read_text("src/b.ts").await.unwrap(), "export const b = 2;");
        assert!(ws.read_text("missing.ts").await.is_err());
        assert!(ws.remove("src/b.ts"));
        assert!(ws.read_text("src/b.ts").await.is_err());
    }
}
